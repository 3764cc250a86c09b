//! Engine arbitration: mutual exclusion and usage counting for the shared
//! single-slot engine.
//!
//! One mutex serializes every primitive call system-wide. The usage counter
//! lives under the same mutex and gates engine power: the engine is enabled
//! on the 0→1 user transition and disabled on 1→0.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use crate::engine::{CipherEngine, SoftAesEngine};

struct EngineSlot {
    engine: Box<dyn CipherEngine>,
    active_users: usize,
}

/// Guard around the shared cipher engine.
///
/// Contexts hold the arbiter by `Arc` and register themselves as users for
/// their whole lifetime. Every block operation runs inside the arbiter's
/// mutex, so two contexts can never have primitive calls in flight at once.
pub struct EngineArbiter {
    slot: Mutex<EngineSlot>,
}

static GLOBAL: OnceLock<Arc<EngineArbiter>> = OnceLock::new();

impl EngineArbiter {
    /// Build an arbiter around a specific engine.
    ///
    /// Use this to drive a real hardware backend, or to isolate tests on a
    /// fake engine.
    pub fn new(engine: Box<dyn CipherEngine>) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(EngineSlot {
                engine,
                active_users: 0,
            }),
        })
    }

    /// The process-wide arbiter, backed by the software engine.
    pub fn global() -> Arc<Self> {
        GLOBAL
            .get_or_init(|| Self::new(Box::new(SoftAesEngine::new())))
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, EngineSlot> {
        // No operation leaves the slot inconsistent, so a poisoned lock
        // still holds valid state.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a user. Powers the engine up on the first one.
    pub(crate) fn acquire(&self) {
        let mut slot = self.lock();
        slot.active_users += 1;
        if slot.active_users == 1 {
            slot.engine.enable();
            tracing::debug!(active_users = slot.active_users, "engine enabled");
        }
    }

    /// Deregister a user. Powers the engine down after the last one.
    pub(crate) fn release(&self) {
        let mut slot = self.lock();
        debug_assert!(slot.active_users > 0);
        slot.active_users -= 1;
        if slot.active_users == 0 {
            slot.engine.disable();
            tracing::debug!(active_users = slot.active_users, "engine disabled");
        }
    }

    /// Run one primitive invocation with exclusive engine access.
    ///
    /// The mutex is released on every exit path, including panics inside
    /// the closure.
    pub(crate) fn with_engine<R>(&self, f: impl FnOnce(&mut dyn CipherEngine) -> R) -> R {
        let mut slot = self.lock();
        f(slot.engine.as_mut())
    }

    /// Number of live contexts currently registered.
    pub fn active_users(&self) -> usize {
        self.lock().active_users
    }
}

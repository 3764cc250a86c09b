//! # hwaes
//!
//! Block cipher modes of operation over a shared single-slot AES engine.
//!
//! The actual single-block transform is an engine behind the
//! [`CipherEngine`] trait: on real hardware a register-programmed
//! peripheral, by default the bundled software engine. The engine has one
//! key register shared by every context in the process, so this crate's job
//! is the machinery that makes that safe: an arbiter that serializes all
//! engine access and reference-counts users for power gating, per-context
//! key state with a reprogram-before-use discipline, and the byte-exact
//! mode loops (ECB, CBC, CFB-128, CFB-8, CTR) on top.
//!
//! ## Quick Start
//!
//! ```
//! use hwaes::{AesContext, Direction};
//!
//! let mut ctx = AesContext::new();
//! ctx.set_key_encrypt(&[0x2b; 16], 128)?;
//! ctx.set_key_decrypt(&[0x2b; 16], 128)?;
//!
//! let mut iv = [0u8; 16];
//! let mut data = *b"exactly 16 bytes";
//! ctx.crypt_cbc(Direction::Encrypt, &mut iv, &mut data)?;
//!
//! let mut iv = [0u8; 16];
//! ctx.crypt_cbc(Direction::Decrypt, &mut iv, &mut data)?;
//! assert_eq!(&data, b"exactly 16 bytes");
//! # Ok::<(), hwaes::Error>(())
//! ```
//!
//! Streaming modes carry their chaining state in caller-owned buffers, so
//! a message can be processed in arbitrary chunks across calls:
//!
//! ```
//! use hwaes::{AesContext, Direction};
//!
//! let mut ctx = AesContext::new();
//! ctx.set_key_encrypt(&[7u8; 16], 128)?;
//!
//! let mut nonce = [0u8; 16];
//! let mut stream = [0u8; 16];
//! let mut off = 0;
//! let mut msg = *b"any length works, block-aligned or not";
//! let (head, tail) = msg.split_at_mut(5);
//! ctx.crypt_ctr(&mut off, &mut nonce, &mut stream, head);
//! ctx.crypt_ctr(&mut off, &mut nonce, &mut stream, tail);
//! # Ok::<(), hwaes::Error>(())
//! ```

pub mod arbiter;
pub mod context;
pub mod engine;
pub mod error;
pub mod modes;

pub use arbiter::EngineArbiter;
pub use context::AesContext;
pub use engine::{CipherEngine, Direction, KeyBits, SoftAesEngine};
pub use error::Error;
pub use modes::BLOCK_SIZE;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Cipher contexts: per-direction key state and the single-block ECB
//! operation every mode is built on.

use std::sync::Arc;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::arbiter::EngineArbiter;
use crate::engine::{Direction, KeyBits};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Key slot
// ---------------------------------------------------------------------------

/// One direction's captured key.
///
/// Holds up to 32 significant bytes (zero-padded to capacity) plus the
/// declared width. `primed` flips on the first assignment and never back.
#[derive(Zeroize, ZeroizeOnDrop)]
struct KeySlot {
    key: [u8; 32],
    #[zeroize(skip)]
    bits: KeyBits,
    #[zeroize(skip)]
    primed: bool,
}

impl KeySlot {
    fn empty() -> Self {
        Self {
            key: [0u8; 32],
            bits: KeyBits::Bits128,
            primed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// A logical cipher context over the shared engine.
///
/// Each context owns an encrypt key and a decrypt key and counts as one
/// engine user from construction until drop. Any number of contexts may be
/// live at once; the engine's single key register is reprogrammed from the
/// context's stored key immediately before every block operation, so
/// interleaved use by other contexts cannot leak keys across contexts or
/// corrupt results.
///
/// Dropping the context zeroizes all captured key material before the
/// engine user count is given back.
pub struct AesContext {
    enc: KeySlot,
    dec: KeySlot,
    arbiter: Arc<EngineArbiter>,
}

impl AesContext {
    /// Create a context on the process-wide engine.
    pub fn new() -> Self {
        Self::with_arbiter(EngineArbiter::global())
    }

    /// Create a context on a specific arbiter.
    pub fn with_arbiter(arbiter: Arc<EngineArbiter>) -> Self {
        arbiter.acquire();
        Self {
            enc: KeySlot::empty(),
            dec: KeySlot::empty(),
            arbiter,
        }
    }

    /// Set the encryption key. `keybits` must be 128, 192 or 256 and
    /// `key` must be exactly `keybits / 8` bytes.
    pub fn set_key_encrypt(&mut self, key: &[u8], keybits: u32) -> Result<(), Error> {
        Self::assign(&mut self.enc, &self.arbiter, Direction::Encrypt, key, keybits)
    }

    /// Set the decryption key. Same validation as [`set_key_encrypt`].
    ///
    /// [`set_key_encrypt`]: Self::set_key_encrypt
    pub fn set_key_decrypt(&mut self, key: &[u8], keybits: u32) -> Result<(), Error> {
        Self::assign(&mut self.dec, &self.arbiter, Direction::Decrypt, key, keybits)
    }

    /// First assignment captures the key locally without touching the
    /// engine; every later assignment programs the engine register right
    /// away. The engine holds one key for everyone, so a context's key
    /// only ever reaches hardware on demand, immediately before use.
    fn assign(
        slot: &mut KeySlot,
        arbiter: &EngineArbiter,
        direction: Direction,
        key: &[u8],
        keybits: u32,
    ) -> Result<(), Error> {
        let bits = KeyBits::from_bits(keybits)?;
        if key.len() != bits.byte_len() {
            return Err(Error::InvalidKeyLength);
        }

        if !slot.primed {
            slot.primed = true;
            slot.bits = bits;
            slot.key = [0u8; 32];
            slot.key[..bits.byte_len()].copy_from_slice(key);
            tracing::trace!(%direction, %bits, "key captured");
        } else {
            arbiter.with_engine(|engine| engine.load_key(key, bits, direction));
            tracing::trace!(%direction, %bits, "key programmed");
        }
        Ok(())
    }

    /// Encrypt or decrypt one 16-byte block (ECB), in place.
    ///
    /// Takes the engine mutex, re-asserts this context's key for the
    /// requested direction, then runs the transform. The re-assert happens
    /// on every call even when the register already holds the right key:
    /// another context may have run in between, and the register is shared.
    pub fn crypt_ecb(&self, direction: Direction, block: &mut [u8; 16]) {
        let slot = match direction {
            Direction::Encrypt => &self.enc,
            Direction::Decrypt => &self.dec,
        };
        self.arbiter.with_engine(|engine| {
            engine.load_key(&slot.key[..slot.bits.byte_len()], slot.bits, direction);
            engine.transform(direction, block);
        });
    }

    /// The arbiter this context runs on.
    pub fn arbiter(&self) -> &Arc<EngineArbiter> {
        &self.arbiter
    }
}

impl Default for AesContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AesContext {
    fn drop(&mut self) {
        // Key residue must be gone before the user count is given back.
        self.enc.zeroize();
        self.dec.zeroize();
        self.arbiter.release();
    }
}

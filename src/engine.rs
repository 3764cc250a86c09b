//! The cipher engine seam: the single-block AES transform this crate wraps.
//!
//! Hardware backends implement [`CipherEngine`]; the crate ships
//! [`SoftAesEngine`], a software engine built on the RustCrypto `aes`
//! crate that models the same single key register a hardware unit has.

use std::fmt;

use aes::cipher::{BlockDecrypt, BlockEncrypt, Key, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use zeroize::Zeroize;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Direction and key width
// ---------------------------------------------------------------------------

/// Which half of the cipher to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypt => write!(f, "encrypt"),
            Self::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// Supported AES key widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyBits {
    #[default]
    Bits128,
    Bits192,
    Bits256,
}

impl KeyBits {
    /// Validate a caller-supplied bit width.
    pub fn from_bits(bits: u32) -> Result<Self, Error> {
        match bits {
            128 => Ok(Self::Bits128),
            192 => Ok(Self::Bits192),
            256 => Ok(Self::Bits256),
            _ => Err(Error::InvalidKeyLength),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            Self::Bits128 => 128,
            Self::Bits192 => 192,
            Self::Bits256 => 256,
        }
    }

    pub fn byte_len(self) -> usize {
        self.bits() as usize / 8
    }
}

impl fmt::Display for KeyBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// ---------------------------------------------------------------------------
// Engine trait
// ---------------------------------------------------------------------------

/// A single-block AES transform with one active key register.
///
/// All operations are infallible resource or register programming; the
/// arbiter guarantees exclusive access while any of them runs. `load_key`
/// replaces the register contents every time it is called; implementations
/// must not cache or skip redundant loads, since interleaved contexts rely
/// on the register holding exactly the last key programmed.
pub trait CipherEngine: Send {
    /// Power/clock the engine up. Called on the 0→1 user transition.
    fn enable(&mut self);

    /// Power/clock the engine down. Called on the 1→0 user transition.
    fn disable(&mut self);

    /// Program the key register for the given direction.
    fn load_key(&mut self, key: &[u8], bits: KeyBits, direction: Direction);

    /// Run one 16-byte block through the cipher, in place.
    fn transform(&mut self, direction: Direction, block: &mut [u8; 16]);
}

// ---------------------------------------------------------------------------
// Software engine
// ---------------------------------------------------------------------------

/// Software stand-in for the hardware unit.
///
/// Holds a single key register like the hardware does: whatever key was
/// loaded last is the key every transform uses, regardless of which
/// context loaded it.
pub struct SoftAesEngine {
    key: [u8; 32],
    bits: KeyBits,
    enabled: bool,
}

impl SoftAesEngine {
    pub fn new() -> Self {
        Self {
            key: [0u8; 32],
            bits: KeyBits::Bits128,
            enabled: false,
        }
    }
}

impl Default for SoftAesEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CipherEngine for SoftAesEngine {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        // Powering down clears the register on real hardware too.
        self.key.zeroize();
        self.bits = KeyBits::Bits128;
    }

    fn load_key(&mut self, key: &[u8], bits: KeyBits, _direction: Direction) {
        // Software key schedule is direction-agnostic; hardware derives the
        // decrypt schedule from the same bytes.
        self.key = [0u8; 32];
        let n = bits.byte_len().min(key.len());
        self.key[..n].copy_from_slice(&key[..n]);
        self.bits = bits;
    }

    fn transform(&mut self, direction: Direction, block: &mut [u8; 16]) {
        let block = Block::from_mut_slice(block);
        match self.bits {
            KeyBits::Bits128 => {
                let cipher = Aes128::new(Key::<Aes128>::from_slice(&self.key[..16]));
                match direction {
                    Direction::Encrypt => cipher.encrypt_block(block),
                    Direction::Decrypt => cipher.decrypt_block(block),
                }
            }
            KeyBits::Bits192 => {
                let cipher = Aes192::new(Key::<Aes192>::from_slice(&self.key[..24]));
                match direction {
                    Direction::Encrypt => cipher.encrypt_block(block),
                    Direction::Decrypt => cipher.decrypt_block(block),
                }
            }
            KeyBits::Bits256 => {
                let cipher = Aes256::new(Key::<Aes256>::from_slice(&self.key[..32]));
                match direction {
                    Direction::Encrypt => cipher.encrypt_block(block),
                    Direction::Decrypt => cipher.decrypt_block(block),
                }
            }
        }
    }
}

impl Drop for SoftAesEngine {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

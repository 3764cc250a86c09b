//! Modes of operation: CBC, CFB-128, CFB-8 and CTR over the single-block
//! ECB operation.
//!
//! All modes work in place on the data buffer. Chaining state (IV, counter,
//! keystream offset) is caller-owned and mutated in place, so a stream can
//! be processed across any number of calls by passing the same state back
//! in.

use crate::context::AesContext;
use crate::engine::Direction;
use crate::error::Error;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

impl AesContext {
    /// CBC encrypt/decrypt, in place.
    ///
    /// `data` must be a whole number of blocks. `iv` is replaced by the
    /// chaining value for the next call.
    pub fn crypt_cbc(
        &self,
        direction: Direction,
        iv: &mut [u8; 16],
        data: &mut [u8],
    ) -> Result<(), Error> {
        if data.len() % BLOCK_SIZE != 0 {
            return Err(Error::InvalidInputLength);
        }

        match direction {
            Direction::Decrypt => {
                for block in data.chunks_exact_mut(BLOCK_SIZE) {
                    let mut temp = [0u8; 16];
                    temp.copy_from_slice(block);

                    let mut buf = temp;
                    self.crypt_ecb(direction, &mut buf);
                    for (b, v) in buf.iter_mut().zip(iv.iter()) {
                        *b ^= v;
                    }
                    block.copy_from_slice(&buf);

                    // Ciphertext becomes the next chaining value.
                    *iv = temp;
                }
            }
            Direction::Encrypt => {
                for block in data.chunks_exact_mut(BLOCK_SIZE) {
                    let mut buf = [0u8; 16];
                    buf.copy_from_slice(block);
                    for (b, v) in buf.iter_mut().zip(iv.iter()) {
                        *b ^= v;
                    }
                    self.crypt_ecb(direction, &mut buf);
                    block.copy_from_slice(&buf);

                    *iv = buf;
                }
            }
        }
        Ok(())
    }

    /// CFB-128 encrypt/decrypt, in place. Byte-oriented: any data length.
    ///
    /// `iv` is the keystream register and `iv_off` the position within the
    /// current keystream block; both are carried across calls. The register
    /// is refreshed with the ENCRYPT transform in both directions.
    pub fn crypt_cfb128(
        &self,
        direction: Direction,
        iv_off: &mut usize,
        iv: &mut [u8; 16],
        data: &mut [u8],
    ) {
        let mut n = *iv_off & 0x0F;

        match direction {
            Direction::Decrypt => {
                for byte in data.iter_mut() {
                    if n == 0 {
                        self.crypt_ecb(Direction::Encrypt, iv);
                    }
                    let c = *byte;
                    *byte = c ^ iv[n];
                    // Ciphertext feeds back into the register.
                    iv[n] = c;
                    n = (n + 1) & 0x0F;
                }
            }
            Direction::Encrypt => {
                for byte in data.iter_mut() {
                    if n == 0 {
                        self.crypt_ecb(Direction::Encrypt, iv);
                    }
                    let c = iv[n] ^ *byte;
                    *byte = c;
                    iv[n] = c;
                    n = (n + 1) & 0x0F;
                }
            }
        }

        *iv_off = n;
    }

    /// CFB-8 encrypt/decrypt, in place. One full block encryption per byte.
    ///
    /// `iv` acts as an 8-bit shift register: each step shifts one byte out
    /// and feeds the ciphertext byte in at the other end.
    pub fn crypt_cfb8(&self, direction: Direction, iv: &mut [u8; 16], data: &mut [u8]) {
        for byte in data.iter_mut() {
            let mut ov = [0u8; 17];
            ov[..16].copy_from_slice(iv);

            self.crypt_ecb(Direction::Encrypt, iv);

            let input = *byte;
            let c = iv[0] ^ input;
            *byte = c;

            // The feedback byte is the ciphertext: the incoming byte when
            // decrypting, the outgoing byte when encrypting.
            ov[16] = match direction {
                Direction::Decrypt => input,
                Direction::Encrypt => c,
            };

            iv.copy_from_slice(&ov[1..]);
        }
    }

    /// CTR encrypt/decrypt, in place. Byte-oriented: any data length.
    ///
    /// `nonce_counter` is incremented as a 128-bit big-endian integer each
    /// time a fresh keystream block is produced into `stream_block`;
    /// `nc_off` tracks the position within that block. All three are
    /// carried across calls. Encryption and decryption are the same
    /// operation. A counter of all 0xFF wraps to all-zero; exhausting the
    /// counter space is the caller's problem, not detected here.
    pub fn crypt_ctr(
        &self,
        nc_off: &mut usize,
        nonce_counter: &mut [u8; 16],
        stream_block: &mut [u8; 16],
        data: &mut [u8],
    ) {
        let mut n = *nc_off & 0x0F;

        for byte in data.iter_mut() {
            if n == 0 {
                *stream_block = *nonce_counter;
                self.crypt_ecb(Direction::Encrypt, stream_block);

                for i in (0..16).rev() {
                    nonce_counter[i] = nonce_counter[i].wrapping_add(1);
                    if nonce_counter[i] != 0 {
                        break;
                    }
                }
            }
            *byte ^= stream_block[n];
            n = (n + 1) & 0x0F;
        }

        *nc_off = n;
    }
}

//! Known Answer Tests: NIST SP 800-38A vectors for every mode.
//!
//! These pin both the software engine and the mode loops to the published
//! byte-level behavior.

use hwaes::{AesContext, Direction, EngineArbiter, SoftAesEngine};

fn ctx(key_hex: &str, bits: u32) -> AesContext {
    let key = hex::decode(key_hex).unwrap();
    let arbiter = EngineArbiter::new(Box::new(SoftAesEngine::new()));
    let mut ctx = AesContext::with_arbiter(arbiter);
    ctx.set_key_encrypt(&key, bits).unwrap();
    ctx.set_key_decrypt(&key, bits).unwrap();
    ctx
}

const KEY_128: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const KEY_192: &str = "8e73b0f7da0e6452c810f32b809079e562f8ead2522c6b7b";
const KEY_256: &str = "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4";

const PLAINTEXT: &str = "6bc1bee22e409f96e93d7e117393172a\
                         ae2d8a571e03ac9c9eb76fac45af8e51\
                         30c81c46a35ce411e5fbc1191a0a52ef\
                         f69f2445df4f9b17ad2b417be66c3710";

fn plaintext() -> Vec<u8> {
    hex::decode(PLAINTEXT).unwrap()
}

// === ECB ===

#[test]
fn ecb_aes128() {
    let ctx = ctx(KEY_128, 128);
    let mut data = plaintext();
    for block in data.chunks_exact_mut(16) {
        ctx.crypt_ecb(Direction::Encrypt, block.try_into().unwrap());
    }
    assert_eq!(
        hex::encode(&data),
        "3ad77bb40d7a3660a89ecaf32466ef97\
         f5d3d58503b9699de785895a96fdbaaf\
         43b1cd7f598ece23881b00e3ed030688\
         7b0c785e27e8ad3f8223207104725dd4"
    );

    for block in data.chunks_exact_mut(16) {
        ctx.crypt_ecb(Direction::Decrypt, block.try_into().unwrap());
    }
    assert_eq!(data, plaintext());
}

#[test]
fn ecb_aes192_first_block() {
    let ctx = ctx(KEY_192, 192);
    let mut block: [u8; 16] = plaintext()[..16].try_into().unwrap();
    ctx.crypt_ecb(Direction::Encrypt, &mut block);
    assert_eq!(hex::encode(block), "bd334f1d6e45f25ff712a214571fa5cc");
}

#[test]
fn ecb_aes256_first_block() {
    let ctx = ctx(KEY_256, 256);
    let mut block: [u8; 16] = plaintext()[..16].try_into().unwrap();
    ctx.crypt_ecb(Direction::Encrypt, &mut block);
    assert_eq!(hex::encode(block), "f3eed1bdb5d2a03c064b5a7e3db181f8");
}

// === CBC ===

#[test]
fn cbc_aes128() {
    let ctx = ctx(KEY_128, 128);
    let mut iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
        .unwrap()
        .try_into()
        .unwrap();
    let mut data = plaintext();
    ctx.crypt_cbc(Direction::Encrypt, &mut iv, &mut data).unwrap();
    assert_eq!(
        hex::encode(&data),
        "7649abac8119b246cee98e9b12e9197d\
         5086cb9b507219ee95db113a917678b2\
         73bed6b8e3c1743b7116e69e22229516\
         3ff1caa1681fac09120eca307586e1a7"
    );
    // Chaining value after the last block is the final ciphertext block.
    assert_eq!(hex::encode(iv), "3ff1caa1681fac09120eca307586e1a7");
}

#[test]
fn cbc_aes128_decrypt() {
    let ctx = ctx(KEY_128, 128);
    let mut iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
        .unwrap()
        .try_into()
        .unwrap();
    let mut data = hex::decode(
        "7649abac8119b246cee98e9b12e9197d\
         5086cb9b507219ee95db113a917678b2\
         73bed6b8e3c1743b7116e69e22229516\
         3ff1caa1681fac09120eca307586e1a7",
    )
    .unwrap();
    ctx.crypt_cbc(Direction::Decrypt, &mut iv, &mut data).unwrap();
    assert_eq!(data, plaintext());
}

// === CFB-128 ===

#[test]
fn cfb128_aes128() {
    let ctx = ctx(KEY_128, 128);
    let mut iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
        .unwrap()
        .try_into()
        .unwrap();
    let mut off = 0usize;
    let mut data = plaintext();
    ctx.crypt_cfb128(Direction::Encrypt, &mut off, &mut iv, &mut data);
    assert_eq!(
        hex::encode(&data),
        "3b3fd92eb72dad20333449f8e83cfb4a\
         c8a64537a0b3a93fcde3cdad9f1ce58b\
         26751f67a3cbb140b1808cf187a4f4df\
         c04b05357c5d1c0eeac4c66f9ff7f2e6"
    );
    assert_eq!(off, 0);
}

#[test]
fn cfb128_aes128_decrypt() {
    let ctx = ctx(KEY_128, 128);
    let mut iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
        .unwrap()
        .try_into()
        .unwrap();
    let mut off = 0usize;
    let mut data = hex::decode(
        "3b3fd92eb72dad20333449f8e83cfb4a\
         c8a64537a0b3a93fcde3cdad9f1ce58b\
         26751f67a3cbb140b1808cf187a4f4df\
         c04b05357c5d1c0eeac4c66f9ff7f2e6",
    )
    .unwrap();
    ctx.crypt_cfb128(Direction::Decrypt, &mut off, &mut iv, &mut data);
    assert_eq!(data, plaintext());
}

// === CFB-8 ===

#[test]
fn cfb8_aes128() {
    let ctx = ctx(KEY_128, 128);
    let mut iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
        .unwrap()
        .try_into()
        .unwrap();
    let mut data = hex::decode("6bc1bee22e409f96e93d7e117393172aae2d").unwrap();
    ctx.crypt_cfb8(Direction::Encrypt, &mut iv, &mut data);
    assert_eq!(hex::encode(&data), "3b79424c9c0dd436bace9e0ed4586a4f32b9");
}

#[test]
fn cfb8_aes128_decrypt() {
    let ctx = ctx(KEY_128, 128);
    let mut iv: [u8; 16] = hex::decode("000102030405060708090a0b0c0d0e0f")
        .unwrap()
        .try_into()
        .unwrap();
    let mut data = hex::decode("3b79424c9c0dd436bace9e0ed4586a4f32b9").unwrap();
    ctx.crypt_cfb8(Direction::Decrypt, &mut iv, &mut data);
    assert_eq!(hex::encode(&data), "6bc1bee22e409f96e93d7e117393172aae2d");
}

// === CTR ===

#[test]
fn ctr_aes128() {
    let ctx = ctx(KEY_128, 128);
    let mut counter: [u8; 16] = hex::decode("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff")
        .unwrap()
        .try_into()
        .unwrap();
    let mut stream = [0u8; 16];
    let mut off = 0usize;
    let mut data = plaintext();
    ctx.crypt_ctr(&mut off, &mut counter, &mut stream, &mut data);
    assert_eq!(
        hex::encode(&data),
        "874d6191b620e3261bef6864990db6ce\
         9806f66b7970fdff8617187bb9fffdff\
         5ae4df3edbd5d35e5b4f09020db03eab\
         1e031dda2fbe03d1792170a0f3009cee"
    );
    // Four keystream blocks consumed.
    assert_eq!(hex::encode(counter), "f0f1f2f3f4f5f6f7f8f9fafbfcfdff03");
}

#[test]
fn ctr_aes128_decrypt_is_same_operation() {
    let ctx = ctx(KEY_128, 128);
    let mut counter: [u8; 16] = hex::decode("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff")
        .unwrap()
        .try_into()
        .unwrap();
    let mut stream = [0u8; 16];
    let mut off = 0usize;
    let mut data = hex::decode(
        "874d6191b620e3261bef6864990db6ce\
         9806f66b7970fdff8617187bb9fffdff\
         5ae4df3edbd5d35e5b4f09020db03eab\
         1e031dda2fbe03d1792170a0f3009cee",
    )
    .unwrap();
    ctx.crypt_ctr(&mut off, &mut counter, &mut stream, &mut data);
    assert_eq!(data, plaintext());
}

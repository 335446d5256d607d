//! Shared helpers for integration tests
//!
//! Includes an independent RFC 4226/6238 reference implementation built
//! directly on SHA-1, so generated codes are not only checked against the
//! library that produced them.

#![allow(dead_code)]

use sha1::{Digest, Sha1};
use totp_core::manager::CredentialManager;
use totp_core::otp::FixedClock;
use totp_core::store::MemoryStore;

pub const TEST_USER: &str = "__totp_test_user__";

const BLOCK_SIZE: usize = 64;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

/// HMAC-SHA1 following RFC 2104
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> [u8; 20] {
    let mut key_block = [0u8; BLOCK_SIZE];
    if key.len() > BLOCK_SIZE {
        key_block[..20].copy_from_slice(&Sha1::digest(key));
    } else {
        key_block[..key.len()].copy_from_slice(key);
    }

    let ipad_key: Vec<u8> = key_block.iter().map(|b| b ^ IPAD).collect();
    let opad_key: Vec<u8> = key_block.iter().map(|b| b ^ OPAD).collect();

    let mut inner = Sha1::new();
    inner.update(&ipad_key);
    inner.update(message);
    let inner_hash = inner.finalize();

    let mut outer = Sha1::new();
    outer.update(&opad_key);
    outer.update(inner_hash);

    let mut result = [0u8; 20];
    result.copy_from_slice(&outer.finalize());
    result
}

/// Reference six-digit TOTP for a base32 secret at `timestamp`
pub fn reference_totp(base32_secret: &str, timestamp: u64) -> String {
    let key = base32::decode(base32::Alphabet::RFC4648 { padding: false }, base32_secret)
        .expect("reference secret must be valid base32");

    let counter = (timestamp / 30).to_be_bytes();
    let hash = hmac_sha1(&key, &counter);

    // RFC 4226 dynamic truncation
    let offset = (hash[19] & 0x0f) as usize;
    let binary = ((hash[offset] as u32 & 0x7f) << 24)
        | ((hash[offset + 1] as u32) << 16)
        | ((hash[offset + 2] as u32) << 8)
        | (hash[offset + 3] as u32);

    format!("{:06}", binary % 1_000_000)
}

/// Manager over a fresh in-memory store, plus a handle to inspect it
pub fn memory_manager() -> (CredentialManager, MemoryStore) {
    let store = MemoryStore::new();
    let manager = CredentialManager::new(Box::new(store.clone()), TEST_USER)
        .expect("Failed to open in-memory credential manager");
    (manager, store)
}

/// Manager over `store` with the clock fixed at `timestamp`
pub fn manager_at(store: &MemoryStore, timestamp: u64) -> CredentialManager {
    CredentialManager::with_clock(
        Box::new(store.clone()),
        TEST_USER,
        Box::new(FixedClock(timestamp)),
    )
    .expect("Failed to open credential manager")
}

//! Fast non-cryptographic hashing.
//!
//! This module provides a MurmurHash3-family mix-and-fold hash in 32-bit
//! (x86_32 variant) and 64-bit (x64_128 variant, folded to its first word)
//! flavors, plus an identity [`std::hash::Hasher`] for maps keyed by values
//! that are already well-distributed integers.
//!
//! The hashers start from seed 1 and chain: each [`Hash32::update`] call
//! re-hashes the new bytes with the previous result as the seed, so feeding
//! data in several calls is deterministic but *not* equivalent to hashing
//! the concatenation in one call.
//!
//! These hashes are for tables, dedup keys, and content fingerprints only —
//! they offer no collision resistance against an adversary.
//!
//! # Example
//!
//! ```
//! use bufkit_core::hash::{Hash32, hash32};
//!
//! let mut hasher = Hash32::new();
//! hasher.update(b"Hello, World!");
//! assert_eq!(hasher.value(), hash32(b"Hello, World!"));
//! ```

/// Seed shared by both hash widths.
const HASH_SEED: u64 = 1;

#[inline(always)]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[inline(always)]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    let mut h1 = seed;

    let mut blocks = data.chunks_exact(4);
    for block in &mut blocks {
        let mut k1 = u32::from_le_bytes(block.try_into().unwrap());

        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);

        h1 ^= k1;
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u32;
        for (i, &byte) in tail.iter().enumerate() {
            k1 ^= u32::from(byte) << (i * 8);
        }
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(15);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    h1 ^= data.len() as u32;
    fmix32(h1)
}

fn murmur3_64(data: &[u8], seed: u64) -> u64 {
    const C1: u64 = 0x87c3_7b91_1142_53d5;
    const C2: u64 = 0x4cf5_ad43_2745_937f;

    let mut h1 = seed >> 32;
    let mut h2 = seed & 0xFFFF_FFFF;

    let mut blocks = data.chunks_exact(16);
    for block in &mut blocks {
        let mut k1 = u64::from_le_bytes(block[..8].try_into().unwrap());
        let mut k2 = u64::from_le_bytes(block[8..].try_into().unwrap());

        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;
        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    let tail = blocks.remainder();
    if tail.len() > 8 {
        let mut k2 = 0u64;
        for (i, &byte) in tail[8..].iter().enumerate() {
            k2 ^= u64::from(byte) << (i * 8);
        }
        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;
    }
    if !tail.is_empty() {
        let mut k1 = 0u64;
        for (i, &byte) in tail.iter().take(8).enumerate() {
            k1 ^= u64::from(byte) << (i * 8);
        }
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    h1 ^= data.len() as u64;
    h2 ^= data.len() as u64;

    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);

    h1 = fmix64(h1);
    h2 = fmix64(h2);

    // h2 would supply the second word of the 128-bit digest; folding keeps h1.
    h1.wrapping_add(h2)
}

/// Incremental 32-bit hasher.
///
/// Each `update` feeds the previous value back in as the seed.
#[derive(Debug, Clone)]
pub struct Hash32 {
    value: u32,
}

impl Hash32 {
    /// Create a hasher at the initial seed.
    pub fn new() -> Self {
        Self {
            value: HASH_SEED as u32,
        }
    }

    /// Chain more bytes into the hash.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.value = murmur3_32(data, self.value);
        self
    }

    /// The current hash value.
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Default for Hash32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental 64-bit hasher.
///
/// Each `update` feeds the previous value back in as the seed.
#[derive(Debug, Clone)]
pub struct Hash64 {
    value: u64,
}

impl Hash64 {
    /// Create a hasher at the initial seed.
    pub fn new() -> Self {
        Self { value: HASH_SEED }
    }

    /// Chain more bytes into the hash.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        self.value = murmur3_64(data, self.value);
        self
    }

    /// The current hash value.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Default for Hash64 {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a byte slice to 32 bits in one shot.
pub fn hash32(data: &[u8]) -> u32 {
    murmur3_32(data, HASH_SEED as u32)
}

/// Hash a byte slice to 64 bits in one shot.
pub fn hash64(data: &[u8]) -> u64 {
    murmur3_64(data, HASH_SEED)
}

/// A [`std::hash::Hasher`] that passes integer keys through unchanged.
///
/// For maps whose keys are already uniformly distributed (content hashes,
/// interned ids), re-mixing wastes cycles. Byte-slice keys fold their first
/// eight bytes little-endian.
#[derive(Debug, Default, Clone)]
pub struct IdentityHasher {
    value: u64,
}

impl std::hash::Hasher for IdentityHasher {
    fn finish(&self) -> u64 {
        self.value
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut folded = [0u8; 8];
        let count = bytes.len().min(8);
        folded[..count].copy_from_slice(&bytes[..count]);
        self.value = u64::from_le_bytes(folded);
    }

    fn write_u8(&mut self, value: u8) {
        self.value = u64::from(value);
    }

    fn write_u16(&mut self, value: u16) {
        self.value = u64::from(value);
    }

    fn write_u32(&mut self, value: u32) {
        self.value = u64::from(value);
    }

    fn write_u64(&mut self, value: u64) {
        self.value = value;
    }

    fn write_usize(&mut self, value: usize) {
        self.value = value as u64;
    }
}

/// `BuildHasher` alias for [`IdentityHasher`]-keyed maps.
pub type BuildIdentityHasher = std::hash::BuildHasherDefault<IdentityHasher>;

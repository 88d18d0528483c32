//! SHA-512 hashing and bit folding.
//!
//! Every mixing and extraction step in the pool is expressed in terms
//! of these helpers. The hash is fixed to SHA-512: block sizes elsewhere
//! in the crate assume a 64-byte digest.

use sha2::{Digest, Sha512};

/// Size in bytes of one SHA-512 digest, and of one pool block.
pub const DIGEST_LEN: usize = 64;

/// Size in bytes of one extracted block.
pub const BLOCK_LEN: usize = 16;

/// One SHA-512 output.
pub type Digest512 = [u8; DIGEST_LEN];

/// One extraction result: 128 bits folded down from a digest.
pub type Block = [u8; BLOCK_LEN];

/// Hashes the concatenation of `parts` with SHA-512.
///
/// Feeding the parts to one hasher is equivalent to hashing
/// `parts[0] ++ parts[1] ++ ...` and avoids building the joined buffer.
pub fn sha512(parts: &[&[u8]]) -> Digest512 {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&result);
    digest
}

/// XORs the first half of `msg` against the second half.
///
/// Works on 32-bit big-endian words in principle, but XOR is bytewise so
/// the word view only matters for the length: `N` must be a multiple of 8.
fn fold_half<const N: usize, const H: usize>(msg: &[u8; N]) -> [u8; H] {
    debug_assert_eq!(N, H * 2);
    let mut out = [0u8; H];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = msg[i] ^ msg[i + H];
    }
    out
}

/// Folds a 64-byte digest twice, down to 16 bytes.
pub fn fold_digest(digest: &Digest512) -> Block {
    let half: [u8; 32] = fold_half(digest);
    fold_half(&half)
}

/// Reads a block as a float in `[0.0, 1.0)` with 53-bit precision.
///
/// Uses the top 53 bits of the first big-endian `u64`.
pub fn block_to_float(block: &Block) -> f64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&block[..8]);
    let bits = u64::from_be_bytes(head) >> 11;
    bits as f64 / (1u64 << 53) as f64
}

/// Reads a block as a 128-bit big-endian unsigned integer.
#[inline]
pub fn block_to_u128(block: &Block) -> u128 {
    u128::from_be_bytes(*block)
}

/// Lowercase hex encoding of a block (32 characters).
pub fn block_to_hex(block: &Block) -> String {
    block.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Splits a block into four big-endian 32-bit words.
pub fn block_to_words(block: &Block) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

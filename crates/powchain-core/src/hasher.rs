//! Byte serialization and the block digest.
//!
//! Fields are concatenated without separators or length prefixes before hashing, so the
//! encoding is not injective: `("ab", "c")` and `("a", "bc")` produce the same preimage.
//! Hash values depend on this exact layout and must not change.

use crate::Hash;
use sha2::{Digest, Sha256};

/// A 256-bit digest over an ordered list of byte fields.
pub trait Hasher {
    fn digest(&self, fields: &[&[u8]]) -> Hash;
}

/// SHA-256 over the plain concatenation of all fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn digest(&self, fields: &[&[u8]]) -> Hash {
        digest(fields)
    }
}

pub fn digest(fields: &[&[u8]]) -> Hash {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest[..]);
    out
}

/// Lowercase base-16 text without prefix or padding; negative values get a leading `-`.
pub fn encode_integer(n: impl Into<i128>) -> Vec<u8> {
    let n: i128 = n.into();
    if n < 0 {
        format!("-{:x}", n.unsigned_abs()).into_bytes()
    } else {
        format!("{n:x}").into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_integer_examples() {
        assert_eq!(encode_integer(0u64), b"0");
        assert_eq!(encode_integer(17u32), b"11");
        assert_eq!(encode_integer(255u64), b"ff");
        assert_eq!(encode_integer(-26i64), b"-1a");
        assert_eq!(encode_integer(1_600_000_000i64), b"5f5e1000");
        assert_eq!(encode_integer(i64::MAX), b"7fffffffffffffff");
        assert_eq!(encode_integer(i64::MIN), b"-8000000000000000");
    }

    #[test]
    fn encode_integer_is_width_independent() {
        assert_eq!(encode_integer(42u32), encode_integer(42i64));
        assert_eq!(encode_integer(42u64), encode_integer(42i64));
    }

    #[test]
    fn digest_matches_sha256_of_concatenation() {
        let joined = digest(&[b"abc".as_slice()]);
        assert_eq!(
            hex::encode(joined),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest(&[b"a".as_slice(), b"b", b"c"]), joined);
        assert_eq!(digest(&[b"".as_slice(), b"abc", b""]), joined);
    }

    #[test]
    fn digest_of_nothing_is_empty_string_hash() {
        assert_eq!(
            hex::encode(digest(&[])),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_hasher_delegates() {
        let fields: [&[u8]; 2] = [b"prev", b"data"];
        assert_eq!(Sha256Hasher.digest(&fields), digest(&fields));
    }
}

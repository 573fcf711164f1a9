pub const BYTE: usize = 8;
pub const HASH_SIZE: usize = 32;
pub const HASH_BITS: u32 = (HASH_SIZE * BYTE) as u32;
pub const HASH_HEX_SIZE: usize = HASH_SIZE * 2;
pub const DEFAULT_DIFFICULTY: u32 = 17;
/// Exclusive upper bound of the nonce search.
pub const MAX_NONCE: u64 = i64::MAX as u64;
pub const GENESIS_DATA: &[u8] = b"Genesis Block";

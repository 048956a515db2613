use crate::address::TreeIndex;
use crate::fors::ForsParams;
use hybrid_array::{typenum::Unsigned, Array, ArraySize};
use subtle::ConstantTimeEq;

// Algorithm 3
pub fn base_2b<OutLen: ArraySize, B: Unsigned>(x: &[u8]) -> Array<u16, OutLen> {
    debug_assert!(x.len() >= (OutLen::USIZE * B::USIZE + 7) / 8);
    debug_assert!(B::USIZE <= 16);

    let mut bits = 0usize;
    let mut i = 0;
    let mut total = 0usize;

    Array::<u16, OutLen>::from_fn(|_: usize| {
        while bits < B::USIZE {
            total = (total << 8) + x[i] as usize;
            bits += 8;
            i += 1;
        }
        bits -= B::USIZE;
        let out = (total >> bits) & ((1 << B::U8) - 1);
        total &= (1 << bits) - 1; // Deviation from spec pseudocode - clear used component to prevent usize overflow
        out.try_into().expect("B is less than 16")
    })
}

/// Interprets a big-endian byte slice as an unsigned integer. FIPS-205's `toInt`.
pub(crate) fn to_int(x: &[u8]) -> u64 {
    debug_assert!(x.len() <= 8);
    let mut buf = [0u8; 8];
    buf[8 - x.len()..].copy_from_slice(x);
    u64::from_be_bytes(buf)
}

/// Encodes an unsigned integer into `out` as a big-endian byte string. FIPS-205's `toByte`.
pub(crate) fn to_byte(x: u64, out: &mut [u8]) {
    debug_assert!(out.len() <= 8);
    let full = x.to_be_bytes();
    out.copy_from_slice(&full[8 - out.len()..]);
}

/// Constant-time equality over two equal-length byte slices.
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    bool::from(a.ct_eq(b))
}

/// Constant-time check that every byte in `bytes` is zero.
///
/// FIPS-205 forbids all-zero `SK.seed`/`SK.prf`/`PK.seed`/`PK.root`; this is used
/// to reject such keys on generation and on import.
pub(crate) fn is_all_zero(bytes: &[u8]) -> bool {
    let or = bytes.iter().fold(0u8, |acc, &b| acc | b);
    bool::from(or.ct_eq(&0))
}

/// Separates the digest into the FORS message, the Xmss tree index, and the Xmss leaf index.
pub fn split_digest<P: ForsParams>(
    digest: &Array<u8, P::M>,
) -> (&Array<u8, P::MD>, TreeIndex, u32) {
    #[allow(deprecated)]
    let m = Array::from_slice(&digest[..P::MD::USIZE]);
    let idx_tree_size = (P::H::USIZE - P::HPrime::USIZE).div_ceil(8);
    let idx_leaf_size = P::HPrime::USIZE.div_ceil(8);

    let idx_tree_bytes = &digest[P::MD::USIZE..P::MD::USIZE + idx_tree_size];
    let mut idx_leaf_bytes = [0u8; 4];
    idx_leaf_bytes[4 - idx_leaf_size..].copy_from_slice(
        &digest[P::MD::USIZE + idx_tree_size..P::MD::USIZE + idx_tree_size + idx_leaf_size],
    );

    let idx_tree = TreeIndex::from_be_slice(idx_tree_bytes).residue(P::H::U32 - P::HPrime::U32);
    let idx_leaf = u32::from_be_bytes(idx_leaf_bytes) & ((1 << P::HPrime::USIZE) - 1);
    (m, idx_tree, idx_leaf)
}

//! Hash address definitions and serialization
//!
//!  From FIPS-205 section 4.2:
//! > An ADRS
//! > consists of public values that indicate the position of the value being computed by the function. A
//! > different ADRS value is used for each call to each function. In the case of PRF, this is in order
//! > to generate a large number of different secret values from a single seed. In the case of Tℓ, H, and
//! > F, it is used to mitigate multi-target attacks.
//!
//! Address fields are big-endian integers. We use zero-copyable structs to represent the addresses
//! and serialize transparently to bytes using the `zerocopy` crate.
//!
//! The tree address occupies the full three big-endian words FIPS-205 allots it
//! (`tree_adrs_hi`/`tree_adrs_mid`/`tree_adrs_lo`), rather than the 64 meaningful bits that
//! suffice for every parameter set defined in section 6 today.
//!
//! Rather than implementing a generic `setTypeAndClear` as specified in FIPS-205, we define specific transitions for those
//! address conversions which are actually used.

use hybrid_array::Array;
use typenum::U22;

use zerocopy::byteorder::big_endian::{U32, U64};
use zerocopy::AsBytes;

/// A 96-bit tree index, wide enough for the `tree` address field in every FIPS-205
/// parameter set.
///
/// None of the twelve parameter sets in section 6 need more than 64 bits here, but the field
/// is specified as three 32-bit words, so we keep it exact rather than folding it into a `u64`
/// and hoping no future parameter set needs the headroom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TreeIndex {
    hi: u32,
    mid: u32,
    lo: u32,
}

impl TreeIndex {
    /// Parses a big-endian byte slice of at most 12 bytes into a `TreeIndex`, right-aligned.
    pub(crate) fn from_be_slice(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= 12);
        let mut buf = [0u8; 12];
        buf[12 - bytes.len()..].copy_from_slice(bytes);
        Self {
            hi: u32::from_be_bytes(buf[0..4].try_into().expect("4 bytes")),
            mid: u32::from_be_bytes(buf[4..8].try_into().expect("4 bytes")),
            lo: u32::from_be_bytes(buf[8..12].try_into().expect("4 bytes")),
        }
    }

    fn to_u128(self) -> u128 {
        (u128::from(self.hi) << 64) | (u128::from(self.mid) << 32) | u128::from(self.lo)
    }

    fn from_u128(v: u128) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self {
            hi: (v >> 64) as u32,
            mid: (v >> 32) as u32,
            lo: v as u32,
        }
    }

    /// The low `h` bits of the value, for `h <= 96`. FIPS-205's `residue(h)`.
    pub(crate) fn residue(self, h: u32) -> Self {
        if h >= 96 {
            return self;
        }
        Self::from_u128(self.to_u128() & ((1u128 << h) - 1))
    }

    /// The value shifted right by `h` bits, for `h <= 96`. FIPS-205's `remove_bits(h)`.
    pub(crate) fn remove_bits(self, h: u32) -> Self {
        if h >= 96 {
            return Self::default();
        }
        Self::from_u128(self.to_u128() >> h)
    }

    /// The least-significant `bits` bits of the value as a `u32`. `bits` must be `<= 32`.
    pub(crate) fn low_u32(self, bits: u32) -> u32 {
        debug_assert!(bits <= 32);
        if bits == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let out = (self.to_u128() & ((1u128 << bits) - 1)) as u32;
        out
    }
}

/// `Address` represents a hash address as defined by FIPS-205 section 4.2
pub trait Address: AsRef<[u8]> {
    const TYPE_CONST: u32;

    #[allow(clippy::doc_markdown)] // False positive
    /// Returns the address as a compressed 22-byte array
    /// ADRSc = ADRS[3] ∥ ADRS[8 : 16] ∥ ADRS[19] ∥ ADRS[20 : 32]
    fn compressed(&self) -> Array<u8, U22> {
        let bytes = self.as_ref();
        let mut compressed = Array::<u8, U22>::default();
        compressed[0] = bytes[3];
        compressed[1..9].copy_from_slice(&bytes[8..16]);
        compressed[9] = bytes[19];
        compressed[10..22].copy_from_slice(&bytes[20..32]);
        compressed
    }
}

macro_rules! set_tree {
    ($name:ident) => {
        impl $name {
            /// Writes a `TreeIndex` into this address's three tree words.
            pub(crate) fn set_tree(&mut self, idx: TreeIndex) {
                self.tree_adrs_hi = idx.hi.into();
                self.tree_adrs_mid = idx.mid.into();
                self.tree_adrs_lo = idx.lo.into();
            }
        }
    };
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct WotsHash {
    pub layer_adrs: U32,
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 0
    pub key_pair_adrs: U32,
    pub chain_adrs: U32,
    pub hash_adrs: U32,
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct WotsPk {
    pub layer_adrs: U32,
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 1
    pub key_pair_adrs: U32,
    padding: U64, // 0
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct HashTree {
    pub layer_adrs: U32,
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 2
    padding: U32,    // 0
    pub tree_height: U32,
    pub tree_index: U32,
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct ForsTree {
    layer_adrs: U32, // 0
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 3
    pub key_pair_adrs: U32,
    pub tree_height: U32,
    pub tree_index: U32,
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct ForsRoots {
    layer_adrs: U32, // 0
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 4
    pub key_pair_adrs: U32,
    padding: U64, // 0
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct WotsPrf {
    pub layer_adrs: U32,
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 5
    pub key_pair_adrs: U32,
    pub chain_adrs: U32,
    hash_adrs: U32, // 0
}

#[derive(Clone, AsBytes)]
#[repr(C)]
pub struct ForsPrf {
    layer_adrs: U32, // 0
    pub(crate) tree_adrs_hi: U32,
    pub(crate) tree_adrs_mid: U32,
    pub(crate) tree_adrs_lo: U32,
    type_const: U32, // 6
    pub key_pair_adrs: U32,
    tree_height: U32, // 0
    pub tree_index: U32,
}

set_tree!(WotsHash);
set_tree!(WotsPk);
set_tree!(HashTree);
set_tree!(ForsTree);
set_tree!(ForsRoots);
set_tree!(WotsPrf);
set_tree!(ForsPrf);

impl Address for WotsHash {
    const TYPE_CONST: u32 = 0;
}
impl AsRef<[u8]> for WotsHash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Address for WotsPk {
    const TYPE_CONST: u32 = 1;
}
impl AsRef<[u8]> for WotsPk {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Address for HashTree {
    const TYPE_CONST: u32 = 2;
}
impl AsRef<[u8]> for HashTree {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Address for ForsTree {
    const TYPE_CONST: u32 = 3;
}
impl AsRef<[u8]> for ForsTree {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Address for ForsRoots {
    const TYPE_CONST: u32 = 4;
}
impl AsRef<[u8]> for ForsRoots {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Address for WotsPrf {
    const TYPE_CONST: u32 = 5;
}
impl AsRef<[u8]> for WotsPrf {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Address for ForsPrf {
    const TYPE_CONST: u32 = 6;
}
impl AsRef<[u8]> for ForsPrf {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl WotsHash {
    pub fn prf_adrs(&self) -> WotsPrf {
        WotsPrf {
            layer_adrs: self.layer_adrs,
            tree_adrs_hi: self.tree_adrs_hi,
            tree_adrs_mid: self.tree_adrs_mid,
            tree_adrs_lo: self.tree_adrs_lo,
            type_const: WotsPrf::TYPE_CONST.into(),
            key_pair_adrs: self.key_pair_adrs,
            chain_adrs: 0.into(),
            hash_adrs: 0.into(),
        }
    }

    pub fn pk_adrs(&self) -> WotsPk {
        WotsPk {
            layer_adrs: self.layer_adrs,
            tree_adrs_hi: self.tree_adrs_hi,
            tree_adrs_mid: self.tree_adrs_mid,
            tree_adrs_lo: self.tree_adrs_lo,
            type_const: WotsPk::TYPE_CONST.into(),
            key_pair_adrs: self.key_pair_adrs,
            padding: 0.into(),
        }
    }

    pub fn tree_adrs(&self) -> HashTree {
        HashTree {
            layer_adrs: self.layer_adrs,
            tree_adrs_hi: self.tree_adrs_hi,
            tree_adrs_mid: self.tree_adrs_mid,
            tree_adrs_lo: self.tree_adrs_lo,
            type_const: HashTree::TYPE_CONST.into(),
            padding: 0.into(),
            tree_height: 0.into(),
            tree_index: 0.into(),
        }
    }
}

impl ForsTree {
    pub(crate) fn new(tree_index: TreeIndex, key_pair_adrs: u32) -> ForsTree {
        let mut adrs = ForsTree {
            layer_adrs: 0.into(),
            tree_adrs_hi: 0.into(),
            tree_adrs_mid: 0.into(),
            tree_adrs_lo: 0.into(),
            type_const: ForsTree::TYPE_CONST.into(),
            key_pair_adrs: key_pair_adrs.into(),
            tree_height: 0.into(),
            tree_index: 0.into(),
        };
        adrs.set_tree(tree_index);
        adrs
    }

    pub fn prf_adrs(&self) -> ForsPrf {
        ForsPrf {
            layer_adrs: 0.into(),
            tree_adrs_hi: self.tree_adrs_hi,
            tree_adrs_mid: self.tree_adrs_mid,
            tree_adrs_lo: self.tree_adrs_lo,
            type_const: ForsPrf::TYPE_CONST.into(),
            key_pair_adrs: self.key_pair_adrs,
            tree_height: 0.into(),
            tree_index: self.tree_index,
        }
    }

    pub fn fors_roots(&self) -> ForsRoots {
        ForsRoots {
            layer_adrs: 0.into(),
            tree_adrs_hi: self.tree_adrs_hi,
            tree_adrs_mid: self.tree_adrs_mid,
            tree_adrs_lo: self.tree_adrs_lo,
            type_const: ForsRoots::TYPE_CONST.into(),
            key_pair_adrs: self.key_pair_adrs,
            padding: 0.into(),
        }
    }
}

impl Default for WotsHash {
    fn default() -> Self {
        WotsHash {
            layer_adrs: 0.into(),
            tree_adrs_hi: 0.into(),
            tree_adrs_mid: 0.into(),
            tree_adrs_lo: 0.into(),
            type_const: 0.into(),
            key_pair_adrs: 0.into(),
            chain_adrs: 0.into(),
            hash_adrs: 0.into(),
        }
    }
}

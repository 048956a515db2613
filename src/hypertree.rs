use crate::signing_key::SkSeed;
use core::fmt::Debug;
use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

use crate::{
    address::{TreeIndex, WotsHash},
    util::ct_eq,
    xmss::{XmssParams, XmssSig},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HypertreeSig<P: HypertreeParams>(Array<XmssSig<P>, P::D>);

impl<P: HypertreeParams> HypertreeSig<P> {
    pub const SIZE: usize = XmssSig::<P>::SIZE * P::D::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(
            buf.len() == Self::SIZE,
            "HT serialize length mismatch: {}, {}",
            buf.len(),
            Self::SIZE
        );

        buf.chunks_exact_mut(XmssSig::<P>::SIZE)
            .zip(self.0.iter())
            .for_each(|(buf, sig)| sig.write_to(buf));
    }

    #[cfg(feature = "alloc")]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = vec![0u8; Self::SIZE];
        self.write_to(&mut buf);
        buf
    }
}

impl<P: HypertreeParams> TryFrom<&[u8]> for HypertreeSig<P> {
    type Error = crate::error::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            return Err(crate::error::Error::InvalidLength);
        }
        let sig = value
            .chunks(XmssSig::<P>::SIZE)
            .map(XmssSig::try_from)
            .collect::<Result<_, _>>()?;
        Ok(HypertreeSig(sig))
    }
}

pub trait HypertreeParams: XmssParams + Sized {
    type D: ArraySize + Debug + Eq;
    type H: ArraySize; // HPrime * D

    fn ht_sign(
        &self,
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        mut idx_tree: TreeIndex,
        mut idx_leaf: u32,
    ) -> HypertreeSig<Self> {
        let mut adrs = WotsHash::default();
        adrs.set_tree(idx_tree);

        // Pre-allocate the array - Option should have no overhead after optimization
        let mut sig = Array::<_, Self::D>::default();

        sig[0] = Some(self.xmss_sign(m, sk_seed, idx_leaf, &adrs));
        let mut root = self.xmss_pk_from_sig(idx_leaf, sig[0].as_ref().unwrap(), m, &adrs);

        for j in 1..Self::D::U32 {
            // H' least significant bits of idx_leaf. H' is always less than 32 in FIPS-205 parameter sets
            idx_leaf = idx_tree.low_u32(Self::HPrime::U32);
            idx_tree = idx_tree.remove_bits(Self::HPrime::U32);

            adrs.layer_adrs.set(j);
            adrs.set_tree(idx_tree);

            sig[j as usize] = Some(self.xmss_sign(&root, sk_seed, idx_leaf, &adrs));
            if j != Self::D::U32 - 1 {
                root = self.xmss_pk_from_sig(
                    idx_leaf,
                    sig[j as usize].as_ref().unwrap(),
                    &root,
                    &adrs,
                );
            }
        }
        // TODO: Validate that these clones get optimized away
        HypertreeSig(sig.iter().cloned().map(Option::unwrap).collect())
    }

    fn ht_verify(
        &self,
        m: &Array<u8, Self::N>,
        sig: &HypertreeSig<Self>,
        mut idx_tree: TreeIndex,
        mut idx_leaf: u32,
        pk_root: &Array<u8, Self::N>,
    ) -> bool {
        let mut adrs = WotsHash::default();
        adrs.set_tree(idx_tree);

        let mut root = self.xmss_pk_from_sig(idx_leaf, &sig.0[0], m, &adrs);

        for j in 1..Self::D::U32 {
            // H' least significant bits of idx_leaf. H' is always less than 32 in FIPS-205 parameter sets
            idx_leaf = idx_tree.low_u32(Self::HPrime::U32);
            idx_tree = idx_tree.remove_bits(Self::HPrime::U32);

            adrs.layer_adrs.set(j);
            adrs.set_tree(idx_tree);

            root = self.xmss_pk_from_sig(idx_leaf, &sig.0[j as usize], &root, &adrs);
        }
        ct_eq(root.as_slice(), pk_root.as_slice())
    }
}

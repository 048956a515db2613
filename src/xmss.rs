use core::fmt::Debug;

use hybrid_array::{Array, ArraySize};
use typenum::Unsigned;

use crate::address::WotsHash;
use crate::wots::{WotsParams, WotsSig};
use crate::SkSeed;

/// An XMSS signature: one WOTS+ signature plus the authentication path to the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmssSig<P: XmssParams> {
    pub(crate) sig: WotsSig<P>,
    pub(crate) auth: Array<Array<u8, P::N>, P::HPrime>,
}

impl<P: XmssParams> XmssSig<P> {
    pub const SIZE: usize = WotsSig::<P>::SIZE + P::HPrime::USIZE * P::N::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() == Self::SIZE, "XMSS serialize length mismatch");

        let (sig_buf, auth_buf) = buf.split_at_mut(WotsSig::<P>::SIZE);
        self.sig.write_to(sig_buf);
        auth_buf
            .chunks_exact_mut(P::N::USIZE)
            .zip(self.auth.iter())
            .for_each(|(buf, node)| buf.copy_from_slice(node.as_slice()));
    }
}

impl<P: XmssParams> TryFrom<&[u8]> for XmssSig<P> {
    type Error = crate::error::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            return Err(crate::error::Error::InvalidLength);
        }
        let (sig_bytes, auth_bytes) = value.split_at(WotsSig::<P>::SIZE);
        let sig = WotsSig::try_from(sig_bytes)?;
        let mut auth = Array::<Array<u8, P::N>, P::HPrime>::default();
        for (i, chunk) in auth_bytes.chunks_exact(P::N::USIZE).enumerate() {
            auth[i].copy_from_slice(chunk);
        }
        Ok(XmssSig { sig, auth })
    }
}

/// XMSS: a fixed-height Merkle tree of WOTS+ key pairs, per FIPS-205 section 6.
pub(crate) trait XmssParams: WotsParams + Sized {
    /// Height of a single XMSS tree.
    type HPrime: ArraySize + Debug + Eq;

    /// Algorithm 9: computes the root of the subtree of height `z` rooted at node `i`.
    fn xmss_node(
        &self,
        sk_seed: &SkSeed<Self::N>,
        i: u32,
        z: u32,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        debug_assert!(z <= Self::HPrime::U32);

        if z == 0 {
            let mut adrs = adrs.clone();
            adrs.key_pair_adrs.set(i);
            self.wots_pk_gen(sk_seed, &adrs)
        } else {
            let lnode = self.xmss_node(sk_seed, 2 * i, z - 1, adrs);
            let rnode = self.xmss_node(sk_seed, 2 * i + 1, z - 1, adrs);
            let mut tree_adrs = adrs.tree_adrs();
            tree_adrs.tree_height.set(z);
            tree_adrs.tree_index.set(i);
            self.h(&tree_adrs, &lnode, &rnode)
        }
    }

    /// Algorithm 10: signs `m` under leaf `idx` of the XMSS tree.
    fn xmss_sign(
        &self,
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        idx: u32,
        adrs: &WotsHash,
    ) -> XmssSig<Self> {
        let auth = Array::<Array<u8, Self::N>, Self::HPrime>::from_fn(|j| {
            let j: u32 = j.try_into().expect("HPrime is less than 2^32");
            let k = (idx >> j) ^ 1;
            self.xmss_node(sk_seed, k, j, adrs)
        });

        let mut wots_adrs = adrs.clone();
        wots_adrs.key_pair_adrs.set(idx);
        let sig = self.wots_sign(m, sk_seed, &wots_adrs);

        XmssSig { sig, auth }
    }

    /// Algorithm 11: recomputes the XMSS root from a signature.
    fn xmss_pk_from_sig(
        &self,
        idx: u32,
        sig: &XmssSig<Self>,
        m: &Array<u8, Self::N>,
        adrs: &WotsHash,
    ) -> Array<u8, Self::N> {
        let mut wots_adrs = adrs.clone();
        wots_adrs.key_pair_adrs.set(idx);
        let mut node = self.wots_pk_from_sig(&sig.sig, m, &wots_adrs);

        let mut tree_adrs = adrs.tree_adrs();
        for k in 0..Self::HPrime::U32 {
            tree_adrs.tree_height.set(k + 1);
            tree_adrs.tree_index.set(idx >> (k + 1));
            if (idx >> k) & 1 == 0 {
                node = self.h(&tree_adrs, &node, &sig.auth[k as usize]);
            } else {
                node = self.h(&tree_adrs, &sig.auth[k as usize], &node);
            }
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{util::macros::test_parameter_sets, PkSeed};
    use hybrid_array::Array;
    use rand::{thread_rng, Rng};

    fn test_xmss_sign_verify<Xmss: XmssParams>() {
        let mut rng = thread_rng();

        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);
        let suite = Xmss::new_from_pk_seed(&pk_seed);

        let mut m = Array::<u8, Xmss::N>::default();
        rng.fill(m.as_mut_slice());

        let adrs = WotsHash::default();
        let idx = rng.gen_range(0..(1u32 << Xmss::HPrime::USIZE));

        let root = suite.xmss_node(&sk_seed, 0, Xmss::HPrime::U32, &adrs);
        let sig = suite.xmss_sign(&m, &sk_seed, idx, &adrs);
        let recovered = suite.xmss_pk_from_sig(idx, &sig, &m, &adrs);

        assert_eq!(root, recovered);
    }

    test_parameter_sets!(test_xmss_sign_verify);

    fn test_xmss_sign_verify_fail<Xmss: XmssParams>() {
        let mut rng = thread_rng();

        let sk_seed = SkSeed::new(&mut rng);
        let pk_seed = PkSeed::new(&mut rng);
        let suite = Xmss::new_from_pk_seed(&pk_seed);

        let mut m = Array::<u8, Xmss::N>::default();
        rng.fill(m.as_mut_slice());

        let adrs = WotsHash::default();
        let idx = rng.gen_range(0..(1u32 << Xmss::HPrime::USIZE));

        let root = suite.xmss_node(&sk_seed, 0, Xmss::HPrime::U32, &adrs);
        let sig = suite.xmss_sign(&m, &sk_seed, idx, &adrs);

        m[0] ^= 0xff;
        let recovered = suite.xmss_pk_from_sig(idx, &sig, &m, &adrs);

        assert_ne!(
            root, recovered,
            "XMSS root recovery should fail for a tweaked message"
        );
    }

    test_parameter_sets!(test_xmss_sign_verify_fail);
}

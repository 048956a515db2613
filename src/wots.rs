use hybrid_array::{Array, ArraySize};
use typenum::generic_const_mappings::U;
use typenum::Unsigned;

use crate::hashes::HashSuite;
use crate::util::base_2b;
use crate::{address, SkSeed};
use core::fmt::Debug;

// WOTS+ in general is parameterized on these values
// But the FIPS standard uses the same values for all parameter sets
// So we make these global consts for simplicity
const LOG_W: usize = 4;
const W: u32 = 16;
const CK_LEN: usize = 3; // Length of a checksum in chunks

/// Number of bits the checksum is left-shifted before being split into `CK_LEN` base-`W` digits,
/// so the checksum's least-significant bit lands on a digit boundary. Algorithm 6 computes this
/// as `(8 - (len2 * lg_w) % 8) % 8`; for the FIPS-205 parameter sets (`lg_w = 4`, `len2 = 3`)
/// it is always 4, but we compute it rather than hardcode it.
const fn csum_shift() -> u32 {
    ((8 - (CK_LEN * LOG_W) % 8) % 8) as u32
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WotsSig<P: WotsParams>(Array<Array<u8, P::N>, P::WotsSigLen>);

impl<P: WotsParams> WotsSig<P> {
    pub const SIZE: usize = P::N::USIZE * P::WotsSigLen::USIZE;

    pub fn write_to(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() == Self::SIZE, "WOTS+ serialize length mismatch");

        buf.chunks_exact_mut(P::N::USIZE)
            .zip(self.0.iter())
            .for_each(|(buf, sig)| buf.copy_from_slice(sig.as_slice()));
    }

    #[cfg(feature = "alloc")]
    #[cfg(test)]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut vec = vec![0u8; Self::SIZE];
        self.write_to(&mut vec);
        vec
    }
}

impl<P: WotsParams> TryFrom<&[u8]> for WotsSig<P> {
    type Error = crate::error::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != Self::SIZE {
            return Err(crate::error::Error::InvalidLength);
        }
        let mut sig = Array::<Array<u8, P::N>, P::WotsSigLen>::default();
        for i in 0..P::WotsSigLen::USIZE {
            sig[i].copy_from_slice(&value[i * P::N::USIZE..(i + 1) * P::N::USIZE]);
        }
        Ok(WotsSig(sig))
    }
}

pub(crate) trait WotsParams: HashSuite {
    type WotsMsgLen: ArraySize; // Number of chunks in a WOTS message. Must equal 2 * Self::N
    type WotsSigLen: ArraySize + Debug + Eq; // Number of chunks in a WOTS signature. Must equal WotsSigLen + CK_LEN;

    /// Algorithm 4
    fn wots_chain(
        &self,
        x: &Array<u8, Self::N>,
        i: u32,
        s: u32,
        adrs: &address::WotsHash,
    ) -> Array<u8, Self::N> {
        debug_assert!(i + s < 1 << LOG_W, "Invalid wots_chain index");

        let mut tmp = x.clone();
        let mut adrs = adrs.clone();
        for j in i..(i + s) {
            adrs.hash_adrs.set(j);
            tmp = self.f(&adrs, &tmp);
        }
        tmp
    }

    /// Algorithm 5
    fn wots_pk_gen(
        &self,
        sk_seed: &SkSeed<Self::N>,
        adrs: &address::WotsHash,
    ) -> Array<u8, Self::N> {
        let mut adrs = adrs.clone();
        let mut sk_adrs = adrs.prf_adrs();

        let tmp = Array::<Array<u8, Self::N>, Self::WotsSigLen>::from_fn(|i: usize| {
            let i: u32 = i.try_into().expect("i is less than 2^32");
            sk_adrs.chain_adrs.set(i);
            adrs.chain_adrs.set(i);
            let sk = self.prf_sk(sk_seed, &sk_adrs);
            self.wots_chain(&sk, 0, (1 << LOG_W) - 1, &adrs)
        });
        let pk_adrs = adrs.pk_adrs();
        self.t(&pk_adrs, &tmp)
    }

    // Algorithm 6
    fn wots_sign(
        &self,
        m: &Array<u8, Self::N>,
        sk_seed: &SkSeed<Self::N>,
        adrs: &address::WotsHash,
    ) -> WotsSig<Self> {
        let msg = base_2b::<Self::WotsMsgLen, U<LOG_W>>(m.as_slice());
        let csum = msg.iter().map(|&x| (1 << LOG_W) - 1 - x).sum::<u16>() << csum_shift(); // Algorithm 6 Line 9

        let csum_bytes = csum.to_be_bytes();
        let csum_chunks = base_2b::<U<CK_LEN>, U<LOG_W>>(&csum_bytes);
        let mut msg_csum = msg.iter().chain(csum_chunks.iter());

        let mut adrs = adrs.clone();
        let mut sk_adrs = adrs.prf_adrs();

        let sig = Array::<Array<u8, Self::N>, Self::WotsSigLen>::from_fn(|i: usize| {
            let i: u32 = i.try_into().expect("i is less than 2^32");
            sk_adrs.chain_adrs.set(i);
            adrs.chain_adrs.set(i);

            let sk = self.prf_sk(sk_seed, &sk_adrs);
            self.wots_chain(&sk, 0, u32::from(*msg_csum.next().unwrap()), &adrs)
        });

        WotsSig(sig)
    }

    fn wots_pk_from_sig(
        &self,
        sig: &WotsSig<Self>,
        m: &Array<u8, Self::N>,
        adrs: &address::WotsHash,
    ) -> Array<u8, Self::N> {
        let msg = base_2b::<Self::WotsMsgLen, U<LOG_W>>(m.as_slice());
        let csum = msg.iter().map(|&x| (1 << LOG_W) - 1 - x).sum::<u16>() << csum_shift();
        let csum_bytes = csum.to_be_bytes();
        let csum_chunks = base_2b::<U<CK_LEN>, U<LOG_W>>(&csum_bytes);
        let mut msg_csum = msg.iter().chain(csum_chunks.iter());

        let mut adrs = adrs.clone();
        let tmp = Array::<Array<u8, Self::N>, Self::WotsSigLen>::from_fn(|i: usize| {
            adrs.chain_adrs
                .set(i.try_into().expect("i is less than 2^32"));
            let msg_i = u32::from(*msg_csum.next().unwrap());
            self.wots_chain(&sig.0[i], msg_i, W - 1 - msg_i, &adrs)
        });
        self.t(&adrs.pk_adrs(), &tmp)
    }
}

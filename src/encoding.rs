//! The pre-hash message encoding from FIPS-205 section 10.2.2 (`HashSLH-DSA`).
//!
//! The "pure" encoding (`0x00 || ctx_len || ctx || M`) lives next to
//! [`crate::SigningKey::try_sign_with_context`] and
//! [`crate::VerifyingKey::try_verify_with_context`]; this module supplies the
//! sibling pre-hash encoding `0x01 || ctx_len || ctx || OID(PH) || PH(M)`, where
//! `PH` is one of the four hash functions FIPS-205 lists for this mode.

use digest::{Digest, ExtendableOutput, Update};
use sha2::{Sha256, Sha512};
use sha3::{Shake128, Shake256};

use crate::Error;

/// The largest pre-hash digest among the supported functions (SHA-512/SHAKE-256, 64 bytes).
pub(crate) const MAX_PH_OUTPUT_LEN: usize = 64;

/// An 11-byte ASN.1 DER object identifier, as listed in FIPS-205 section 10.2.2.
type Oid = [u8; 11];

const OID_SHA256: Oid = [0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01];
const OID_SHA512: Oid = [0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03];
const OID_SHAKE128: Oid = [0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x0B];
const OID_SHAKE256: Oid = [0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x0C];

/// One of the pre-hash functions FIPS-205 allows in the `HashSLH-DSA` message
/// encoding. The crate pre-hashes `M` itself; callers never pass an
/// already-hashed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreHash {
    /// SHA-256, 32-byte output.
    Sha256,
    /// SHA-512, 64-byte output.
    Sha512,
    /// SHAKE-128 read to a 32-byte output, per FIPS-205.
    Shake128,
    /// SHAKE-256 read to a 64-byte output, per FIPS-205.
    Shake256,
}

impl PreHash {
    /// The DER encoding of this hash function's object identifier.
    pub(crate) fn oid(self) -> &'static Oid {
        match self {
            Self::Sha256 => &OID_SHA256,
            Self::Sha512 => &OID_SHA512,
            Self::Shake128 => &OID_SHAKE128,
            Self::Shake256 => &OID_SHAKE256,
        }
    }

    /// The length in bytes of `PH(M)` for this hash function.
    pub(crate) fn output_len(self) -> usize {
        match self {
            Self::Sha256 | Self::Shake128 => 32,
            Self::Sha512 | Self::Shake256 => 64,
        }
    }

    /// Hashes `msg` and writes `PH(msg)` into the front of `out`, returning
    /// its length. `out` must be at least [`MAX_PH_OUTPUT_LEN`] bytes.
    pub(crate) fn digest_into(self, msg: &[u8], out: &mut [u8; MAX_PH_OUTPUT_LEN]) -> usize {
        let len = self.output_len();
        match self {
            Self::Sha256 => out[..len].copy_from_slice(&Sha256::digest(msg)),
            Self::Sha512 => out[..len].copy_from_slice(&Sha512::digest(msg)),
            Self::Shake128 => Shake128::default().chain(msg).finalize_xof_into(&mut out[..len]),
            Self::Shake256 => Shake256::default().chain(msg).finalize_xof_into(&mut out[..len]),
        }
        len
    }

    /// Recovers the pre-hash function identified by an 11-byte DER OID, as
    /// might be carried by a protocol that transmits the OID alongside the
    /// message. FIPS-205 itself always has signer and verifier agree on `PH`
    /// out of band, so this is a convenience rather than part of the core
    /// sign/verify path.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedHash`] if `oid` does not match one of the
    /// four hash functions listed in FIPS-205 section 10.2.2.
    pub fn try_from_oid(oid: &[u8]) -> Result<Self, Error> {
        match oid {
            _ if oid == OID_SHA256.as_slice() => Ok(Self::Sha256),
            _ if oid == OID_SHA512.as_slice() => Ok(Self::Sha512),
            _ if oid == OID_SHAKE128.as_slice() => Ok(Self::Shake128),
            _ if oid == OID_SHAKE256.as_slice() => Ok(Self::Shake256),
            _ => Err(Error::UnsupportedHash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oid_round_trips() {
        for ph in [
            PreHash::Sha256,
            PreHash::Sha512,
            PreHash::Shake128,
            PreHash::Shake256,
        ] {
            assert_eq!(PreHash::try_from_oid(ph.oid()).unwrap(), ph);
        }
    }

    #[test]
    fn unrecognized_oid_is_unsupported() {
        assert_eq!(
            PreHash::try_from_oid(&[0u8; 11]).unwrap_err(),
            Error::UnsupportedHash
        );
    }

    #[test]
    fn sha256_digest_matches_reference() {
        let mut out = [0u8; MAX_PH_OUTPUT_LEN];
        let len = PreHash::Sha256.digest_into(b"abc", &mut out);
        assert_eq!(len, 32);
        assert_eq!(
            &out[..32],
            &hex_literal::hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")[..]
        );
    }
}

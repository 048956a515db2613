//! Crate-local error type
//!
//! Internal operations return this type rather than `signature::Error` so
//! that KAT-oriented `_internal` entry points and deserialization can
//! distinguish failure causes. Public `Signer`/`Verifier` impls convert to
//! `signature::Error` at the API boundary via `From`.

use core::fmt;

/// Errors produced by key construction, deserialization, and the `_internal`
/// FIPS-205 entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A parameter set's invariants were violated (e.g. an inconsistent type combination).
    InvalidParameters,
    /// A byte slice passed to a `TryFrom` impl had the wrong length.
    InvalidLength,
    /// A signing key's seed material was all-zero, which FIPS-205 forbids.
    WeakKey,
    /// A signing key's stored public root did not match its seed material.
    RootMismatch,
    /// A pre-hash OID did not match any of the supported hash functions.
    UnsupportedHash,
    /// The supplied random number generator failed to produce randomness.
    RngFailure,
    /// An integer did not fit in the target fixed-width encoding.
    Truncation,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidParameters => "invalid parameter combination",
            Self::InvalidLength => "input has the wrong length",
            Self::WeakKey => "seed material is all-zero",
            Self::RootMismatch => "recomputed root does not match stored root",
            Self::UnsupportedHash => "unrecognized pre-hash algorithm OID",
            Self::RngFailure => "random number generator failed",
            Self::Truncation => "value does not fit in target width",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for Error {}

impl From<Error> for signature::Error {
    fn from(_: Error) -> Self {
        signature::Error::new()
    }
}

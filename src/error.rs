use crate::seed::SeedKind;

/// Errors produced while constructing a generator or sampling from a domain.
///
/// Plain draws never fail; only seeding and collection/range sampling can.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A tagged seed named a (width, kind) pair that is not a fixed-width
    /// scalar this crate knows how to pack.
    #[error("invalid seed type: {kind} with {bits} bits")]
    InvalidSeedType { bits: u32, kind: SeedKind },

    /// Sampling was requested from an empty collection or an empty range.
    #[error("cannot sample from an empty domain")]
    EmptyDomain,

    /// The OS entropy source failed.
    #[cfg(feature = "getrandom")]
    #[cfg_attr(docsrs, doc(cfg(feature = "getrandom")))]
    #[error("entropy source failed: {0}")]
    Entropy(getrandom::Error),

    /// An empty seed list was supplied but no entropy source is compiled in.
    #[error("no seeds supplied and no entropy source available")]
    EntropyUnavailable,

    /// A mixing strength name was not one of `weak`, `medium` or `strong`.
    #[error("unknown mixing strength")]
    InvalidStrength,
}

#[cfg(feature = "getrandom")]
impl From<getrandom::Error> for Error {
    fn from(err: getrandom::Error) -> Self {
        Self::Entropy(err)
    }
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

use zeroize::Zeroize;

use crate::cipher::{self, SEED_WORDS};
use crate::draw::Draw;
use crate::error::Result;
use crate::seed::{self, MixingStrength, Seed};

/// The pure generator value: one state word and three seed words.
///
/// A `GeneratorCore` is never mutated. Every draw consumes a core (it is
/// `Copy`, so the caller keeps the original) and returns the produced value
/// together with the successor core. The output is a total function of the
/// core alone, so the same core always yields the same `(value, core)` pair
/// and sequences can be forked freely.
///
/// # Examples
/// ```
/// use jsf_rng::{seeds, GeneratorCore, MixingStrength};
///
/// let core = GeneratorCore::from_seeds(&seeds![7u32, 3u32, 11u32], MixingStrength::Strong)?;
/// let (a, next) = core.draw::<u32>();
/// let (b, _) = next.draw::<u32>();
/// assert_eq!((a, b), (0x857d_21bc, 0x47ce_8208));
///
/// // drawing again from the original core repeats the first value
/// assert_eq!(core.draw::<u32>().0, a);
/// # Ok::<(), jsf_rng::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorCore {
    state: u32,
    seeds: [u32; SEED_WORDS],
}

impl GeneratorCore {
    /// State word every seeded core starts from, before mixing.
    pub const INITIAL_STATE: u32 = 0xf1ea_5eed;

    /// Create a core from raw words, without any mixing.
    pub const fn new(state: u32, seeds: [u32; SEED_WORDS]) -> Self {
        Self { state, seeds }
    }

    /// Pack `seeds` into three seed words and mix them with `strength`
    /// rounds.
    ///
    /// An empty seed list is replaced by a single fresh word from the OS
    /// entropy source, which fails with [`crate::Error::EntropyUnavailable`] when the
    /// `getrandom` feature is disabled.
    pub fn from_seeds(seeds: &[Seed], strength: MixingStrength) -> Result<Self> {
        let words = match seed::pack(seeds) {
            Some(words) => words,
            None => [fresh_seed_word()?; SEED_WORDS],
        };
        Ok(Self::from_seed_words(words, strength))
    }

    /// Start from [`Self::INITIAL_STATE`] and `words`, then run `strength`
    /// mixing rounds, discarding their output.
    pub fn from_seed_words(words: [u32; SEED_WORDS], strength: MixingStrength) -> Self {
        tracing::trace!(
            seeds = ?words,
            rounds = strength.rounds(),
            "mixing seed words"
        );
        let mut core = Self::new(Self::INITIAL_STATE, words);
        for _ in 0..strength.rounds() {
            core = core.step().1;
        }
        core
    }

    /// Create a core seeded with one word from the OS entropy source, mixed at
    /// [`MixingStrength::Strong`].
    #[cfg(feature = "getrandom")]
    #[cfg_attr(docsrs, doc(cfg(feature = "getrandom")))]
    pub fn from_entropy() -> Result<Self> {
        Self::from_seeds(&[], MixingStrength::Strong)
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn seeds(&self) -> [u32; SEED_WORDS] {
        self.seeds
    }

    /// Run the cipher once, returning the raw output word and the successor.
    #[must_use]
    #[inline]
    pub fn step(self) -> (u32, Self) {
        let (output, state, seeds) = cipher::step(self.state, self.seeds);
        (output, Self { state, seeds })
    }

    /// Draw a value of type `T`. See [`Draw`] for the supported types.
    #[must_use]
    #[inline]
    pub fn draw<T: Draw>(self) -> (T, Self) {
        T::draw(self)
    }
}

impl Zeroize for GeneratorCore {
    fn zeroize(&mut self) {
        self.state.zeroize();
        self.seeds.zeroize();
    }
}

#[cfg(feature = "getrandom")]
fn fresh_seed_word() -> Result<u32> {
    tracing::debug!("no seeds supplied, reading a seed word from the OS");
    Ok(getrandom::u32()?)
}

#[cfg(not(feature = "getrandom"))]
fn fresh_seed_word() -> Result<u32> {
    Err(crate::error::Error::EntropyUnavailable)
}

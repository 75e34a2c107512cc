use zeroize::Zeroize;

use crate::domain::Domain;
use crate::draw::Draw;
use crate::error::Result;
use crate::generator::GeneratorCore;
use crate::seed::{MixingStrength, Seed};
use crate::uniform::{SampleRange, UniformInt};

/// A mutable handle owning one [`GeneratorCore`].
///
/// Each draw replaces the owned core with the successor returned by the pure
/// draw, so callers do not have to thread cores by hand. Cloning copies the
/// current core; the clone and the original then produce the same sequence
/// independently.
///
/// # Examples
/// ```
/// use jsf_rng::{seeds, Generator, MixingStrength};
///
/// let mut rng = Generator::from_seeds(&seeds![42u32], MixingStrength::Strong)?;
/// let coin: bool = rng.draw();
/// let die = rng.draw_range(1..=6u8)?;
/// let card = rng.sample(&["ace", "king", "queen"])?;
///
/// let mut fork = rng.clone();
/// assert_eq!(rng.draw::<u64>(), fork.draw::<u64>());
/// # let _ = (coin, die, card);
/// # Ok::<(), jsf_rng::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Generator {
    core: GeneratorCore,
}

impl Generator {
    pub fn new(core: GeneratorCore) -> Self {
        Self { core }
    }

    /// See [`GeneratorCore::from_seeds`].
    pub fn from_seeds(seeds: &[Seed], strength: MixingStrength) -> Result<Self> {
        GeneratorCore::from_seeds(seeds, strength).map(Self::new)
    }

    /// See [`GeneratorCore::from_entropy`].
    #[cfg(feature = "getrandom")]
    #[cfg_attr(docsrs, doc(cfg(feature = "getrandom")))]
    pub fn from_entropy() -> Result<Self> {
        GeneratorCore::from_entropy().map(Self::new)
    }

    /// The current core. Drawing from it reproduces what this handle will
    /// draw next.
    pub fn core(&self) -> GeneratorCore {
        self.core
    }

    pub fn into_core(self) -> GeneratorCore {
        self.core
    }

    #[inline]
    pub fn draw<T: Draw>(&mut self) -> T {
        let (value, next) = self.core.draw();
        self.core = next;
        value
    }

    /// Draw an integer uniformly from `range`. The handle is left untouched
    /// when the range is empty.
    pub fn draw_range<T, R>(&mut self, range: R) -> Result<T>
    where
        T: UniformInt,
        R: SampleRange<T>,
    {
        let (value, next) = self.core.draw_range(range)?;
        self.core = next;
        Ok(value)
    }

    /// Draw one element of `domain` uniformly. The handle is left untouched
    /// when the domain is empty.
    pub fn sample<D: Domain>(&mut self, domain: D) -> Result<D::Item> {
        let (item, next) = self.core.sample(domain)?;
        self.core = next;
        Ok(item)
    }
}

impl From<GeneratorCore> for Generator {
    fn from(core: GeneratorCore) -> Self {
        Self::new(core)
    }
}

impl Zeroize for Generator {
    fn zeroize(&mut self) {
        self.core.zeroize();
    }
}

#[cfg(feature = "rand-core")]
mod rng_core {
    use super::Generator;
    use crate::generator::GeneratorCore;
    use crate::seed::MixingStrength;
    use rand_core::{RngCore, SeedableRng};

    #[cfg_attr(docsrs, doc(cfg(feature = "rand-core")))]
    impl RngCore for Generator {
        /// One cipher output.
        fn next_u32(&mut self) -> u32 {
            self.draw()
        }

        /// Two cipher outputs, the first forming the high half.
        fn next_u64(&mut self) -> u64 {
            self.draw()
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dst)
        }
    }

    #[cfg_attr(docsrs, doc(cfg(feature = "rand-core")))]
    impl SeedableRng for Generator {
        /// Three little endian seed words.
        type Seed = [u8; 12];

        /// Equivalent to seeding with three `u32`s at
        /// [`MixingStrength::Strong`].
        fn from_seed(seed: Self::Seed) -> Self {
            let mut words = [0u32; 3];
            for (word, bytes) in words.iter_mut().zip(seed.chunks_exact(4)) {
                *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
            Self::new(GeneratorCore::from_seed_words(words, MixingStrength::Strong))
        }

        /// Equivalent to seeding with a single `u64` at
        /// [`MixingStrength::Strong`].
        #[allow(clippy::cast_possible_truncation)]
        fn seed_from_u64(state: u64) -> Self {
            let (low, high) = (state as u32, (state >> 32) as u32);
            Self::new(GeneratorCore::from_seed_words(
                [low, high, low ^ high],
                MixingStrength::Strong,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds;

    fn seeded() -> Generator {
        Generator::from_seeds(&seeds![7u32, 3u32, 11u32], MixingStrength::Strong).unwrap()
    }

    #[test]
    fn draws_advance_the_owned_core() {
        let mut rng = seeded();
        let start = rng.core();
        assert_eq!(rng.draw::<u32>(), 0x857d_21bc);
        assert_eq!(rng.core(), start.step().1);
        assert_eq!(rng.draw::<u32>(), 0x47ce_8208);
        assert_eq!(rng.draw::<u32>(), 0x4298_d73d);
    }

    #[test]
    fn handle_matches_threaded_cores() {
        let mut rng = seeded();
        let mut core = rng.core();
        for _ in 0..100 {
            let (expected, next) = core.draw::<u64>();
            core = next;
            assert_eq!(rng.draw::<u64>(), expected);
        }
        assert_eq!(rng.into_core(), core);
    }

    #[test]
    fn clone_is_an_independent_copy() {
        let mut rng = seeded();
        let mut copy = rng.clone();
        assert_eq!(rng.draw::<u128>(), copy.draw::<u128>());
        rng.draw::<u8>();
        assert_ne!(rng, copy);
    }

    #[test]
    fn failed_samples_leave_core_alone() {
        let mut rng = seeded();
        let before = rng.core();
        let empty: &[u32] = &[];
        assert!(rng.sample(empty).is_err());
        assert!(rng.draw_range(4..4u16).is_err());
        assert_eq!(rng.core(), before);
    }

    #[test]
    fn bool_frequency_is_balanced() {
        let mut rng = Generator::from_seeds(&seeds![42u32], MixingStrength::Strong).unwrap();
        let heads = (0..1_000).filter(|_| rng.draw::<bool>()).count();
        assert!((450..=550).contains(&heads), "{heads}");
    }

    #[test]
    fn zeroize_clears_core() {
        let mut rng = seeded();
        rng.zeroize();
        assert_eq!(rng.core(), GeneratorCore::new(0, [0; 3]));
    }

    #[cfg(feature = "rand-core")]
    #[test]
    fn rand_core_matches_native_draws() {
        use rand_core::{RngCore, SeedableRng};

        let mut seed = [0u8; 12];
        seed[0] = 7;
        seed[4] = 3;
        seed[8] = 11;
        let mut rng = Generator::from_seed(seed);
        assert_eq!(rng, seeded());
        assert_eq!(rng.next_u32(), 0x857d_21bc);

        let mut buf = [0; 15];
        rng.fill_bytes(&mut buf);
        assert_ne!(buf, [0; 15]);

        let from_u64 = Generator::seed_from_u64(0x1111_1111_2222_2222);
        let expected =
            Generator::from_seeds(&seeds![0x1111_1111_2222_2222u64], MixingStrength::Strong)
                .unwrap();
        assert_eq!(from_u64, expected);
    }
}

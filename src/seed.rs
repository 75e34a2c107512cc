//! Tagged scalar seeds and the packer that folds them into three seed words.

use core::fmt;
use core::str::FromStr;

use zeroize::Zeroize;

use crate::cipher::SEED_WORDS;
use crate::error::{Error, Result};
use crate::float::F16;

/// The numeric kind of a [`Seed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeedKind {
    Unsigned,
    Signed,
    Float,
}

impl fmt::Display for SeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unsigned => "unsigned",
            Self::Signed => "signed",
            Self::Float => "float",
        })
    }
}

/// A fixed-width scalar seed value, stored as its raw bit pattern.
///
/// Typed conversions (`Seed::from(7u32)`, `Seed::from(-1i8)`, `Seed::from(0.5f64)`)
/// always succeed. [`Seed::new`] builds a seed from a runtime `(bits, kind)`
/// tag and rejects combinations that are not a recognized scalar type.
///
/// Floats contribute their IEEE-754 bit pattern and signed integers their
/// two's complement pattern, so only the width matters to the packer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed {
    bits: u32,
    kind: SeedKind,
    value: u128,
}

impl Seed {
    /// Build a seed from a width in bits, a kind and a raw bit pattern.
    ///
    /// Integers may be 8, 16, 32, 64 or 128 bits wide; floats 16, 32 or 64.
    /// Bits of `value` above `bits` are discarded.
    pub fn new(bits: u32, kind: SeedKind, value: u128) -> Result<Self> {
        let valid = match kind {
            SeedKind::Unsigned | SeedKind::Signed => matches!(bits, 8 | 16 | 32 | 64 | 128),
            SeedKind::Float => matches!(bits, 16 | 32 | 64),
        };
        if !valid {
            return Err(Error::InvalidSeedType { bits, kind });
        }
        let mask = if bits == 128 { u128::MAX } else { (1u128 << bits) - 1 };
        Ok(Self {
            bits,
            kind,
            value: value & mask,
        })
    }

    /// Width of the seed in bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn kind(&self) -> SeedKind {
        self.kind
    }

    /// The raw bit pattern, zero extended.
    pub fn value(&self) -> u128 {
        self.value
    }
}

macro_rules! seed_from {
    ($($ty:ty => $bits:literal, $kind:ident, |$v:ident| $raw:expr;)*) => {$(
        impl From<$ty> for Seed {
            #[allow(clippy::cast_sign_loss)]
            fn from($v: $ty) -> Self {
                Self {
                    bits: $bits,
                    kind: SeedKind::$kind,
                    value: u128::from($raw),
                }
            }
        }
    )*};
}

seed_from! {
    u8 => 8, Unsigned, |v| v;
    u16 => 16, Unsigned, |v| v;
    u32 => 32, Unsigned, |v| v;
    u64 => 64, Unsigned, |v| v;
    u128 => 128, Unsigned, |v| v;
    i8 => 8, Signed, |v| v as u8;
    i16 => 16, Signed, |v| v as u16;
    i32 => 32, Signed, |v| v as u32;
    i64 => 64, Signed, |v| v as u64;
    i128 => 128, Signed, |v| v as u128;
    F16 => 16, Float, |v| v.to_bits();
    f32 => 32, Float, |v| v.to_bits();
    f64 => 64, Float, |v| v.to_bits();
}

impl Zeroize for Seed {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}

/// Build an array of [`Seed`]s from heterogeneous scalar expressions.
///
/// ```
/// use jsf_rng::{seeds, GeneratorCore, MixingStrength};
///
/// let core = GeneratorCore::from_seeds(&seeds![7u8, -3i64, 0.25f32], MixingStrength::Strong)?;
/// # Ok::<(), jsf_rng::Error>(())
/// ```
#[macro_export]
macro_rules! seeds {
    ($($seed:expr),* $(,)?) => {
        [$($crate::Seed::from($seed)),*]
    };
}

/// Number of cipher rounds run over freshly packed seed words before the
/// first draw.
///
/// Fewer rounds are cheaper but leave visible artifacts, especially when only
/// a few seed values were supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MixingStrength {
    Weak = 5,
    Medium = 10,
    #[default]
    Strong = 20,
}

impl MixingStrength {
    /// Number of mixing rounds.
    pub fn rounds(self) -> u32 {
        self as u32
    }

    fn name(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for MixingStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MixingStrength {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [Self::Weak, Self::Medium, Self::Strong]
            .into_iter()
            .find(|strength| s.eq_ignore_ascii_case(strength.name()))
            .ok_or(Error::InvalidStrength)
    }
}

/// Streaming state machine folding seeds into three 32-bit words.
///
/// Bytes pair into half-words and half-words pair into words, first with the
/// earliest unpaired value. A word is emitted the moment it is complete, so
/// the emission order (and hence the result) depends on the seed order.
/// Emitted words fill the three accumulators and every later word is xored
/// into accumulator `index % 3`.
struct Packer {
    acc: [u32; SEED_WORDS],
    count: usize,
    lone_byte: Option<u8>,
    lone_half: Option<u16>,
}

impl Packer {
    fn new() -> Self {
        Self {
            acc: [0; SEED_WORDS],
            count: 0,
            lone_byte: None,
            lone_half: None,
        }
    }

    fn push_word(&mut self, word: u32) {
        let slot = self.count % SEED_WORDS;
        if self.count < SEED_WORDS {
            self.acc[slot] = word;
        } else {
            self.acc[slot] ^= word;
        }
        self.count += 1;
    }

    fn push_half(&mut self, half: u16) {
        match self.lone_half.take() {
            Some(low) => self.push_word(u32::from(low) | u32::from(half) << 16),
            None => self.lone_half = Some(half),
        }
    }

    fn push_byte(&mut self, byte: u8) {
        match self.lone_byte.take() {
            Some(low) => self.push_half(u16::from(low) | u16::from(byte) << 8),
            None => self.lone_byte = Some(byte),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, seed: &Seed) {
        let value = seed.value;
        match seed.bits {
            8 => self.push_byte(value as u8),
            16 => self.push_half(value as u16),
            32 => self.push_word(value as u32),
            64 => {
                self.push_word(value as u32);
                self.push_word((value >> 32) as u32);
            }
            128 => {
                for shift in [0, 32, 64, 96] {
                    self.push_word((value >> shift) as u32);
                }
            }
            // `Seed` can only be built with one of the widths above.
            bits => unreachable!("seed of unsupported width {bits}"),
        }
    }

    /// Flush lone values and produce the seed words, or `None` if nothing was
    /// pushed.
    fn finish(&mut self) -> Option<[u32; SEED_WORDS]> {
        match (self.lone_byte.take(), self.lone_half.take()) {
            (Some(byte), Some(half)) => self.push_word(u32::from(half) | u32::from(byte) << 16),
            (Some(byte), None) => self.push_word(u32::from(byte)),
            (None, Some(half)) => self.push_word(u32::from(half)),
            (None, None) => {}
        }
        debug_assert!(self.lone_byte.is_none() && self.lone_half.is_none());

        let [a, b, c] = self.acc;
        match self.count {
            0 => None,
            1 => Some([a, a, a]),
            2 => Some([a, b, a ^ b]),
            _ => Some([a, b, c]),
        }
    }
}

impl Zeroize for Packer {
    fn zeroize(&mut self) {
        self.acc.zeroize();
        self.lone_byte.zeroize();
        self.lone_half.zeroize();
    }
}

impl Drop for Packer {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Fold `seeds` into three seed words. Returns `None` for an empty list.
pub(crate) fn pack(seeds: &[Seed]) -> Option<[u32; SEED_WORDS]> {
    let mut packer = Packer::new();
    for seed in seeds {
        packer.push(seed);
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn rejects_unknown_widths() {
        assert!(matches!(
            Seed::new(24, SeedKind::Unsigned, 1),
            Err(Error::InvalidSeedType { bits: 24, kind: SeedKind::Unsigned })
        ));
        assert!(Seed::new(8, SeedKind::Float, 1).is_err());
        assert!(Seed::new(128, SeedKind::Float, 1).is_err());
        assert!(Seed::new(0, SeedKind::Signed, 0).is_err());
    }

    #[test]
    fn tagged_matches_typed() {
        assert_eq!(Seed::new(32, SeedKind::Unsigned, 7).unwrap(), Seed::from(7u32));
        assert_eq!(Seed::new(8, SeedKind::Signed, 0xff).unwrap(), Seed::from(-1i8));
        assert_eq!(
            Seed::new(64, SeedKind::Float, 1.5f64.to_bits().into()).unwrap(),
            Seed::from(1.5f64)
        );
    }

    #[test]
    fn value_is_masked_to_width() {
        let seed = Seed::new(16, SeedKind::Unsigned, 0x1_2345).unwrap();
        assert_eq!(seed.value(), 0x2345);
    }

    #[test]
    fn empty_list_packs_to_nothing() {
        assert_eq!(pack(&[]), None);
    }

    #[test]
    fn small_word_counts() {
        assert_eq!(pack(&seeds![9u32]), Some([9, 9, 9]));
        assert_eq!(pack(&seeds![1u32, 2u32]), Some([1, 2, 3]));
        assert_eq!(pack(&seeds![7u32, 3u32, 11u32]), Some([7, 3, 11]));
    }

    #[test]
    fn extra_words_fold_cyclically() {
        assert_eq!(pack(&seeds![1u32, 2u32, 3u32, 4u32, 5u32]), Some([1 ^ 4, 2 ^ 5, 3]));
        assert_eq!(
            pack(&seeds![1u32, 2u32, 3u32, 4u32, 5u32, 6u32, 8u32]),
            Some([1 ^ 4 ^ 8, 2 ^ 5, 3 ^ 6])
        );
    }

    #[test]
    fn bytes_pair_into_half_words() {
        assert_eq!(pack(&seeds![0x01u8, 0x02u8]), Some([0x0201; 3]));
        assert_eq!(pack(&seeds![0x01u8, 0x02u8, 0x03u8, 0x04u8]), Some([0x0403_0201; 3]));
    }

    #[test]
    fn lone_byte_joins_lone_half() {
        assert_eq!(pack(&seeds![0x01u8, 0x02u8, 0x03u8]), Some([0x0003_0201; 3]));
        assert_eq!(pack(&seeds![0xaau8, 0x1234u16]), Some([0x00aa_1234; 3]));
        assert_eq!(pack(&seeds![0xaau8]), Some([0xaa; 3]));
        assert_eq!(pack(&seeds![0x1234u16]), Some([0x1234; 3]));
    }

    #[test]
    fn halves_pair_low_first() {
        assert_eq!(pack(&seeds![0x1122u16, 0x3344u16]), Some([0x3344_1122; 3]));
    }

    #[test]
    fn wide_seeds_split_low_first() {
        let (lo, hi) = (0x2222_2222, 0x1111_1111);
        assert_eq!(pack(&seeds![0x1111_1111_2222_2222u64]), Some([lo, hi, lo ^ hi]));
        assert_eq!(
            pack(&seeds![0x4444_4444_3333_3333_2222_2222_1111_1111u128]),
            Some([0x1111_1111 ^ 0x4444_4444, 0x2222_2222, 0x3333_3333])
        );
    }

    #[test]
    fn words_are_emitted_when_complete() {
        // The 32-bit seed is emitted before the two half-words pair up.
        assert_eq!(pack(&seeds![1u16, 5u32, 2u16]), Some([5, 0x0002_0001, 5 ^ 0x0002_0001]));
    }

    #[test]
    fn order_matters() {
        assert_ne!(pack(&seeds![1u32, 2u32]), pack(&seeds![2u32, 1u32]));
        assert_ne!(pack(&seeds![1u8, 2u8]), pack(&seeds![2u8, 1u8]));
    }

    #[test]
    fn floats_and_signed_use_bit_patterns() {
        assert_eq!(pack(&seeds![1.0f32]), Some([0x3f80_0000; 3]));
        assert_eq!(pack(&seeds![-1i32]), Some([u32::MAX; 3]));
        assert_eq!(pack(&seeds![F16::from_bits(0x3c00)]), Some([0x3c00; 3]));
    }

    #[test]
    fn strength_rounds_and_names() {
        assert_eq!(MixingStrength::default(), MixingStrength::Strong);
        assert_eq!(MixingStrength::Weak.rounds(), 5);
        assert_eq!(MixingStrength::Medium.rounds(), 10);
        assert_eq!(MixingStrength::Strong.rounds(), 20);
        assert_eq!("Medium".parse::<MixingStrength>().unwrap(), MixingStrength::Medium);
        assert_eq!(
            "strong".parse::<MixingStrength>().unwrap().to_string(),
            "strong"
        );
        assert!(matches!(
            "extreme".parse::<MixingStrength>(),
            Err(Error::InvalidStrength)
        ));
    }
}

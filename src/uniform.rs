//! Unbiased bounded integer draws.
//!
//! Uses Lemire's nearly divisionless method: multiply a raw draw by the span
//! in double width, keep the high half as the result and reject the draw when
//! the low half falls below `2^width mod span`. This is exactly uniform for
//! every span, unlike `draw % span`.

use core::ops::{Range, RangeInclusive};

use crate::draw::{Draw, UsizeRepr};
use crate::error::{Error, Result};
use crate::generator::GeneratorCore;

/// Unsigned types a span can be drawn over.
trait Bounded: Draw + Copy {
    /// Draw uniformly from `0..span`, with `span == 0` meaning the full width.
    fn draw_below(core: GeneratorCore, span: Self) -> (Self, GeneratorCore);
}

macro_rules! bounded {
    ($($ty:ty => $wide:ty),* $(,)?) => {$(
        impl Bounded for $ty {
            #[allow(clippy::cast_possible_truncation)]
            fn draw_below(core: GeneratorCore, span: Self) -> (Self, GeneratorCore) {
                if span == 0 {
                    return Self::draw(core);
                }
                let wmul = |x: Self| {
                    let m = <$wide>::from(x) * <$wide>::from(span);
                    ((m >> <$ty>::BITS) as $ty, m as $ty)
                };
                let (x, mut core) = Self::draw(core);
                let (mut high, mut low) = wmul(x);
                if low < span {
                    let threshold = span.wrapping_neg() % span;
                    while low < threshold {
                        let (x, next) = Self::draw(core);
                        core = next;
                        (high, low) = wmul(x);
                    }
                }
                (high, core)
            }
        }
    )*};
}

bounded! {
    u8 => u16,
    u16 => u32,
    u32 => u64,
    u64 => u128,
}

/// Full 128 x 128 -> 256 bit product as `(high, low)`.
fn wmul_u128(a: u128, b: u128) -> (u128, u128) {
    const LOW: u128 = u64::MAX as u128;
    let (a_hi, a_lo) = (a >> 64, a & LOW);
    let (b_hi, b_lo) = (b >> 64, b & LOW);

    let lo_lo = a_lo * b_lo;
    let hi_lo = a_hi * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_hi = a_hi * b_hi;

    let middle = (lo_lo >> 64) + (hi_lo & LOW) + (lo_hi & LOW);
    let high = hi_hi + (hi_lo >> 64) + (lo_hi >> 64) + (middle >> 64);
    let low = (middle << 64) | (lo_lo & LOW);
    (high, low)
}

impl Bounded for u128 {
    fn draw_below(core: GeneratorCore, span: Self) -> (Self, GeneratorCore) {
        if span == 0 {
            return Self::draw(core);
        }
        let (x, mut core) = Self::draw(core);
        let (mut high, mut low) = wmul_u128(x, span);
        if low < span {
            let threshold = span.wrapping_neg() % span;
            while low < threshold {
                let (x, next) = Self::draw(core);
                core = next;
                (high, low) = wmul_u128(x, span);
            }
        }
        (high, core)
    }
}

impl Bounded for usize {
    #[allow(clippy::cast_possible_truncation)]
    fn draw_below(core: GeneratorCore, span: Self) -> (Self, GeneratorCore) {
        let (value, core) = UsizeRepr::draw_below(core, span as UsizeRepr);
        (value as usize, core)
    }
}

/// Integer types that support unbiased draws from an inclusive range.
pub trait UniformInt: Copy + PartialOrd + Draw {
    /// Draw uniformly from `low..=high`. Requires `low <= high`.
    fn draw_inclusive(core: GeneratorCore, low: Self, high: Self) -> (Self, GeneratorCore);

    /// The value one below `self`, used to close half-open ranges.
    #[doc(hidden)]
    fn predecessor(self) -> Self;
}

macro_rules! uniform_int {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {$(
        impl UniformInt for $ty {
            #[inline]
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
            fn draw_inclusive(core: GeneratorCore, low: Self, high: Self) -> (Self, GeneratorCore) {
                debug_assert!(low <= high);
                let span = (high as $unsigned).wrapping_sub(low as $unsigned).wrapping_add(1);
                let (offset, core) = <$unsigned>::draw_below(core, span);
                (low.wrapping_add(offset as $ty), core)
            }

            #[inline]
            fn predecessor(self) -> Self {
                self.wrapping_sub(1)
            }
        }
    )*};
}

uniform_int! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
}

/// Ranges that can be drawn from: `a..b` and `a..=b`.
pub trait SampleRange<T> {
    /// Inclusive bounds, or `None` if the range is empty.
    fn inclusive_bounds(self) -> Option<(T, T)>;
}

impl<T: UniformInt> SampleRange<T> for RangeInclusive<T> {
    fn inclusive_bounds(self) -> Option<(T, T)> {
        let (low, high) = self.into_inner();
        (low <= high).then_some((low, high))
    }
}

impl<T: UniformInt> SampleRange<T> for Range<T> {
    fn inclusive_bounds(self) -> Option<(T, T)> {
        (self.start < self.end).then(|| (self.start, self.end.predecessor()))
    }
}

impl GeneratorCore {
    /// Draw an integer uniformly from `range`.
    ///
    /// Fails with [`Error::EmptyDomain`] if the range holds no values.
    ///
    /// # Examples
    /// ```
    /// use jsf_rng::{seeds, GeneratorCore, MixingStrength};
    ///
    /// let core = GeneratorCore::from_seeds(&seeds![1u64], MixingStrength::Strong)?;
    /// let (die, core) = core.draw_range(1..=6u8)?;
    /// assert!((1..=6).contains(&die));
    /// assert!(core.draw_range(5..5i32).is_err());
    /// # Ok::<(), jsf_rng::Error>(())
    /// ```
    pub fn draw_range<T, R>(self, range: R) -> Result<(T, Self)>
    where
        T: UniformInt,
        R: SampleRange<T>,
    {
        let (low, high) = range.inclusive_bounds().ok_or(Error::EmptyDomain)?;
        Ok(T::draw_inclusive(self, low, high))
    }
}

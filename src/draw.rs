use crate::float::F16;
use crate::generator::GeneratorCore;

/// Types that can be drawn uniformly from a [`GeneratorCore`].
///
/// Every implementation is built from 32-bit cipher outputs:
///
/// - `u32` is one cipher output.
/// - `u64` chains two `u32` draws and `u128` two `u64` draws, the first draw
///   forming the high half.
/// - `u16` xors the two halves of a `u32`; `u8` xors the two halves of a
///   `u16`.
/// - Signed integers reinterpret the unsigned draw of the same width.
/// - Floats place the low bits of the same-width unsigned draw in the
///   mantissa of a value in `[1, 2)` and subtract one, giving `[0, 1)`.
/// - `bool` is the lowest bit of a `u32`.
/// - Arrays draw their elements in index order.
pub trait Draw: Sized {
    /// Produce a value and the successor core.
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore);
}

impl Draw for u32 {
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        core.step()
    }
}

impl Draw for u64 {
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (high, core) = u32::draw(core);
        let (low, core) = u32::draw(core);
        (u64::from(high) << 32 | u64::from(low), core)
    }
}

impl Draw for u128 {
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (high, core) = u64::draw(core);
        let (low, core) = u64::draw(core);
        (u128::from(high) << 64 | u128::from(low), core)
    }
}

impl Draw for u16 {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (word, core) = u32::draw(core);
        (((word >> 16) ^ word) as u16, core)
    }
}

impl Draw for u8 {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (half, core) = u16::draw(core);
        (((half >> 8) ^ half) as u8, core)
    }
}

#[cfg(target_pointer_width = "16")]
pub(crate) type UsizeRepr = u16;
#[cfg(target_pointer_width = "32")]
pub(crate) type UsizeRepr = u32;
#[cfg(target_pointer_width = "64")]
pub(crate) type UsizeRepr = u64;

impl Draw for usize {
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (value, core) = UsizeRepr::draw(core);
        (value as usize, core)
    }
}

macro_rules! draw_signed {
    ($($signed:ty => $unsigned:ty),* $(,)?) => {$(
        impl Draw for $signed {
            #[inline]
            #[allow(clippy::cast_possible_wrap)]
            fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
                let (value, core) = <$unsigned>::draw(core);
                (value as $signed, core)
            }
        }
    )*};
}

draw_signed! {
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
}

impl Draw for bool {
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (word, core) = u32::draw(core);
        (word & 1 == 1, core)
    }
}

impl Draw for f32 {
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        const MANTISSA: u32 = (1 << (f32::MANTISSA_DIGITS - 1)) - 1;
        let (word, core) = u32::draw(core);
        let one_to_two = f32::from_bits(1.0f32.to_bits() | (word & MANTISSA));
        (one_to_two - 1.0, core)
    }
}

impl Draw for f64 {
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        const MANTISSA: u64 = (1 << (f64::MANTISSA_DIGITS - 1)) - 1;
        let (word, core) = u64::draw(core);
        let one_to_two = f64::from_bits(1.0f64.to_bits() | (word & MANTISSA));
        (one_to_two - 1.0, core)
    }
}

impl Draw for F16 {
    /// `1.m - 1` is exactly `m / 2^10`, which is built directly since there is
    /// no native half precision arithmetic.
    #[inline]
    fn draw(core: GeneratorCore) -> (Self, GeneratorCore) {
        let (half, core) = u16::draw(core);
        (F16::from_unit_mantissa(half & 0x03ff), core)
    }
}

impl<T: Draw, const N: usize> Draw for [T; N] {
    fn draw(mut core: GeneratorCore) -> (Self, GeneratorCore) {
        let values = core::array::from_fn(|_| {
            let (value, next) = T::draw(core);
            core = next;
            value
        });
        (values, core)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Seeded with `[7u32, 3u32, 11u32]` at full strength; its first cipher
    /// outputs are 0x857d21bc, 0x47ce8208 and 0x4298d73d.
    const CORE: GeneratorCore =
        GeneratorCore::new(0xc75c_1a4d, [0x02c1_fb96, 0x766e_b67b, 0x7f19_cbf4]);

    #[test]
    fn narrow_integers_fold_halves() {
        assert_eq!(CORE.draw::<u16>().0, 0x857d ^ 0x21bc);
        assert_eq!(CORE.draw::<u8>().0, 0xa4 ^ 0xc1);
        assert_eq!(CORE.draw::<i8>().0, (0xa4u8 ^ 0xc1) as i8);
    }

    #[test]
    fn wide_integers_concatenate_high_first() {
        assert_eq!(CORE.draw::<u64>().0, 0x857d_21bc_47ce_8208);
        assert_eq!(CORE.draw::<i64>().0, 0x857d_21bc_47ce_8208u64 as i64);

        let (high, next) = CORE.draw::<u64>();
        let (low, next) = next.draw::<u64>();
        let (wide, wide_next) = CORE.draw::<u128>();
        assert_eq!(wide, u128::from(high) << 64 | u128::from(low));
        assert_eq!(wide_next, next);
    }

    #[test]
    fn sixty_four_bits_split_into_two_words() {
        let (wide, after_wide) = CORE.draw::<u64>();
        let (high, next) = CORE.draw::<u32>();
        let (low, next) = next.draw::<u32>();
        assert_eq!((wide >> 32) as u32, high);
        assert_eq!(wide as u32, low);
        assert_eq!(after_wide, next);
    }

    #[test]
    fn bool_is_lowest_bit() {
        let (a, core) = CORE.draw::<bool>();
        let (b, core) = core.draw::<bool>();
        let (c, _) = core.draw::<bool>();
        assert_eq!([a, b, c], [false, false, true]);
    }

    #[test]
    fn floats_use_low_mantissa_bits() {
        assert_eq!(CORE.draw::<f32>().0, 0x7d_21bc as f32 / (1u32 << 23) as f32);
        assert_eq!(
            CORE.draw::<f64>().0,
            0x000d_21bc_47ce_8208u64 as f64 / (1u64 << 52) as f64
        );
        assert_eq!(CORE.draw::<F16>().0.to_f32(), f32::from(0xa4c1u16 & 0x3ff) / 1024.0);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut core = CORE;
        for _ in 0..10_000 {
            let (a, next) = core.draw::<f32>();
            let (b, next) = next.draw::<f64>();
            let (c, next) = next.draw::<F16>();
            core = next;
            assert!((0.0..1.0).contains(&a));
            assert!((0.0..1.0).contains(&b));
            assert!((0.0..1.0).contains(&c.to_f32()));
        }
    }

    #[test]
    fn arrays_draw_in_order() {
        let (words, next) = CORE.draw::<[u32; 3]>();
        assert_eq!(words, [0x857d_21bc, 0x47ce_8208, 0x4298_d73d]);
        assert_eq!(next, CORE.draw::<[u32; 2]>().1.step().1);
    }

    #[test]
    fn draws_are_repeatable() {
        assert_eq!(CORE.draw::<u128>(), CORE.draw::<u128>());
        assert_eq!(CORE.draw::<f64>(), CORE.draw::<f64>());
    }
}

//! A minimal IEEE-754 binary16 value, enough to seed with and draw into.

use core::fmt;

/// Half precision float, stored as its raw bits.
///
/// Only conversions are provided; do arithmetic after widening with
/// [`F16::to_f32`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct F16(u16);

impl F16 {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(0x3c00);

    const EXPONENT_MASK: u16 = 0x7c00;
    const MANTISSA_MASK: u16 = 0x03ff;
    const MANTISSA_BITS: u32 = 10;

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Widen to `f32`. Exact for every value, including subnormals, infinities
    /// and NaN.
    pub fn to_f32(self) -> f32 {
        let sign = u32::from(self.0 & 0x8000) << 16;
        let exponent = (self.0 & Self::EXPONENT_MASK) >> Self::MANTISSA_BITS;
        let mantissa = u32::from(self.0 & Self::MANTISSA_MASK);
        let bits = match exponent {
            0 if mantissa == 0 => sign,
            0 => {
                // subnormal: value = mantissa * 2^-24, exact in f32
                let magnitude = mantissa as f32 * f32::from_bits(0x3380_0000);
                return if sign == 0 { magnitude } else { -magnitude };
            }
            0x1f => sign | 0x7f80_0000 | mantissa << 13,
            e => sign | (u32::from(e) + 127 - 15) << 23 | mantissa << 13,
        };
        f32::from_bits(bits)
    }

    pub fn to_f64(self) -> f64 {
        f64::from(self.to_f32())
    }

    /// The value `mantissa / 2^10`, built exactly. `mantissa` must be below
    /// `2^10`.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn from_unit_mantissa(mantissa: u16) -> Self {
        debug_assert!(mantissa <= Self::MANTISSA_MASK);
        if mantissa == 0 {
            return Self::ZERO;
        }
        // normalise so the leading one lands on the implicit bit
        let lead = 15 - mantissa.leading_zeros();
        let shift = Self::MANTISSA_BITS - lead;
        let exponent = (lead + 5) as u16;
        let fraction = (mantissa << shift) & Self::MANTISSA_MASK;
        Self(exponent << Self::MANTISSA_BITS | fraction)
    }
}

impl fmt::Debug for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_f32(), f)
    }
}

impl fmt::Display for F16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl From<F16> for f32 {
    fn from(value: F16) -> Self {
        value.to_f32()
    }
}

impl From<F16> for f64 {
    fn from(value: F16) -> Self {
        value.to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::F16;

    #[test]
    fn widens_normals() {
        assert_eq!(F16::ONE.to_f32(), 1.0);
        assert_eq!(F16::from_bits(0xc000).to_f32(), -2.0);
        assert_eq!(F16::from_bits(0x3555).to_f32(), 1365.0 / 4096.0);
        assert_eq!(F16::from_bits(0x7bff).to_f32(), 65504.0);
    }

    #[test]
    fn widens_specials() {
        assert_eq!(F16::ZERO.to_f32(), 0.0);
        assert!(F16::from_bits(0x8000).to_f32().is_sign_negative());
        assert_eq!(F16::from_bits(0x0001).to_f32(), f32::from_bits(0x3380_0000));
        assert_eq!(F16::from_bits(0x7c00).to_f32(), f32::INFINITY);
        assert!(F16::from_bits(0x7e00).to_f32().is_nan());
    }

    #[test]
    fn unit_mantissa_is_exact() {
        for m in 0..1024u16 {
            assert_eq!(F16::from_unit_mantissa(m).to_f32(), f32::from(m) / 1024.0);
        }
    }
}

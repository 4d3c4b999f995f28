// replica-value - Fixed-precision decimals
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Fixed-precision decimal numbers.
//!
//! A `Decimal` is an arbitrary-precision integer mantissa with a base-10
//! scale: `1250` at scale `2` is `12.50`. Equality, ordering and hashing are
//! numeric, so `12.5` and `12.50` compare equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

/// Error returned when parsing a decimal literal fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal '{0}'")]
pub struct ParseDecimalError(pub String);

impl Decimal {
    /// Create a decimal from a mantissa and a scale.
    pub fn new(mantissa: impl Into<BigInt>, scale: u32) -> Self {
        Decimal {
            mantissa: mantissa.into(),
            scale,
        }
    }

    /// The unscaled digits.
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// The value as an integer, if it has no fractional part.
    pub fn to_integer(&self) -> Option<BigInt> {
        match self.normalized() {
            (mantissa, 0) => Some(mantissa),
            _ => None,
        }
    }

    /// Mantissa rescaled to `scale`, which must not be below `self.scale`.
    fn rescaled(&self, scale: u32) -> BigInt {
        &self.mantissa * BigInt::from(10u32).pow(scale - self.scale)
    }

    /// Position of the leading digit relative to the decimal point.
    /// Equal magnitudes differ in scale by at most the mantissa's length.
    fn magnitude(&self) -> i64 {
        let digits = self.mantissa.magnitude().to_string().len() as i64;
        digits - i64::from(self.scale)
    }

    /// Strip trailing zeros so numerically equal decimals share one form.
    fn normalized(&self) -> (BigInt, u32) {
        let ten = BigInt::from(10u32);
        let mut mantissa = self.mantissa.clone();
        let mut scale = self.scale;
        while scale > 0 && !mantissa.is_zero() && (&mantissa % &ten).is_zero() {
            mantissa /= &ten;
            scale -= 1;
        }
        if mantissa.is_zero() {
            scale = 0;
        }
        (mantissa, scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = self.mantissa.sign().cmp(&other.mantissa.sign());
        if sign != Ordering::Equal || self.mantissa.is_zero() {
            return sign;
        }
        // Leading digits at different positions settle it without rescaling
        let magnitude = self.magnitude().cmp(&other.magnitude());
        if magnitude != Ordering::Equal {
            return if self.mantissa.is_negative() {
                magnitude.reverse()
            } else {
                magnitude
            };
        }
        let scale = self.scale.max(other.scale);
        self.rescaled(scale).cmp(&other.rescaled(scale))
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (mantissa, scale) = self.normalized();
        mantissa.hash(state);
        scale.hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        let digits = self.mantissa.abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{}{}", sign, digits);
        }
        let digits = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        write!(f, "{}{}.{}", sign, int_part, frac_part)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDecimalError(s.to_string());
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let digits = format!("{}{}", int_part, frac_part);
        let mut mantissa: BigInt = digits.parse().map_err(|_| invalid())?;
        if negative {
            mantissa = -mantissa;
        }
        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        Ok(Decimal { mantissa, scale })
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Decimal::new(n, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(d: &Decimal) -> u64 {
        let mut hasher = DefaultHasher::new();
        d.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_display() {
        assert_eq!(Decimal::new(1250, 2).to_string(), "12.50");
        assert_eq!(Decimal::new(-5, 3).to_string(), "-0.005");
        assert_eq!(Decimal::new(42, 0).to_string(), "42");
        assert_eq!(Decimal::new(0, 2).to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12.50".parse::<Decimal>().unwrap(), Decimal::new(1250, 2));
        assert_eq!("-0.5".parse::<Decimal>().unwrap(), Decimal::new(-5, 1));
        assert_eq!(".5".parse::<Decimal>().unwrap(), Decimal::new(5, 1));
        assert!("".parse::<Decimal>().is_err());
        assert!("1.2.3".parse::<Decimal>().is_err());
        assert!("12a".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_to_integer() {
        assert_eq!(Decimal::new(1200, 2).to_integer(), Some(BigInt::from(12)));
        assert_eq!(Decimal::new(1250, 2).to_integer(), None);
        assert_eq!(Decimal::new(0, 3).to_integer(), Some(BigInt::from(0)));
    }

    #[test]
    fn test_numeric_equality() {
        let a = Decimal::new(125, 1);
        let b = Decimal::new(12500, 3);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert!(Decimal::new(1, 0) > Decimal::new(99, 2));
    }

    #[test]
    fn test_extreme_scales_compare_cheaply() {
        let tiny = Decimal::new(1, u32::MAX);
        assert!(tiny < Decimal::new(1, 0));
        assert!(tiny > Decimal::new(0, 0));
        assert!(tiny > Decimal::new(-1, u32::MAX));
        assert_ne!(tiny, Decimal::new(1, u32::MAX - 1));
        assert_eq!(Decimal::new(10, u32::MAX), Decimal::new(1, u32::MAX - 1));
        assert_eq!(
            hash_of(&Decimal::new(10, u32::MAX)),
            hash_of(&Decimal::new(1, u32::MAX - 1))
        );
    }

    #[test]
    fn test_ordering_across_signs_and_scales() {
        assert!(Decimal::new(-125, 1) < Decimal::new(-12, 0));
        assert!(Decimal::new(-1, 0) < Decimal::new(-99, 2));
        assert!(Decimal::new(999, 3) < Decimal::new(1, 0));
        assert_eq!(Decimal::new(0, 7), Decimal::new(0, 0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn display_parse_preserves_value(m in any::<i64>(), scale in 0u32..12) {
            let d = Decimal::new(m, scale);
            let parsed: Decimal = d.to_string().parse().unwrap();
            prop_assert_eq!(parsed.scale(), scale);
            prop_assert_eq!(parsed, d);
        }

        #[test]
        fn ordering_matches_rescaled_mantissas(
            a in any::<i32>(), sa in 0u32..10, b in any::<i32>(), sb in 0u32..10
        ) {
            let (x, y) = (Decimal::new(a, sa), Decimal::new(b, sb));
            let scale = sa.max(sb);
            prop_assert_eq!(x.cmp(&y), x.rescaled(scale).cmp(&y.rescaled(scale)));
        }
    }
}

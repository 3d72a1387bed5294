//! Decimal-to-tick conversion helpers.
//!
//! The book itself only ever sees integer ticks; it imposes no scale
//! and never touches floating point. Hosts that quote in decimals
//! (e.g. "50000.12345678") convert at the boundary with these
//! helpers, which fix the scale at 10^8 (8 decimal places).
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::{to_fixed, from_fixed};
//!
//! let price = to_fixed("50000.12345678").unwrap();
//! assert_eq!(price, 5_000_012_345_678);
//! assert_eq!(from_fixed(price), "50000.12345678");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for decimal conversion: 10^8
pub const SCALE: u64 = 100_000_000;

/// Largest decimal value representable at this scale
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

/// Convert a decimal string to integer ticks at [`SCALE`].
///
/// Returns `None` for negative values, unparseable input, or values
/// out of range. Excess precision beyond 8 places is rounded.
///
/// ```
/// use matchbook::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a [`Decimal`] to integer ticks at [`SCALE`].
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }
    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert integer ticks back to a [`Decimal`].
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render ticks as a string with the full 8 decimal places.
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Render ticks with trailing zeros trimmed.
///
/// ```
/// use matchbook::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_fixed_basic() {
        assert_eq!(to_fixed("1.0"), Some(100_000_000));
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
        assert_eq!(to_fixed("50000.12345678"), Some(5_000_012_345_678));
    }

    #[test]
    fn to_fixed_rejects_garbage() {
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("-1.0"), None);
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn from_fixed_padding() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
        assert_eq!(from_fixed(5_000_012_345_678), "50000.12345678");
    }

    #[test]
    fn from_fixed_trimming() {
        assert_eq!(from_fixed_trimmed(100_000_000), "1");
        assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
    }

    #[test]
    fn roundtrip() {
        for s in ["1.0", "0.5", "50000.12345678", "0.00000001", "123456.78901234"] {
            let fixed = to_fixed(s).unwrap();
            let back = from_fixed(fixed);
            let original = Decimal::from_str(s).unwrap();
            let converted = Decimal::from_str(&back).unwrap();
            assert_eq!(original, converted, "roundtrip failed for {}", s);
        }
    }
}

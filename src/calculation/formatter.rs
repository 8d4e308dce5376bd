//! Fixed-precision rendering of payroll totals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits in every rendered total.
pub const OUTPUT_DECIMAL_PLACES: u32 = 4;

/// Rounds a total to four fractional digits and renders it zero-padded.
///
/// Midpoints round to even (banker's rounding).
///
/// # Examples
///
/// ```
/// use punch_payroll::calculation::format_fixed;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_fixed(Decimal::new(40, 0)), "40.0000");
/// assert_eq!(format_fixed(Decimal::ZERO), "0.0000");
/// assert_eq!(format_fixed(Decimal::new(1234565, 5)), "12.3456");
/// ```
pub fn format_fixed(value: Decimal) -> String {
    let mut rounded =
        value.round_dp_with_strategy(OUTPUT_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(OUTPUT_DECIMAL_PLACES);
    rounded.to_string()
}

//! Decimal extraction of π from the exact series sum.
//!
//! π is recovered as `426880 √10005 / S` where `S` is the series sum. The
//! whole computation stays in integers: with `d` fractional digits wanted,
//!
//! ```text
//! floor(π · 10^d) = floor(426880 · isqrt(10005 · 10^(2d)) · den(S) / num(S))
//! ```
//!
//! A few guard digits are carried through the square root and division and
//! dropped before formatting.

use crate::constants::{C_MULTIPLIER, C_RADICAND, DIGITS_PER_TERM};
use crate::recurrence::RecurrenceState;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Signed;
use std::f64::consts::{LOG10_2, LOG2_10};

/// Extra decimal digits carried through the integer square root and division.
const GUARD_DIGITS: u64 = 8;

/// Working precision in bits for a state that has folded in `q` terms.
///
/// Extraction includes term `q`, so `q + 1` terms contribute.
pub fn precision_bits(q: u64) -> u64 {
    (DIGITS_PER_TERM * (q as f64 + 1.0) * LOG2_10).ceil() as u64
}

/// Number of fractional decimal digits emitted at `q`.
pub fn fractional_digits(q: u64) -> u64 {
    (precision_bits(q) as f64 * LOG10_2).floor() as u64
}

/// Fractional digits known to be correct after `q` terms have been folded in.
pub fn guaranteed_digits(q: u64) -> u64 {
    (DIGITS_PER_TERM * q as f64).floor() as u64
}

/// Computes `C / series_sum` to `digits` fractional places, truncated.
///
/// `series_sum` must be positive; every partial sum of the series past the
/// first term is.
pub fn pi_from_sum(series_sum: &BigRational, digits: u64) -> String {
    let scale = digits + GUARD_DIGITS;
    let ten = BigUint::from(10u32);

    let radicand = BigUint::from(C_RADICAND) * num_traits::pow(ten.clone(), 2 * scale as usize);
    let root = BigInt::from(radicand.sqrt());

    let scaled = BigInt::from(C_MULTIPLIER) * root * series_sum.denom() / series_sum.numer();
    let truncated = scaled / BigInt::from(num_traits::pow(ten, GUARD_DIGITS as usize));

    format_fixed(&truncated, digits as usize)
}

/// Formats `value / 10^digits` as `"<integer-part>.<fractional-part>"`.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use series_engine::digits::format_fixed;
///
/// assert_eq!(format_fixed(&BigInt::from(314159), 5), "3.14159");
/// assert_eq!(format_fixed(&BigInt::from(42), 3), "0.042");
/// ```
pub fn format_fixed(value: &BigInt, digits: usize) -> String {
    let magnitude = value.abs().to_string();
    let padded = if magnitude.len() <= digits {
        format!("{}{}", "0".repeat(digits + 1 - magnitude.len()), magnitude)
    } else {
        magnitude
    };

    let split = padded.len() - digits;
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{}{}.{}", sign, &padded[..split], &padded[split..])
}

impl RecurrenceState {
    /// Decimal approximation of π from the current state.
    ///
    /// The not-yet-added term `q` is included in the denominator, one term
    /// beyond what the checkpointed sum alone represents. Does not mutate
    /// the state; repeated calls return identical strings.
    pub fn extract_digits(&self) -> String {
        let series_sum = self.sum() + self.term();
        pi_from_sum(&series_sum, fractional_digits(self.q()))
    }
}

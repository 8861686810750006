//! Fixed coefficients of the Chudnovsky series.
//!
//! The series for 1/π is
//!
//! ```text
//! 1/π = 12 Σ (-1)^q (6q)! (545140134q + 13591409) / ((3q)! (q!)^3 640320^(3q + 3/2))
//! ```
//!
//! Folding the constant factors out of the sum gives
//! `π = 426880 √10005 / Σ term(q)`, which is the form used throughout the crate.

/// Initial value of `l`, the constant part of the linear numerator.
pub const L_INITIAL: i64 = 13_591_409;

/// Per-term increment of `l`.
pub const L_STEP: i64 = 545_140_134;

/// Per-term multiplier of `x`, equal to `-640320^3`.
pub const X_FACTOR: i64 = -262_537_412_640_768_000;

/// Initial value of the auxiliary counter `k` (`12q - 6` at `q = 0`).
pub const K_INITIAL: i64 = -6;

/// Per-term increment of `k`.
pub const K_STEP: i64 = 12;

/// Multiplier of the square root in the numerator of π.
pub const C_MULTIPLIER: u32 = 426_880;

/// Radicand of the square root in the numerator of π.
pub const C_RADICAND: u32 = 10_005;

/// Decimal digits gained per series term, `log10(640320^3 / 1728)`.
pub const DIGITS_PER_TERM: f64 = 14.181_647_462_725_477_655_5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_factor_is_negative_cube() {
        let base: i128 = 640_320;
        assert_eq!(-(base * base * base), X_FACTOR as i128);
    }

    #[test]
    fn test_digits_per_term_matches_convergence_ratio() {
        let ratio = (640_320.0_f64).powi(3) / 1728.0;
        assert!((ratio.log10() - DIGITS_PER_TERM).abs() < 1e-9);
    }
}

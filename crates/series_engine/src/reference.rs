//! Closed-form Chudnovsky terms by direct factorial evaluation.
//!
//! Every call recomputes three factorials from scratch, so cost grows with
//! `q` on each term. These functions exist to cross-check the recurrence;
//! production stepping goes through [`crate::RecurrenceState::advance`].

use crate::constants::{L_INITIAL, L_STEP, X_FACTOR};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Computes `n!`.
pub fn factorial(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, i| acc * i)
}

/// Computes the coefficient `(6q)! / ((3q)! (q!)^3)`.
///
/// The quotient is always an integer.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use series_engine::reference::coefficient;
///
/// assert_eq!(coefficient(0), BigInt::from(1));
/// assert_eq!(coefficient(1), BigInt::from(120));
/// assert_eq!(coefficient(2), BigInt::from(83160));
/// ```
pub fn coefficient(q: u64) -> BigInt {
    let q_fact = factorial(q);
    factorial(6 * q) / (factorial(3 * q) * &q_fact * &q_fact * &q_fact)
}

/// Computes term `q` of the series directly from its closed form.
pub fn closed_form_term(q: u64) -> BigRational {
    let l = BigInt::from(L_STEP) * q + L_INITIAL;
    let x = num_traits::pow(BigInt::from(X_FACTOR), q as usize);
    BigRational::new(coefficient(q) * l, x)
}

/// Computes the exact partial sum of terms `0..n`.
pub fn closed_form_partial_sum(n: u64) -> BigRational {
    (0..n).fold(BigRational::zero(), |acc, q| acc + closed_form_term(q))
}

//! Recurrence state and the sequential advance.

use super::AdvanceMode;
use crate::constants::{K_INITIAL, K_STEP, L_INITIAL, L_STEP, X_FACTOR};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Exact state of the Chudnovsky recurrence after `q` terms.
///
/// `sum` holds the exact partial sum of the first `q` terms. `m`, `k`, `l`
/// and `x` are the factors of term `q`, the next one to be added:
///
/// | field | closed form |
/// |---|---|
/// | `m` | `(6q)! / ((3q)! (q!)^3)` |
/// | `k` | `12q - 6` |
/// | `l` | `545140134q + 13591409` |
/// | `x` | `(-262537412640768000)^q` |
///
/// # Example
///
/// ```rust
/// use series_engine::RecurrenceState;
///
/// let mut state = RecurrenceState::initial();
/// let term = state.term();
/// state.advance();
///
/// assert_eq!(state.q(), 1);
/// assert_eq!(state.sum(), &term);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecurrenceState {
    /// Number of terms folded into `sum`.
    pub(crate) q: u64,

    /// Exact partial sum of terms `0..q`.
    pub(crate) sum: BigRational,

    /// Coefficient ratio `(6q)! / ((3q)! (q!)^3)`.
    pub(crate) m: BigRational,

    /// Auxiliary counter `12q - 6`.
    pub(crate) k: BigInt,

    /// Linear numerator `545140134q + 13591409`.
    pub(crate) l: BigInt,

    /// Alternating geometric denominator `(-640320^3)^q`.
    pub(crate) x: BigInt,
}

impl RecurrenceState {
    /// Creates the state before any term has been added.
    pub fn initial() -> Self {
        Self {
            q: 0,
            sum: BigRational::zero(),
            m: BigRational::one(),
            k: BigInt::from(K_INITIAL),
            l: BigInt::from(L_INITIAL),
            x: BigInt::one(),
        }
    }

    /// Reassembles a state from its six fields without checking them.
    ///
    /// Use [`RecurrenceState::check_consistency`] to verify the result.
    pub fn from_parts(
        q: u64,
        sum: BigRational,
        m: BigRational,
        k: BigInt,
        l: BigInt,
        x: BigInt,
    ) -> Self {
        Self {
            q,
            sum,
            m,
            k,
            l,
            x,
        }
    }

    /// Number of terms already folded into the sum.
    #[inline]
    pub fn q(&self) -> u64 {
        self.q
    }

    /// Exact partial sum of the first `q` terms.
    #[inline]
    pub fn sum(&self) -> &BigRational {
        &self.sum
    }

    /// Running coefficient ratio of term `q`.
    #[inline]
    pub fn m(&self) -> &BigRational {
        &self.m
    }

    /// Auxiliary counter, `12q - 6`.
    #[inline]
    pub fn k(&self) -> &BigInt {
        &self.k
    }

    /// Linear numerator of term `q`.
    #[inline]
    pub fn l(&self) -> &BigInt {
        &self.l
    }

    /// Geometric denominator of term `q`.
    #[inline]
    pub fn x(&self) -> &BigInt {
        &self.x
    }

    /// Value of term `q`, the next term to be added.
    pub fn term(&self) -> BigRational {
        term_of(&self.m, &self.l, &self.x)
    }

    /// Advances the series by one term using the default [`AdvanceMode`].
    pub fn advance(&mut self) {
        self.advance_with(AdvanceMode::default());
    }

    /// Advances the series by one term using the given execution mode.
    pub fn advance_with(&mut self, mode: AdvanceMode) {
        match mode {
            AdvanceMode::Sequential => self.advance_sequential(),
            AdvanceMode::ForkJoin => self.advance_fork_join(),
        }
    }

    /// Advances by `n` terms, one after another.
    pub fn advance_by(&mut self, n: u64, mode: AdvanceMode) {
        for _ in 0..n {
            self.advance_with(mode);
        }
    }

    fn advance_sequential(&mut self) {
        self.sum += term_of(&self.m, &self.l, &self.x);
        self.k += K_STEP;

        scale_m(&mut self.m, &self.k, self.q);
        self.l += L_STEP;
        self.x *= X_FACTOR;

        self.q += 1;
    }

    /// Checks that the fields describe a state reachable by advancing from
    /// [`RecurrenceState::initial`].
    ///
    /// `k`, `l` and `x` must equal their closed forms for `q`, `m` must be
    /// positive, and the series sum including term `q` must be positive so
    /// that digit extraction is well defined. Returns a description of the
    /// first mismatch found. `m` and `sum` have no cheap closed form and are
    /// only checked for sign.
    pub fn check_consistency(&self) -> Result<(), String> {
        let q = BigInt::from(self.q);

        let expected_k = &q * K_STEP + K_INITIAL;
        if self.k != expected_k {
            return Err(format!(
                "k = {} does not match 12q - 6 = {} for q = {}",
                self.k, expected_k, self.q
            ));
        }

        let expected_l = &q * L_STEP + L_INITIAL;
        if self.l != expected_l {
            return Err(format!(
                "l = {} does not match 545140134q + 13591409 = {} for q = {}",
                self.l, expected_l, self.q
            ));
        }

        let exponent = usize::try_from(self.q)
            .map_err(|_| format!("q = {} is out of range", self.q))?;
        if self.x != num_traits::pow(BigInt::from(X_FACTOR), exponent) {
            return Err(format!(
                "x does not match (-262537412640768000)^q for q = {}",
                self.q
            ));
        }

        if !self.m.is_positive() {
            return Err(format!("m = {} is not positive", self.m));
        }

        if self.q == 0 && !self.sum.is_zero() {
            return Err(format!("sum = {} is not zero for q = 0", self.sum));
        }

        if !(&self.sum + self.term()).is_positive() {
            return Err(format!(
                "series sum through term q is not positive for q = {}",
                self.q
            ));
        }

        Ok(())
    }
}

impl Default for RecurrenceState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Term value `m * l / x`.
pub(super) fn term_of(m: &BigRational, l: &BigInt, x: &BigInt) -> BigRational {
    m * BigRational::new(l.clone(), x.clone())
}

/// Applies `m *= (k^3 - 16k) / (q + 1)^3`.
///
/// `k` must already hold the incremented counter and `q` the count before
/// this advance.
pub(super) fn scale_m(m: &mut BigRational, k: &BigInt, q: u64) {
    let numer = k * (k * k - BigInt::from(16));
    let n = BigInt::from(q + 1);
    let denom = &n * &n * &n;
    *m *= BigRational::new(numer, denom);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference;

    #[test]
    fn test_initial_values() {
        let state = RecurrenceState::initial();
        assert_eq!(state.q(), 0);
        assert!(state.sum().is_zero());
        assert!(state.m().is_one());
        assert_eq!(state.k(), &BigInt::from(-6));
        assert_eq!(state.l(), &BigInt::from(13_591_409));
        assert!(state.x().is_one());
        assert_eq!(state, RecurrenceState::default());
    }

    #[test]
    fn test_first_advance_values() {
        let mut state = RecurrenceState::initial();
        state.advance_with(AdvanceMode::Sequential);

        assert_eq!(state.q(), 1);
        assert_eq!(state.sum(), &BigRational::from_integer(BigInt::from(13_591_409)));
        assert_eq!(state.k(), &BigInt::from(6));
        // 6! / 3! = 120
        assert_eq!(state.m(), &BigRational::from_integer(BigInt::from(120)));
        assert_eq!(state.l(), &BigInt::from(558_731_543));
        assert_eq!(state.x(), &BigInt::from(-262_537_412_640_768_000_i64));
    }

    #[test]
    fn test_sign_alternates() {
        let mut state = RecurrenceState::initial();
        for q in 0..8u64 {
            let positive = state.x() > &BigInt::zero();
            assert_eq!(positive, q % 2 == 0, "sign of x at q = {}", q);
            state.advance_with(AdvanceMode::Sequential);
        }
    }

    #[test]
    fn test_terms_match_closed_form() {
        let mut state = RecurrenceState::initial();
        for q in 0..25u64 {
            assert_eq!(state.term(), reference::closed_form_term(q), "term {}", q);
            state.advance_with(AdvanceMode::Sequential);
        }
    }

    #[test]
    fn test_m_matches_factorial_ratio() {
        let mut state = RecurrenceState::initial();
        for q in 0..20u64 {
            assert_eq!(
                state.m(),
                &BigRational::from_integer(reference::coefficient(q)),
                "m at q = {}",
                q
            );
            state.advance_with(AdvanceMode::Sequential);
        }
    }

    #[test]
    fn test_sum_grows_by_pre_update_term() {
        let mut state = RecurrenceState::initial();
        state.advance_by(5, AdvanceMode::Sequential);

        let before = state.clone();
        state.advance();

        assert_eq!(state.q(), before.q() + 1);
        assert_eq!(state.sum() - before.sum(), before.term());
    }

    #[test]
    fn test_counters_stay_in_closed_form() {
        let mut state = RecurrenceState::initial();
        for _ in 0..40 {
            assert!(state.check_consistency().is_ok());
            state.advance();
        }
        assert_eq!(state.k(), &BigInt::from(12 * 40 - 6));
    }

    #[test]
    fn test_check_consistency_reports_mismatch() {
        let mut state = RecurrenceState::initial();
        state.advance();
        state.k += 1;
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("12q - 6"));

        let mut state = RecurrenceState::initial();
        state.l += 1;
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("545140134q"));

        let mut state = RecurrenceState::initial();
        state.advance();
        state.x = -state.x.clone();
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("(-262537412640768000)^q"));

        let mut state = RecurrenceState::initial();
        state.x = BigInt::zero();
        assert!(state.check_consistency().is_err());
    }

    #[test]
    fn test_check_consistency_rejects_wrong_magnitude_of_x() {
        let mut state = RecurrenceState::initial();
        state.advance_by(3, AdvanceMode::Sequential);
        state.x *= 2;
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("(-262537412640768000)^q"));
    }

    #[test]
    fn test_check_consistency_rejects_non_positive_m() {
        let mut state = RecurrenceState::initial();
        state.m = BigRational::zero();
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("m = 0 is not positive"));

        let mut state = RecurrenceState::initial();
        state.advance();
        state.m = -state.m.clone();
        assert!(state.check_consistency().is_err());
    }

    #[test]
    fn test_check_consistency_rejects_non_positive_series_sum() {
        let mut state = RecurrenceState::initial();
        state.advance_by(2, AdvanceMode::Sequential);
        state.sum = -state.sum.clone();
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("not positive"));

        let mut state = RecurrenceState::initial();
        state.sum = BigRational::from_integer(BigInt::from(-13_591_409));
        let err = state.check_consistency().unwrap_err();
        assert!(err.contains("not zero for q = 0"));
    }

    #[test]
    fn test_reachable_states_are_consistent() {
        let mut state = RecurrenceState::initial();
        for q in 0..30u64 {
            assert_eq!(state.check_consistency(), Ok(()), "q = {}", q);
            state.advance();
        }
    }

    #[test]
    fn test_from_parts_preserves_fields() {
        let mut state = RecurrenceState::initial();
        state.advance_by(3, AdvanceMode::Sequential);

        let rebuilt = RecurrenceState::from_parts(
            state.q(),
            state.sum().clone(),
            state.m().clone(),
            state.k().clone(),
            state.l().clone(),
            state.x().clone(),
        );
        assert_eq!(rebuilt, state);
    }
}

//! Fork-join execution of a single advance.
//!
//! Each phase writes disjoint fields and reads only values fixed before the
//! phase starts, so the tasks need no synchronisation beyond the join that
//! closes the phase.

use super::state::{scale_m, term_of, RecurrenceState};
use crate::constants::{K_STEP, L_STEP, X_FACTOR};

impl RecurrenceState {
    pub(super) fn advance_fork_join(&mut self) {
        let RecurrenceState { q, sum, m, k, l, x } = self;
        let q_before = *q;

        // Phase 1: fold term q into the sum, bump k.
        {
            let (m, l, x) = (&*m, &*l, &*x);
            rayon::join(|| *sum += term_of(m, l, x), || *k += K_STEP);
        }

        // Phase 2: m needs the new k and the old q.
        let k = &*k;
        rayon::join(
            || scale_m(m, k, q_before),
            || rayon::join(|| *l += L_STEP, || *x *= X_FACTOR),
        );

        *q += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::super::AdvanceMode;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fork_join_matches_sequential_step_by_step() {
        let mut sequential = RecurrenceState::initial();
        let mut fork_join = RecurrenceState::initial();

        for _ in 0..40 {
            sequential.advance_with(AdvanceMode::Sequential);
            fork_join.advance_with(AdvanceMode::ForkJoin);
            assert_eq!(sequential, fork_join, "diverged at q = {}", sequential.q());
        }
    }

    #[test]
    fn test_fork_join_on_dedicated_pool() {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(3)
            .build()
            .unwrap();

        let mut expected = RecurrenceState::initial();
        expected.advance_by(15, AdvanceMode::Sequential);

        let mut actual = RecurrenceState::initial();
        pool.install(|| actual.advance_by(15, AdvanceMode::ForkJoin));

        assert_eq!(actual, expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_modes_agree(steps in 0u64..60) {
            let mut sequential = RecurrenceState::initial();
            let mut fork_join = RecurrenceState::initial();
            sequential.advance_by(steps, AdvanceMode::Sequential);
            fork_join.advance_by(steps, AdvanceMode::ForkJoin);
            prop_assert_eq!(sequential, fork_join);
        }
    }
}

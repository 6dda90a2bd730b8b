use crate::error::ExperimentError;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    Uninitialized,
    /// Shuffled, nothing drawn yet.
    Ready,
    Draining,
    Exhausted,
}

/// Trial indices `1..=n` in random order, each handed out once.
#[derive(Debug, Clone, Default)]
pub struct TrialPool {
    stack: Vec<usize>,
    initialized: bool,
    drawn: usize,
}

impl TrialPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuffles `1..=max_trials` into the pool. Later calls are no-ops and
    /// return false.
    pub fn initialize<R: Rng + ?Sized>(&mut self, max_trials: usize, rng: &mut R) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.stack = (1..=max_trials).collect();
        self.stack.shuffle(rng);
        debug!("trial order (last drawn first): {:?}", self.stack);
        true
    }

    pub fn next_trial(&mut self) -> Result<usize, ExperimentError> {
        let index = self.stack.pop().ok_or(ExperimentError::EmptyPool)?;
        self.drawn += 1;
        Ok(index)
    }

    pub fn remaining(&self) -> usize {
        self.stack.len()
    }

    pub fn state(&self) -> PoolState {
        if !self.initialized {
            PoolState::Uninitialized
        } else if self.stack.is_empty() {
            PoolState::Exhausted
        } else if self.drawn == 0 {
            PoolState::Ready
        } else {
            PoolState::Draining
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn walks_through_every_state() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut pool = TrialPool::new();
        assert_eq!(pool.state(), PoolState::Uninitialized);
        assert!(matches!(pool.next_trial(), Err(ExperimentError::EmptyPool)));

        assert!(pool.initialize(3, &mut rng));
        assert_eq!(pool.state(), PoolState::Ready);

        pool.next_trial().unwrap();
        assert_eq!(pool.state(), PoolState::Draining);
        pool.next_trial().unwrap();
        assert_eq!(pool.state(), PoolState::Draining);
        pool.next_trial().unwrap();
        assert_eq!(pool.state(), PoolState::Exhausted);
        assert!(matches!(pool.next_trial(), Err(ExperimentError::EmptyPool)));
    }

    #[test]
    fn second_initialize_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = TrialPool::new();
        pool.initialize(3, &mut rng);
        pool.next_trial().unwrap();

        assert!(!pool.initialize(10, &mut rng));
        assert_eq!(pool.remaining(), 2);
    }

    #[test]
    fn same_seed_same_order() {
        let draw = |seed| {
            let mut pool = TrialPool::new();
            pool.initialize(20, &mut StdRng::seed_from_u64(seed));
            (0..20).map(|_| pool.next_trial().unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(draw(9), draw(9));
    }

    proptest! {
        #[test]
        fn prop_draws_are_a_permutation(n in 0usize..64, seed in any::<u64>()) {
            let mut pool = TrialPool::new();
            pool.initialize(n, &mut StdRng::seed_from_u64(seed));

            let mut drawn: Vec<usize> = (0..n).map(|_| pool.next_trial().unwrap()).collect();
            drawn.sort_unstable();
            prop_assert_eq!(drawn, (1..=n).collect::<Vec<_>>());
            prop_assert_eq!(pool.state(), PoolState::Exhausted);
            prop_assert!(matches!(pool.next_trial(), Err(ExperimentError::EmptyPool)));
        }
    }
}

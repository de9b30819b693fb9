use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

use crate::node::PriorityRange;

/// Settings a [`Treap`](crate::Treap) is built from.
///
/// Without a seed the map's generator is seeded from OS entropy, so two maps
/// fed the same keys end up with different shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub priorities: PriorityRange,
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_priorities(mut self, priorities: PriorityRange) -> Config {
        self.priorities = priorities;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Config {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> XorShiftRng {
        match self.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn default_uses_full_range_and_no_seed() {
        let config = Config::default();
        assert_eq!(config.priorities, PriorityRange::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn seeded_generators_repeat() {
        let config = Config::default()
            .with_priorities(PriorityRange::NARROW)
            .with_seed(123);
        assert_eq!(config.priorities, PriorityRange::NARROW);
        let (mut a, mut b) = (config.rng(), config.rng());
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}

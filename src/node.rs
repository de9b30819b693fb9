use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{Error, Result};

pub type Priority = u32;

/// Owning link to a subtree. `None` is the empty tree.
pub type NodePtr<K, V> = Option<Box<Node<K, V>>>;

/// Inclusive range that random priorities are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityRange {
    low: Priority,
    high: Priority,
}

impl PriorityRange {
    /// `1..=100`. Trees past a few hundred keys get many priority ties with it.
    pub const NARROW: PriorityRange = PriorityRange { low: 1, high: 100 };

    pub fn new(low: Priority, high: Priority) -> Result<PriorityRange> {
        if low > high {
            return Err(Error::InvalidConstruction { low, high });
        }
        Ok(PriorityRange { low, high })
    }

    pub fn low(&self) -> Priority {
        self.low
    }

    pub fn high(&self) -> Priority {
        self.high
    }

    pub fn contains(&self, priority: Priority) -> bool {
        self.low <= priority && priority <= self.high
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Priority {
        Uniform::new_inclusive(self.low, self.high).sample(rng)
    }
}

impl Default for PriorityRange {
    fn default() -> PriorityRange {
        PriorityRange {
            low: 1,
            high: Priority::MAX,
        }
    }
}

/// One entry of a treap together with the subtrees it owns.
///
/// A node's priority is fixed when it is built. Rotations, splits and merges
/// move whole nodes between links but never touch their priorities.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) priority: Priority,
    pub(crate) left: NodePtr<K, V>,
    pub(crate) right: NodePtr<K, V>,
}

impl<K, V> Node<K, V> {
    /// Builds a leaf with a priority drawn from [`PriorityRange::default`].
    pub fn new(key: K, value: V) -> Node<K, V> {
        let priority = PriorityRange::default().sample(&mut rand::thread_rng());
        Node::with_priority(key, value, priority)
    }

    pub fn with_priority(key: K, value: V, priority: Priority) -> Node<K, V> {
        Node {
            key,
            value,
            priority,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn left(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn new_node_is_a_leaf() {
        let node = Node::new(8, vec![1, 4]);
        assert_eq!(*node.key(), 8);
        assert_eq!(*node.value(), vec![1, 4]);
        assert!(PriorityRange::default().contains(node.priority()));
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn explicit_priority_is_kept() {
        let node = Node::with_priority(3, 7, 42);
        assert_eq!(node.priority(), 42);
        assert_eq!(node.into_entry(), (3, 7));
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert_eq!(
            PriorityRange::new(10, 1),
            Err(Error::InvalidConstruction { low: 10, high: 1 })
        );
        let single = PriorityRange::new(5, 5).unwrap();
        assert_eq!((single.low(), single.high()), (5, 5));
    }

    #[test]
    fn samples_stay_in_range() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let narrow = PriorityRange::NARROW;
        for _ in 0..1000 {
            let p = narrow.sample(&mut rng);
            assert!(p >= 1 && p <= 100);
        }
        let single = PriorityRange::new(9, 9).unwrap();
        assert_eq!(single.sample(&mut rng), 9);
        let full = PriorityRange::new(0, Priority::MAX).unwrap();
        full.sample(&mut rng);
    }
}

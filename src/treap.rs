use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use log::{debug, trace};
use rand::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter, Keys, Values};
use crate::node::{Node, NodePtr, Priority, PriorityRange};

/// An ordered map kept as a treap: a binary search tree on keys that is also
/// a max-heap on randomly drawn node priorities.
///
/// Every operation walks a single root-to-leaf path, so lookup, insertion,
/// removal, [`split`](Treap::split) and [`merge`](Treap::merge) take
/// expected `O(log n)` time. There is no worst-case height bound.
///
/// ```
/// use ordered_treap::Treap;
///
/// let mut t = Treap::new();
/// t.insert(1, "a");
/// t.insert(2, "b");
/// t.insert(3, "c");
/// assert_eq!(t.to_string(), "{1: a, 2: b, 3: c}");
///
/// let (low, high) = t.split(&2);
/// assert_eq!(low.keys().collect::<Vec<_>>(), vec![&1]);
/// assert_eq!(high.keys().collect::<Vec<_>>(), vec![&2, &3]);
/// ```
#[derive(Clone)]
pub struct Treap<K, V> {
    root: NodePtr<K, V>,
    priorities: PriorityRange,
    rng: XorShiftRng,
}

impl<K, V> Treap<K, V> {
    pub fn new() -> Treap<K, V> {
        Treap::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Treap<K, V> {
        debug!(
            "new treap, priorities {}..={}, seed {:?}",
            config.priorities.low(),
            config.priorities.high(),
            config.seed
        );
        Treap {
            root: None,
            priorities: config.priorities,
            rng: config.rng(),
        }
    }

    pub fn with_rng(rng: XorShiftRng) -> Treap<K, V> {
        Treap {
            root: None,
            priorities: PriorityRange::default(),
            rng,
        }
    }

    /// Wraps a tree produced by [`split_nodes`](Treap::split_nodes),
    /// [`merge_nodes`](Treap::merge_nodes) or [`into_root`](Treap::into_root).
    ///
    /// The tree is taken as is; it must already be ordered on keys and on
    /// priorities.
    pub fn from_root(root: NodePtr<K, V>) -> Treap<K, V> {
        let mut treap = Treap::new();
        treap.root = root;
        treap
    }

    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    pub fn into_root(self) -> NodePtr<K, V> {
        self.root
    }

    pub fn priorities(&self) -> PriorityRange {
        self.priorities
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of entries. Walks the whole tree.
    pub fn len(&self) -> usize {
        fn count_nodes<K, V>(node: Option<&Node<K, V>>) -> usize {
            node.map_or(0, |n| 1 + count_nodes(n.left()) + count_nodes(n.right()))
        }

        count_nodes(self.root())
    }

    /// Nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        fn height_node<K, V>(node: Option<&Node<K, V>>) -> usize {
            node.map_or(0, |n| 1 + usize::max(height_node(n.left()), height_node(n.right())))
        }

        height_node(self.root())
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::ascending(self.root())
    }

    pub fn iter_rev(&self) -> Iter<'_, K, V> {
        Iter::descending(self.root())
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn keys_rev(&self) -> Keys<'_, K, V> {
        Keys(self.iter_rev())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Joins two trees into one. Every key of `left` must be less than every
    /// key of `right`; this is not checked.
    ///
    /// On equal root priorities the root of `right` stays on top.
    pub fn merge_nodes(left: NodePtr<K, V>, right: NodePtr<K, V>) -> NodePtr<K, V> {
        merge_links(left, right)
    }

    /// Map-level [`merge_nodes`](Treap::merge_nodes). The result keeps the
    /// priority range and generator of `left`.
    pub fn merge(mut left: Treap<K, V>, right: Treap<K, V>) -> Treap<K, V> {
        debug!("merging treaps");
        left.root = merge_links(left.root.take(), right.root);
        left
    }
}

impl<K: Ord, V> Treap<K, V> {
    /// Inserts `value` under `key` with a freshly drawn priority.
    ///
    /// If the key is already present only its value is replaced; the node
    /// keeps its place and priority, and the old value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let priority = self.priorities.sample(&mut self.rng);
        self.insert_with_priority(key, value, priority)
    }

    /// [`insert`](Treap::insert) with an explicit priority, for reproducible
    /// shapes. The priority is ignored when the key already exists.
    pub fn insert_with_priority(&mut self, key: K, value: V, priority: Priority) -> Option<V> {
        fn insert_node<K: Ord, V>(
            node: NodePtr<K, V>,
            key: K,
            value: V,
            priority: Priority,
        ) -> (Box<Node<K, V>>, Option<V>) {
            let mut node = match node {
                None => return (Box::new(Node::with_priority(key, value, priority)), None),
                Some(node) => node,
            };
            match key.cmp(&node.key) {
                Ordering::Equal => {
                    let old = mem::replace(&mut node.value, value);
                    (node, Some(old))
                }
                Ordering::Less => {
                    let (left, old) = insert_node(node.left.take(), key, value, priority);
                    let lift = left.priority > node.priority;
                    node.left = Some(left);
                    (if lift { rotate_right(node) } else { node }, old)
                }
                Ordering::Greater => {
                    let (right, old) = insert_node(node.right.take(), key, value, priority);
                    let lift = right.priority > node.priority;
                    node.right = Some(right);
                    (if lift { rotate_left(node) } else { node }, old)
                }
            }
        }

        let (root, old) = insert_node(self.root.take(), key, value, priority);
        self.root = Some(root);
        old
    }

    fn find(&self, key: &K) -> Option<&Node<K, V>> {
        fn search_node<'t, K: Ord, V>(node: Option<&'t Node<K, V>>, key: &K) -> Option<&'t Node<K, V>> {
            let entry = node?;
            match key.cmp(&entry.key) {
                Ordering::Equal => Some(entry),
                Ordering::Less => search_node(entry.left(), key),
                Ordering::Greater => search_node(entry.right(), key),
            }
        }

        search_node(self.root(), key)
    }

    pub fn get(&self, key: &K) -> Result<&V> {
        self.find(key).map(|node| &node.value).ok_or(Error::KeyNotFound)
    }

    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        fn search_node<'t, K: Ord, V>(node: &'t mut NodePtr<K, V>, key: &K) -> Option<&'t mut V> {
            let entry = node.as_mut()?;
            match key.cmp(&entry.key) {
                Ordering::Equal => Some(&mut entry.value),
                Ordering::Less => search_node(&mut entry.left, key),
                Ordering::Greater => search_node(&mut entry.right, key),
            }
        }

        search_node(&mut self.root, key).ok_or(Error::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Result<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` and returns the stored key and value.
    ///
    /// The removed node is replaced by the merge of its two subtrees, so
    /// nothing above it moves.
    pub fn remove_entry(&mut self, key: &K) -> Result<(K, V)> {
        fn remove_node<K: Ord, V>(link: &mut NodePtr<K, V>, key: &K) -> Option<(K, V)> {
            let entry = link.as_mut()?;
            match key.cmp(&entry.key) {
                Ordering::Less => remove_node(&mut entry.left, key),
                Ordering::Greater => remove_node(&mut entry.right, key),
                Ordering::Equal => {
                    let mut node = link.take()?;
                    *link = merge_links(node.left.take(), node.right.take());
                    Some(node.into_entry())
                }
            }
        }

        let removed = remove_node(&mut self.root, key);
        if removed.is_none() {
            trace!("remove: key not found");
        }
        removed.ok_or(Error::KeyNotFound)
    }

    /// Cuts a tree in two: keys less than `key` on the left, keys greater
    /// than or equal to `key` on the right. Priorities are never compared.
    pub fn split_nodes(node: NodePtr<K, V>, key: &K) -> (NodePtr<K, V>, NodePtr<K, V>) {
        split_links(node, key)
    }

    /// Map-level [`split_nodes`](Treap::split_nodes).
    pub fn split(mut self, key: &K) -> (Treap<K, V>, Treap<K, V>) {
        let right = self.split_off(key);
        (self, right)
    }

    /// Moves every entry with a key greater than or equal to `key` into a new
    /// map, which gets the same priority range and a generator seeded from
    /// this one.
    pub fn split_off(&mut self, key: &K) -> Treap<K, V> {
        debug!("splitting treap");
        let (left, right) = split_links(self.root.take(), key);
        self.root = left;
        Treap {
            root: right,
            priorities: self.priorities,
            rng: XorShiftRng::seed_from_u64(self.rng.next_u64()),
        }
    }
}

fn split_links<K: Ord, V>(node: NodePtr<K, V>, key: &K) -> (NodePtr<K, V>, NodePtr<K, V>) {
    let mut node = match node {
        None => return (None, None),
        Some(node) => node,
    };
    if node.key >= *key {
        let (left, right) = split_links(node.left.take(), key);
        node.left = right;
        (left, Some(node))
    } else {
        let (left, right) = split_links(node.right.take(), key);
        node.right = left;
        (Some(node), right)
    }
}

fn merge_links<K, V>(left: NodePtr<K, V>, right: NodePtr<K, V>) -> NodePtr<K, V> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut left), Some(mut right)) => {
            if left.priority > right.priority {
                left.right = merge_links(left.right.take(), Some(right));
                Some(left)
            } else {
                right.left = merge_links(Some(left), right.left.take());
                Some(right)
            }
        }
    }
}

// The left child becomes the subtree root.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.left.take() {
        None => node,
        Some(mut pivot) => {
            trace!("rotate right, priority {} over {}", pivot.priority, node.priority);
            node.left = pivot.right.take();
            pivot.right = Some(node);
            pivot
        }
    }
}

// The right child becomes the subtree root.
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    match node.right.take() {
        None => node,
        Some(mut pivot) => {
            trace!("rotate left, priority {} over {}", pivot.priority, node.priority);
            node.right = pivot.left.take();
            pivot.left = Some(node);
            pivot
        }
    }
}

impl<K, V> Default for Treap<K, V> {
    fn default() -> Treap<K, V> {
        Treap::new()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Treap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Treap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Treap<K, V> {
    fn eq(&self, other: &Treap<K, V>) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for Treap<K, V> {}

impl<K: Ord, V> Extend<(K, V)> for Treap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Treap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Treap<K, V> {
        let mut treap = Treap::new();
        treap.extend(iter);
        treap
    }
}

impl<'t, K, V> IntoIterator for &'t Treap<K, V> {
    type Item = (&'t K, &'t V);
    type IntoIter = Iter<'t, K, V>;

    fn into_iter(self) -> Iter<'t, K, V> {
        self.iter()
    }
}

impl<K, V> IntoIterator for Treap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter::new(self.root)
    }
}

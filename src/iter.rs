use std::iter::FusedIterator;

use crate::node::{Node, NodePtr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Ascending,
    Descending,
}

/// In-order walk over borrowed entries, driven by an explicit stack.
///
/// The stack holds the path of nodes whose entry has not been yielded yet,
/// so it never grows past the height of the tree.
#[derive(Debug, Clone)]
pub struct Iter<'t, K, V> {
    stack: Vec<&'t Node<K, V>>,
    order: Order,
}

impl<'t, K, V> Iter<'t, K, V> {
    pub(crate) fn ascending(root: Option<&'t Node<K, V>>) -> Iter<'t, K, V> {
        Iter::start(root, Order::Ascending)
    }

    pub(crate) fn descending(root: Option<&'t Node<K, V>>) -> Iter<'t, K, V> {
        Iter::start(root, Order::Descending)
    }

    fn start(root: Option<&'t Node<K, V>>, order: Order) -> Iter<'t, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            order,
        };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut node: Option<&'t Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = match self.order {
                Order::Ascending => n.left(),
                Order::Descending => n.right(),
            };
        }
    }
}

impl<'t, K, V> Iterator for Iter<'t, K, V> {
    type Item = (&'t K, &'t V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let next = match self.order {
            Order::Ascending => node.right(),
            Order::Descending => node.left(),
        };
        self.descend(next);
        Some((&node.key, &node.value))
    }
}

impl<'t, K, V> FusedIterator for Iter<'t, K, V> {}

#[derive(Debug, Clone)]
pub struct Keys<'t, K, V>(pub(crate) Iter<'t, K, V>);

impl<'t, K, V> Iterator for Keys<'t, K, V> {
    type Item = &'t K;

    fn next(&mut self) -> Option<&'t K> {
        self.0.next().map(|(k, _)| k)
    }
}

impl<'t, K, V> FusedIterator for Keys<'t, K, V> {}

#[derive(Debug, Clone)]
pub struct Values<'t, K, V>(pub(crate) Iter<'t, K, V>);

impl<'t, K, V> Iterator for Values<'t, K, V> {
    type Item = &'t V;

    fn next(&mut self) -> Option<&'t V> {
        self.0.next().map(|(_, v)| v)
    }
}

impl<'t, K, V> FusedIterator for Values<'t, K, V> {}

/// Ascending walk that takes the tree apart as it goes.
#[derive(Debug)]
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: NodePtr<K, V>) -> IntoIter<K, V> {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.descend(root);
        iter
    }

    fn descend(&mut self, mut node: NodePtr<K, V>) {
        while let Some(mut n) = node {
            node = n.left.take();
            self.stack.push(n);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let mut node = self.stack.pop()?;
        self.descend(node.right.take());
        Some(node.into_entry())
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

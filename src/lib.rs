//! Ordered map built on a treap.
//!
//! [`Treap`] is a binary search tree on keys and, at the same time, a max-heap
//! on priorities drawn at random when each node is created. Random priorities
//! keep the expected height logarithmic without any rebalancing rules.
//! Besides the usual map operations it exposes the two structural primitives
//! the rest is built from: [`Treap::split`] cuts a map at a key and
//! [`Treap::merge`] joins two maps whose key ranges do not overlap.
//!
//! The map is single-threaded and mutated in place. Callers that share one
//! across threads must wrap it in their own lock.

mod config;
mod error;
mod iter;
mod node;
mod treap;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::iter::{IntoIter, Iter, Keys, Values};
pub use crate::node::{Node, NodePtr, Priority, PriorityRange};
pub use crate::treap::Treap;

pub use rand_xorshift::XorShiftRng;

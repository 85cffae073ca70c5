//! The node type shared by every part of the map. A `Node` is both an entry and the root of the
//! subtree below it, so every algorithm here is written once, recursively, against `Node` and
//! the owning [`Link`] slots that hold nodes.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::error::{InvariantViolation, Side};

/// An owning slot for a subtree. Empty slots are the bottoms of the tree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn left_mut(&mut self) -> Option<&mut Self> {
        self.left.as_deref_mut()
    }

    fn right_mut(&mut self) -> Option<&mut Self> {
        self.right.as_deref_mut()
    }

    pub(crate) fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().and_then(|n| n.find(key)),
            Ordering::Equal => Some(&self.value),
            Ordering::Greater => self.right().and_then(|n| n.find(key)),
        }
    }

    pub(crate) fn find_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left_mut().and_then(|n| n.find_mut(key)),
            Ordering::Equal => Some(&mut self.value),
            Ordering::Greater => self.right_mut().and_then(|n| n.find_mut(key)),
        }
    }

    /// Inserts `value` at `key` somewhere in this subtree, returning the value it replaced if the
    /// key was already present. New keys always land in a fresh leaf; nothing is ever rotated.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let replaced = match key.cmp(&self.key) {
            Ordering::Less => match self.left_mut() {
                Some(left) => left.insert(key, value),
                None => {
                    self.left = Some(Self::new_boxed(key, value));
                    None
                }
            },
            Ordering::Equal => Some(mem::replace(&mut self.value, value)),
            Ordering::Greater => match self.right_mut() {
                Some(right) => right.insert(key, value),
                None => {
                    self.right = Some(Self::new_boxed(key, value));
                    None
                }
            },
        };

        if cfg!(debug_assertions) {
            if let Some(left) = self.left() {
                assert!(self.key > left.key);
            }
            if let Some(right) = self.right() {
                assert!(self.key < right.key);
            }
        }

        replaced
    }

    /// The left-most (smallest) node of this subtree.
    pub(crate) fn leftmost(&self) -> &Self {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// The right-most (largest) node of this subtree.
    pub(crate) fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Number of nodes on the longest path from this node down to a leaf, this node included.
    pub(crate) fn height(&self) -> usize {
        let left_height = self.left().map_or(0, |n| n.height());
        let right_height = self.right().map_or(0, |n| n.height());
        left_height.max(right_height) + 1
    }

    /// Verifies the ordering invariant for this subtree. `lower` and `upper` are the nearest
    /// ancestors this subtree lies to the right and to the left of, respectively.
    pub(crate) fn check_order(
        &self,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation>
    where
        K: Ord + fmt::Debug,
    {
        if let Some(left) = self.left() {
            if left.key >= self.key {
                return Err(violation(&self.key, &left.key, Side::Left));
            }
        }
        if let Some(right) = self.right() {
            if right.key <= self.key {
                return Err(violation(&self.key, &right.key, Side::Right));
            }
        }
        if let Some(lower) = lower {
            if self.key <= *lower {
                return Err(violation(lower, &self.key, Side::Right));
            }
        }
        if let Some(upper) = upper {
            if self.key >= *upper {
                return Err(violation(upper, &self.key, Side::Left));
            }
        }

        if let Some(left) = self.left() {
            left.check_order(lower, Some(&self.key))?;
        }
        if let Some(right) = self.right() {
            right.check_order(Some(&self.key), upper)?;
        }
        Ok(())
    }
}

fn violation<K: fmt::Debug>(ancestor: &K, child: &K, side: Side) -> InvariantViolation {
    InvariantViolation {
        ancestor: format!("{:?}", ancestor),
        child: format!("{:?}", child),
        side,
    }
}

/// Deletes the node holding `key` from the subtree owned by `link` and returns its entry.
///
/// The search finishes before anything is detached, so a missing key leaves the subtree exactly
/// as it was. Because the caller hands us the slot that owns the subtree, removing a node never
/// needs a pointer back to its parent.
pub(crate) fn delete<K, V>(link: &mut Link<K, V>, key: &K) -> Option<(K, V)>
where
    K: Ord,
{
    let node = link.as_deref_mut()?;
    match key.cmp(&node.key) {
        Ordering::Less => delete(&mut node.left, key),
        Ordering::Equal => unlink(link),
        Ordering::Greater => delete(&mut node.right, key),
    }
}

/// Removes the node at the top of `link`, keeping the rest of its subtree in place.
///
/// * A leaf is simply dropped from its slot.
/// * A node with one child absorbs that child's key, value and children; the child's box goes.
/// * A node with two children takes over the key and value of its in-order successor, which is
///   then removed from its own slot by one of the two cases above.
fn unlink<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let node = link.as_deref_mut()?;
    match (node.left.is_some(), node.right.is_some()) {
        (false, false) => {
            tracing::trace!("removing leaf");
            let leaf = link.take()?;
            Some((leaf.key, leaf.value))
        }
        (true, false) | (false, true) => {
            tracing::trace!("absorbing only child");
            let child = node.left.take().or_else(|| node.right.take())?;
            let removed = mem::replace(node, *child);
            Some((removed.key, removed.value))
        }
        (true, true) => {
            tracing::trace!("splicing in-order successor");
            let (key, value) = take_leftmost(&mut node.right)?;
            let key = mem::replace(&mut node.key, key);
            let value = mem::replace(&mut node.value, value);
            Some((key, value))
        }
    }
}

/// Removes the smallest node of the subtree owned by `link`. That node has no left child, so
/// [`unlink`] always handles it as a leaf or a single-child node.
fn take_leftmost<K, V>(link: &mut Link<K, V>) -> Option<(K, V)> {
    let node = link.as_deref_mut()?;
    if node.left.is_some() {
        take_leftmost(&mut node.left)
    } else {
        unlink(link)
    }
}

//! In-order iterators over a [`BstMap`][crate::BstMap].
//!
//! Every iterator keeps an explicit stack of the ancestors it still has to visit, so walking a
//! tree never recurses and the stack never holds more entries than the tree is deep.

use std::iter::FusedIterator;

use crate::node::{Link, Node};

/// An iterator over the entries of a [`BstMap`][crate::BstMap] in ascending key order.
///
/// Created by [`BstMap::iter`][crate::BstMap::iter].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`BstMap`][crate::BstMap] in ascending key order.
/// Keys stay immutable so the ordering can't be broken through it.
///
/// Created by [`BstMap::iter_mut`][crate::BstMap::iter_mut].
pub struct IterMut<'a, K, V> {
    // Each node is split into its key, its value and its right subtree as it's pushed. The left
    // subtree has already been walked down by then.
    stack: Vec<(&'a K, &'a mut V, Option<&'a mut Node<K, V>>)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(root: Option<&'a mut Node<K, V>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a mut Node<K, V>>) {
        while let Some(n) = node {
            let Node {
                key,
                value,
                left,
                right,
            } = n;
            self.stack.push((&*key, value, right.as_deref_mut()));
            node = left.as_deref_mut();
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value, right) = self.stack.pop()?;
        self.push_left_spine(right);
        Some((key, value))
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`BstMap`][crate::BstMap] in ascending key order.
///
/// Created by the [`IntoIterator`] impl on [`BstMap`][crate::BstMap].
pub struct IntoIter<K, V> {
    stack: Vec<Box<Node<K, V>>>,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(root: Link<K, V>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Link<K, V>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        let Node { key, value, .. } = *node;
        Some((key, value))
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Drop for IntoIter<K, V> {
    fn drop(&mut self) {
        // Dismantle whatever wasn't consumed one node at a time instead of recursively.
        for _ in self.by_ref() {}
    }
}

/// An iterator over the keys of a [`BstMap`][crate::BstMap] in ascending order.
///
/// Created by [`BstMap::keys`][crate::BstMap::keys].
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`BstMap`][crate::BstMap], ordered by their keys.
///
/// Created by [`BstMap::values`][crate::BstMap::values].
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`BstMap`][crate::BstMap], ordered by their keys.
///
/// Created by [`BstMap::values_mut`][crate::BstMap::values_mut].
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

//! An ordered map backed by a plain, unbalanced Binary Search Tree.
//!
//! # Examples
//!
//! ```
//! use bstmap::{BstMap, Error};
//!
//! let mut map = BstMap::new();
//!
//! // Nothing in here yet.
//! assert_eq!(map.get(&1), Err(Error::KeyNotFound));
//!
//! map.insert(1, 2);
//! assert_eq!(map.get(&1), Ok(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! map.insert(1, 3);
//! assert_eq!(map.get(&1), Ok(&3));
//!
//! // Deleting a key returns its value.
//! assert_eq!(map.delete(&1), Ok(3));
//! assert!(!map.contains_key(&1));
//! assert_eq!(map.delete(&1), Err(Error::KeyNotFound));
//! ```

use std::fmt;
use std::ops::Index;

use crate::error::{Error, InvariantViolation};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::node::{self, Link, Node};

/// An ordered map from keys to values stored in a Binary Search Tree.
///
/// Keys are ordered by their [`Ord`] implementation. The tree is never rebalanced: its shape is
/// decided entirely by the order keys are inserted in, so inserting keys that are already sorted
/// produces a tree as deep as it is long and lookups degrade to `O(n)`.
#[derive(Clone)]
pub struct BstMap<K, V> {
    // `None` is the empty map. Every non-empty map is just its root node.
    root: Link<K, V>,
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for BstMap<K, V> {
    fn drop(&mut self) {
        // The default recursive drop would need a stack frame per level, and a degenerate tree
        // has as many levels as entries.
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K, V> BstMap<K, V> {
    /// Generate a new, empty `BstMap`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Builds a map whose root is the first of `entries`, inserting the rest in order. Later
    /// entries overwrite earlier ones with the same key.
    ///
    /// Use [`FromIterator`] (i.e. `collect`) when an empty map is an acceptable result.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInit`] if `entries` yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::{BstMap, Error};
    ///
    /// let map = BstMap::from_entries([(2, 'b'), (1, 'a')]).unwrap();
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);
    ///
    /// let empty = BstMap::<i32, char>::from_entries([]);
    /// assert_eq!(empty.unwrap_err(), Error::EmptyInit);
    /// ```
    pub fn from_entries<I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Ord,
    {
        let mut entries = entries.into_iter();
        let (key, value) = entries.next().ok_or(Error::EmptyInit)?;
        tracing::trace!("seeding map from entries");

        let mut map = Self {
            root: Some(Node::new_boxed(key, value)),
        };
        map.extend(entries);
        Ok(map)
    }

    /// Returns the value associated with the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.get(&1), Ok(&2));
    /// assert_eq!(map.get(&42), Err(Error::KeyNotFound));
    /// ```
    pub fn get(&self, key: &K) -> Result<&V, Error>
    where
        K: Ord,
    {
        self.find(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with the given key.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has the key.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V, Error>
    where
        K: Ord,
    {
        self.root
            .as_deref_mut()
            .and_then(|n| n.find_mut(key))
            .ok_or(Error::KeyNotFound)
    }

    /// Potentially finds the value associated with the given key. If no entry has the key, `None`
    /// is returned.
    pub fn find(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.root().and_then(|n| n.find(key))
    }

    /// Whether the map has an entry for the given key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Inserts the given value into the map at the given key. Inserting a new value for an
    /// existing key overwrites its value and returns the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::BstMap;
    ///
    /// let mut map = BstMap::new();
    ///
    /// assert_eq!(map.insert(1, 2), None);
    /// assert_eq!(map.insert(1, 3), Some(2));
    /// assert_eq!(map.get(&1), Ok(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        match self.root.as_deref_mut() {
            Some(root) => root.insert(key, value),
            None => {
                self.root = Some(Node::new_boxed(key, value));
                None
            }
        }
    }

    /// Deletes the entry with the given key from the map and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if no entry has the key, in which case the map is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::{BstMap, Error};
    ///
    /// let mut map = BstMap::new();
    /// map.insert(1, 2);
    ///
    /// assert_eq!(map.delete(&1), Ok(2));
    /// assert_eq!(map.delete(&1), Err(Error::KeyNotFound));
    /// assert!(map.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> Result<V, Error>
    where
        K: Ord,
    {
        self.remove(key).ok_or(Error::KeyNotFound)
    }

    /// Like [`BstMap::delete`] but returns `None` for a missing key.
    pub fn remove(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        node::delete(&mut self.root, key).map(|(_, value)| value)
    }

    /// Number of entries in the map. This walks the whole tree, so it is `O(n)`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Number of nodes on the longest path from the root to a leaf; `0` for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstmap::BstMap;
    ///
    /// // Sorted insertions leave the tree as a chain.
    /// let chain: BstMap<_, _> = (0..10).map(|i| (i, i)).collect();
    /// assert_eq!(chain.height(), 10);
    /// ```
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// The entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root()
            .map(Node::leftmost)
            .map(|n| (&n.key, &n.value))
    }

    /// The entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root()
            .map(Node::rightmost)
            .map(|n| (&n.key, &n.value))
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root())
    }

    /// Iterates over the entries in ascending key order with mutable access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self.root.as_deref_mut())
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterates over the values in ascending order of their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Iterates mutably over the values in ascending order of their keys.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Walks every node and checks that its key is greater than everything in its left subtree
    /// and less than everything in its right subtree.
    ///
    /// This is a diagnostic for tests. A map only ever built through its own API always passes.
    ///
    /// # Errors
    ///
    /// An [`InvariantViolation`] describing the first misplaced key found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation>
    where
        K: Ord + fmt::Debug,
    {
        self.root().map_or(Ok(()), |n| n.check_order(None, None))
    }

    fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
}

impl<K, V> fmt::Debug for BstMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders the map as `{k1: v1, k2: v2}` in key order.
impl<K, V> fmt::Display for BstMap<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        f.write_str("}")
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for BstMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for BstMap<K, V> {}

impl<K: Ord, V> Index<&K> for BstMap<K, V> {
    type Output = V;

    /// # Panics
    ///
    /// When the key is not in the map.
    fn index(&self, key: &K) -> &V {
        self.find(key).expect("no entry found for key")
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for BstMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.take())
    }
}

impl<'a, K, V> IntoIterator for &'a BstMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BstMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for BstMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
struct BstMapVisitor<K, V> {
    marker: std::marker::PhantomData<BstMap<K, V>>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for BstMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = BstMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = BstMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for BstMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(BstMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

//! An ordered map built on a plain Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and the
//! value associated with it and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`), and the tree naturally
//! supports sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree.
//!
//! [`BstMap`] does no balancing at all. The height of its tree depends only on
//! the order keys arrive in: random insertions keep it around `O(lg N)`, sorted
//! insertions stretch it to `N`.
//!
//! ## Features
//!
//! * `serde` - `Serialize` and `Deserialize` for [`BstMap`], as a map.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod map;
mod node;


pub use crate::error::{Error, InvariantViolation, Side};
pub use crate::map::BstMap;

//! Errors returned by [`BstMap`][crate::BstMap].

use std::fmt;

use thiserror::Error;

/// An error raised by a fallible map operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No node holds the requested key.
    #[error("key not found")]
    KeyNotFound,
    /// A seeded constructor was given no entries.
    #[error("cannot seed a map from an empty sequence of entries")]
    EmptyInit,
}

/// Which child of a node broke the ordering invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The left child (or something in the left subtree).
    Left,
    /// The right child (or something in the right subtree).
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Reported by [`BstMap::check_invariants`][crate::BstMap::check_invariants] when a key sits on
/// the wrong side of one of its ancestors. Keys are rendered with their `Debug` representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key {child} is in the {side} subtree of key {ancestor}")]
pub struct InvariantViolation {
    /// The ancestor whose ordering constraint was broken.
    pub ancestor: String,
    /// The offending key.
    pub child: String,
    /// The subtree of `ancestor` the offending key was found in.
    pub side: Side,
}

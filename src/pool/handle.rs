use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::Record;

/// Stable integer identifier of a record inside a [`Pool`](super::Pool).
///
/// The record type is part of the handle's type, so a vertex handle cannot be
/// passed where a triangle handle is expected. A handle is not a memory
/// address: it stays valid for as long as the pool lives, since pools never
/// delete or recycle records.
pub struct Handle<R: Record> {
    index: u32,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Handle<R> {
    /// Wraps a raw record index.
    ///
    /// No range check is performed; an index outside the pool is caught when
    /// the handle is resolved.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self {
            index,
            _record: PhantomData,
        }
    }

    /// Returns the raw record index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    pub(crate) fn offset(self) -> usize {
        self.index as usize * R::WIDTH
    }
}

impl<R: Record> Clone for Handle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Record> Copy for Handle<R> {}

impl<R: Record> PartialEq for Handle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<R: Record> Eq for Handle<R> {}

impl<R: Record> PartialOrd for Handle<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: Record> Ord for Handle<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<R: Record> Hash for Handle<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<R: Record> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", R::NAME, self.index)
    }
}

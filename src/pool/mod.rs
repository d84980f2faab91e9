//! Append-only stores of fixed-width records addressed by integer handles.
//!
//! Records are packed back to back in one flat `Vec`, so iterating or
//! encoding a pool touches contiguous memory and allocates nothing per
//! record. Records are never removed: a handle handed out by [`Pool::create`]
//! stays valid for the life of the pool.

mod cursor;
mod handle;

pub use cursor::{Cursor, Slot};
pub use handle::Handle;

use std::fmt;
use std::marker::PhantomData;

/// Layout of a fixed-width record stored in a [`Pool`].
pub trait Record {
    /// Scalar type shared by every field of the record.
    type Field: Copy + Default + fmt::Debug;

    /// Number of fields per record.
    const WIDTH: usize;

    /// Record name used in diagnostics.
    const NAME: &'static str;
}

/// Flat, array-backed store of `R` records.
pub struct Pool<R: Record> {
    fields: Vec<R::Field>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Pool<R> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty pool with room for `records` records.
    #[must_use]
    pub fn with_capacity(records: usize) -> Self {
        Self {
            fields: Vec::with_capacity(records.saturating_mul(R::WIDTH)),
            _record: PhantomData,
        }
    }

    /// Number of records in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len() / R::WIDTH
    }

    /// Returns `true` if the pool holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if `handle` addresses a record of this pool.
    #[must_use]
    pub fn contains(&self, handle: Handle<R>) -> bool {
        (handle.index() as usize) < self.len()
    }

    /// Reserves room for at least `additional` more records.
    pub fn reserve(&mut self, additional: usize) {
        self.fields.reserve(additional.saturating_mul(R::WIDTH));
    }

    /// Appends a zeroed record and returns a write-once slot positioned on it.
    ///
    /// # Panics
    ///
    /// Panics if the pool already holds `u32::MAX` records.
    pub fn create(&mut self) -> Slot<'_, R> {
        let Ok(index) = u32::try_from(self.len()) else {
            panic!("{} pool is full", R::NAME);
        };
        let new_len = self.fields.len() + R::WIDTH;
        self.fields.resize(new_len, R::Field::default());
        Slot::new(self, Handle::from_index(index))
    }

    /// Creates a reusable cursor that is not yet positioned on any record.
    #[must_use]
    pub fn create_ref(&self) -> Cursor<'_, R> {
        Cursor::new(self)
    }

    /// Repositions `cursor` onto the record at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is outside the pool.
    pub fn get<'c, 'p>(
        &'p self,
        handle: Handle<R>,
        cursor: &'c mut Cursor<'p, R>,
    ) -> &'c mut Cursor<'p, R> {
        debug_assert!(cursor.belongs_to(self), "cursor used with a foreign pool");
        cursor.seek(handle)
    }

    /// Handles of every record, in storage order.
    pub fn handles(&self) -> impl Iterator<Item = Handle<R>> + '_ {
        // `create` caps the pool at u32::MAX records.
        #[allow(clippy::cast_possible_truncation)]
        let len = self.len() as u32;
        (0..len).map(Handle::from_index)
    }

    pub(crate) fn record(&self, handle: Handle<R>) -> &[R::Field] {
        assert!(
            self.contains(handle),
            "{} handle {} out of range (pool holds {})",
            R::NAME,
            handle.index(),
            self.len()
        );
        let start = handle.offset();
        &self.fields[start..start + R::WIDTH]
    }
}

impl<R: Record> Default for Pool<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Clone for Pool<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> fmt::Debug for Pool<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("record", &R::NAME)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Pair;

    impl Record for Pair {
        type Field = i64;
        const WIDTH: usize = 2;
        const NAME: &'static str = "pair";
    }

    fn pool_of(values: &[[i64; 2]]) -> (Pool<Pair>, Vec<Handle<Pair>>) {
        let mut pool = Pool::with_capacity(values.len());
        let handles = values
            .iter()
            .map(|fields| pool.create().write(fields))
            .collect();
        (pool, handles)
    }

    // ── create ──

    #[test]
    fn handles_are_sequential() {
        let (pool, handles) = pool_of(&[[1, 2], [3, 4], [5, 6]]);
        assert_eq!(pool.len(), 3);
        let indices: Vec<u32> = handles.iter().map(|h| h.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(pool.handles().collect::<Vec<_>>(), handles);
    }

    #[test]
    fn reserve_adds_no_records() {
        let mut pool = Pool::<Pair>::new();
        pool.reserve(16);
        assert!(pool.is_empty());
        assert_eq!(pool.create().handle().index(), 0);
    }

    #[test]
    fn uninitialised_record_is_zeroed() {
        let mut pool = Pool::<Pair>::new();
        let handle = pool.create().handle();
        let mut cursor = pool.create_ref();
        assert_eq!(pool.get(handle, &mut cursor).fields(), &[0, 0]);
    }

    #[test]
    fn slot_reports_its_handle() {
        let (mut pool, _) = pool_of(&[[1, 1]]);
        let slot = pool.create();
        let handle = slot.handle();
        assert_eq!(slot.write(&[7, 8]), handle);
        assert_eq!(handle.index(), 1);
    }

    // ── cursor ──

    #[test]
    fn cursor_is_reused_across_records() {
        let (pool, handles) = pool_of(&[[1, 2], [3, 4], [5, 6]]);
        let mut cursor = pool.create_ref();
        assert!(cursor.handle().is_none());

        let mut seen = Vec::new();
        for &handle in handles.iter().rev() {
            seen.push(pool.get(handle, &mut cursor).field(1));
        }
        assert_eq!(seen, vec![6, 4, 2]);
        assert_eq!(cursor.handle(), Some(handles[0]));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_handle_panics() {
        let (pool, _) = pool_of(&[[1, 2]]);
        let mut cursor = pool.create_ref();
        pool.get(Handle::from_index(5), &mut cursor);
    }

    #[test]
    #[should_panic(expected = "before it was positioned")]
    fn unpositioned_cursor_panics() {
        let (pool, _) = pool_of(&[[1, 2]]);
        let _ = pool.create_ref().fields();
    }

    #[test]
    fn contains_checks_range() {
        let (pool, _) = pool_of(&[[1, 2], [3, 4]]);
        assert!(pool.contains(Handle::from_index(1)));
        assert!(!pool.contains(Handle::from_index(2)));
        assert!(Pool::<Pair>::default().is_empty());
    }
}

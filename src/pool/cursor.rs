use super::{Handle, Pool, Record};

/// Write-once view of a freshly created record.
///
/// Returned by [`Pool::create`]. The record it points at is zeroed until one of
/// the record-specific `init` methods consumes the slot and writes every
/// field; a slot can therefore be initialised at most once.
pub struct Slot<'p, R: Record> {
    pool: &'p mut Pool<R>,
    handle: Handle<R>,
}

impl<'p, R: Record> Slot<'p, R> {
    pub(crate) fn new(pool: &'p mut Pool<R>, handle: Handle<R>) -> Self {
        Self { pool, handle }
    }

    /// Handle of the record this slot writes.
    #[must_use]
    pub fn handle(&self) -> Handle<R> {
        self.handle
    }

    /// Writes all fields of the record and returns its handle.
    pub(crate) fn write(self, fields: &[R::Field]) -> Handle<R> {
        let start = self.handle.offset();
        self.pool.fields[start..start + R::WIDTH].copy_from_slice(fields);
        self.handle
    }
}

/// Reusable read cursor over the records of a [`Pool`].
///
/// A cursor borrows its pool and is repositioned with [`Cursor::seek`] (or
/// [`Pool::get`]), so a single cursor can walk any number of records without
/// allocating. Record-specific accessors live next to the record layouts.
pub struct Cursor<'p, R: Record> {
    pool: &'p Pool<R>,
    handle: Option<Handle<R>>,
    record: &'p [R::Field],
}

impl<'p, R: Record> Cursor<'p, R> {
    pub(crate) fn new(pool: &'p Pool<R>) -> Self {
        Self {
            pool,
            handle: None,
            record: &[],
        }
    }

    /// Moves the cursor onto the record at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is outside the pool.
    pub fn seek(&mut self, handle: Handle<R>) -> &mut Self {
        self.record = self.pool.record(handle);
        self.handle = Some(handle);
        self
    }

    /// Handle of the current record, or `None` before the first seek.
    #[must_use]
    pub fn handle(&self) -> Option<Handle<R>> {
        self.handle
    }

    /// Raw fields of the current record.
    ///
    /// # Panics
    ///
    /// Panics if the cursor has not been positioned yet.
    #[must_use]
    pub fn fields(&self) -> &'p [R::Field] {
        assert!(
            self.handle.is_some(),
            "{} cursor read before it was positioned",
            R::NAME
        );
        self.record
    }

    pub(crate) fn field(&self, index: usize) -> R::Field {
        self.fields()[index]
    }

    pub(crate) fn belongs_to(&self, pool: &Pool<R>) -> bool {
        std::ptr::eq(self.pool, pool)
    }
}

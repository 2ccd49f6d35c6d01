//! Growable per-frame storage.
//!
//! [`DynamicBuffer`] is the container the engine uses for the list of
//! triangles produced each frame. It is a thin layer over `Vec<T>` that makes
//! the growth policy explicit and turns allocation failure into an error
//! instead of an abort:
//!
//! ```text
//! new_capacity = max(occupied + additional, capacity * 2)
//! ```
//!
//! Doubling keeps the number of reallocations logarithmic in the number of
//! appended items.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// `occupied + additional` does not fit in `usize`.
    CapacityOverflow,
    /// The allocator could not provide room for `requested` items.
    OutOfMemory { requested: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::CapacityOverflow => write!(f, "buffer capacity overflow"),
            BufferError::OutOfMemory { requested } => {
                write!(f, "out of memory growing buffer to {} items", requested)
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Capacity a buffer should grow to so that `additional` more items fit.
///
/// Returns `capacity` unchanged when there is already room, and `None` if the
/// required size overflows.
pub fn grown_capacity(occupied: usize, additional: usize, capacity: usize) -> Option<usize> {
    let needed = occupied.checked_add(additional)?;
    if needed <= capacity {
        return Some(capacity);
    }
    Some(needed.max(capacity.saturating_mul(2)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct DynamicBuffer<T> {
    items: Vec<T>,
}

impl<T> Default for DynamicBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicBuffer<T> {
    /// Creates an empty buffer. Nothing is allocated until the first `hold`.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Makes room for `additional` more items, growing the allocation when the
    /// current capacity is exceeded. Existing items keep their positions.
    pub fn hold(&mut self, additional: usize) -> Result<(), BufferError> {
        let occupied = self.items.len();
        let capacity = self.items.capacity();
        let target = grown_capacity(occupied, additional, capacity)
            .ok_or(BufferError::CapacityOverflow)?;

        if target > capacity {
            self.items
                .try_reserve_exact(target - occupied)
                .map_err(|_| BufferError::OutOfMemory { requested: target })?;
        }
        Ok(())
    }

    pub fn push(&mut self, item: T) -> Result<(), BufferError> {
        self.hold(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Number of occupied slots. Zero for a new or freed buffer.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Drops every item but keeps the allocation for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops every item and releases the allocation. The buffer is left in
    /// the same state as [`DynamicBuffer::new`].
    pub fn free(&mut self) {
        self.items = Vec::new();
    }
}

impl<'a, T> IntoIterator for &'a DynamicBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

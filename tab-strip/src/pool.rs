//! Bounded free-lists for released tabs and tab views.

/// A best-effort cache of released instances.
///
/// `acquire` returns `None` when empty, in which case callers allocate a
/// fresh instance. `release` drops the instance once the pool is full.
#[derive(Debug)]
pub(crate) struct Pool<T> {
    free: Vec<T>,
    capacity: usize,
}

impl<T> Pool<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn acquire(&mut self) -> Option<T> {
        self.free.pop()
    }

    /// Returns `false` if the pool was full and `item` was dropped.
    pub(crate) fn release(&mut self, item: T) -> bool {
        if self.free.len() >= self.capacity {
            return false;
        }
        self.free.push(item);
        true
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.free.len()
    }
}

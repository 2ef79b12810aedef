/// Recycling pool for row views.
///
/// A list only ever shows a viewport's worth of rows, so instead of building
/// one view per data row the engine releases views that scroll out of the
/// window and obtains them again for rows that scroll in. Allocation churn is
/// bounded by the change in window size, not by data length.
///
/// The pool is typed: it hands back exactly the view type that was released.
///
/// # Examples
///
/// ```
/// use rvlist::RowViewPool;
///
/// let mut pool: RowViewPool<String> = RowViewPool::new();
/// assert!(pool.obtain().is_none());
/// pool.release("row".to_string());
/// assert_eq!(pool.obtain().as_deref(), Some("row"));
/// ```
///
/// Releasing a view that is still in use, or releasing the same view twice,
/// is a caller bug. The pool does no bookkeeping to detect it.
#[derive(Debug)]
pub struct RowViewPool<V> {
    released: Vec<V>,
}

impl<V> RowViewPool<V> {
    /// Creates a new empty pool.
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    /// Creates a new pool with room for `capacity` released views.
    pub fn with_capacity(capacity: usize) -> Self {
        RowViewPool {
            released: Vec::with_capacity(capacity),
        }
    }

    /// Takes a previously released view, if any.
    ///
    /// `None` means the caller has to construct a new view.
    #[inline]
    pub fn obtain(&mut self) -> Option<V> {
        self.released.pop()
    }

    /// Returns a view to the pool.
    #[inline]
    pub fn release(&mut self, view: V) {
        self.released.push(view);
    }

    /// Returns the number of released views available for reuse.
    pub fn len(&self) -> usize {
        self.released.len()
    }

    /// Returns true if no view is available for reuse.
    pub fn is_empty(&self) -> bool {
        self.released.is_empty()
    }

    /// Iterates over the released views.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.released.iter()
    }

    /// Iterates mutably over the released views (used to refresh them after a theme change).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.released.iter_mut()
    }
}

impl<V> Default for RowViewPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_obtains_nothing() {
        let mut pool: RowViewPool<u32> = RowViewPool::new();
        assert!(pool.obtain().is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_release_then_obtain() {
        let mut pool = RowViewPool::new();
        pool.release(7u32);
        pool.release(8u32);
        assert_eq!(pool.len(), 2);

        let a = pool.obtain();
        let b = pool.obtain();
        assert!(matches!((a, b), (Some(8), Some(7))));
        assert!(pool.obtain().is_none());
    }

    #[test]
    fn test_iter_mut_touches_every_released_view() {
        let mut pool = RowViewPool::new();
        pool.release(1u32);
        pool.release(2u32);
        for view in pool.iter_mut() {
            *view *= 10;
        }
        let mut values: Vec<u32> = pool.iter().copied().collect();
        values.sort();
        assert_eq!(values, vec![10, 20]);
    }
}

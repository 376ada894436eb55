//! Bounded, deduplicated, most-recent-first lists.
//!
//! Backs both the recent-search list (deduplicated by exact string) and the
//! recently-viewed list (deduplicated by product ID).

/// A most-recent-first list that never holds more than `capacity` items and
/// never holds two items with the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedHistory<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty history. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Wrap previously stored items, dropping any beyond `capacity`.
    #[must_use]
    pub fn from_items(mut items: Vec<T>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        items.truncate(capacity);
        Self { items, capacity }
    }

    /// Put `item` at the front, removing earlier entries that share its key
    /// and trimming the tail back to capacity.
    pub fn push_front_by<K, F>(&mut self, item: T, key: F)
    where
        K: PartialEq,
        F: Fn(&T) -> K,
    {
        let new_key = key(&item);
        self.items.retain(|existing| key(existing) != new_key);
        self.items.insert(0, item);
        self.items.truncate(self.capacity);
    }

    /// Items, most recent first.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: PartialEq> BoundedHistory<T> {
    /// [`push_front_by`](Self::push_front_by) keyed on the item itself.
    pub fn push_front(&mut self, item: T)
    where
        T: Clone,
    {
        self.push_front_by(item, Clone::clone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_dedups_and_moves_to_front() {
        let mut history = BoundedHistory::new(5);
        history.push_front("shoes".to_string());
        history.push_front("hats".to_string());
        history.push_front("shoes".to_string());

        assert_eq!(history.items(), ["shoes", "hats"]);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut history = BoundedHistory::new(3);
        for n in 0..50 {
            history.push_front(n);
            assert!(history.len() <= 3);
        }
        assert_eq!(history.items(), [49, 48, 47]);
    }

    #[test]
    fn test_push_front_by_key() {
        let mut history = BoundedHistory::new(10);
        history.push_front_by(("a", 1), |(id, _)| *id);
        history.push_front_by(("b", 2), |(id, _)| *id);
        history.push_front_by(("a", 3), |(id, _)| *id);

        assert_eq!(history.items(), [("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_from_items_truncates() {
        let history = BoundedHistory::from_items(vec![1, 2, 3, 4, 5, 6], 5);
        assert_eq!(history.items(), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut history = BoundedHistory::new(0);
        history.push_front(1);
        history.push_front(2);
        assert_eq!(history.items(), [2]);
    }
}

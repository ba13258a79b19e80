//! Newest-First History Window

use std::collections::vec_deque::{self, VecDeque};
use std::ops::Index;

/// Fixed-capacity sliding window, index 0 is the most recent item
#[derive(Debug, Clone)]
pub struct HistoryWindow<T> {
    /// Owned storage, front = newest
    samples: VecDeque<T>,
    /// Maximum number of retained items
    capacity: usize,
}

impl<T> HistoryWindow<T> {
    /// Create an empty window holding at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Window capacity must be > 0");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new head, returning the evicted tail if the window was full
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.samples.len() >= self.capacity {
            self.samples.pop_back()
        } else {
            None
        };
        self.samples.push_front(item);
        evicted
    }

    /// Item at `index` (0 = newest)
    pub fn get(&self, index: usize) -> Option<&T> {
        self.samples.get(index)
    }

    /// Most recent item
    pub fn front(&self) -> Option<&T> {
        self.samples.front()
    }

    /// Number of items currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check if window holds `capacity` items
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Get the window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate newest to oldest
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.samples.iter()
    }

    /// Drop all items, keeping the capacity
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl<T: Clone> HistoryWindow<T> {
    /// Read the last N items (most recent first)
    pub fn read_last(&self, count: usize) -> Vec<T> {
        self.samples.iter().take(count).cloned().collect()
    }
}

impl<T> Index<usize> for HistoryWindow<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.samples[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_and_read() {
        let mut window = HistoryWindow::new(10);

        for i in 0..5 {
            window.push(i * 100);
        }

        assert_eq!(window.len(), 5);

        let items = window.read_last(3);
        assert_eq!(items, vec![400, 300, 200]); // Most recent first
        assert_eq!(window.front(), Some(&400));
        assert_eq!(window[4], 0);
    }

    #[test]
    fn test_evicts_oldest() {
        let mut window = HistoryWindow::new(3);

        assert_eq!(window.push(1), None);
        assert_eq!(window.push(2), None);
        assert_eq!(window.push(3), None);
        assert!(window.is_full());

        assert_eq!(window.push(4), Some(1));
        assert_eq!(window.len(), 3);
        assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![4, 3, 2]);
    }

    #[test]
    fn test_capacity_one() {
        let mut window = HistoryWindow::new(1);
        window.push('a');
        assert!(window.is_full());
        assert_eq!(window.push('b'), Some('a'));
        assert_eq!(window.front(), Some(&'b'));
    }

    #[test]
    fn test_clear() {
        let mut window = HistoryWindow::new(4);
        window.push(1.0);
        window.push(2.0);
        window.clear();

        assert!(window.is_empty());
        assert_eq!(window.capacity(), 4);
        assert_eq!(window.get(0), None);
    }

    #[test]
    fn test_read_last_clamped() {
        let mut window = HistoryWindow::new(5);
        window.push(7);
        assert_eq!(window.read_last(10), vec![7]);
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_panics() {
        let _ = HistoryWindow::<u8>::new(0);
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(
            capacity in 1usize..16,
            items in proptest::collection::vec(any::<i32>(), 0..64),
        ) {
            let mut window = HistoryWindow::new(capacity);
            for &item in &items {
                window.push(item);
                prop_assert!(window.len() <= capacity);
            }

            let expected: Vec<i32> = items.iter().rev().take(capacity).copied().collect();
            prop_assert_eq!(window.read_last(capacity), expected);
        }
    }
}

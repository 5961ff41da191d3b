//! Bounded selection over an ordered collection.
//!
//! Used by the photo lightbox and its thumbnail strip. The selection is
//! either empty or a valid index; every method preserves that.

use crate::pager::Pageable;

/// An ordered list with an optional current index.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState<T> {
    items: Vec<T>,
    current_index: Option<usize>,
    scroll_request: Option<usize>,
}

impl<T> Default for ViewerState<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ViewerState<T> {
    /// Create a viewer with nothing selected.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            current_index: None,
            scroll_request: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// The selected item.
    pub fn current(&self) -> Option<&T> {
        self.current_index.and_then(|i| self.items.get(i))
    }

    /// Whether `index` is the selected one.
    pub fn is_selected(&self, index: usize) -> bool {
        self.current_index == Some(index)
    }

    /// Select `index`. Out-of-range indices are rejected.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            tracing::debug!("Rejected selection {} of {}", index, self.items.len());
            return false;
        }
        self.set_current(Some(index));
        true
    }

    /// Move to the next item. No-op at the end or with nothing selected.
    pub fn next(&mut self) -> bool {
        match self.current_index {
            Some(i) if i + 1 < self.items.len() => {
                self.set_current(Some(i + 1));
                true
            }
            _ => false,
        }
    }

    /// Move to the previous item. No-op at the start or with nothing selected.
    pub fn prev(&mut self) -> bool {
        match self.current_index {
            Some(i) if i > 0 => {
                self.set_current(Some(i - 1));
                true
            }
            _ => false,
        }
    }

    /// Drop the selection.
    pub fn clear(&mut self) {
        self.set_current(None);
    }

    /// Replace the items, keeping the selection valid.
    ///
    /// An index past the new end clamps to the last item; an empty list
    /// clears the selection.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        let clamped = match self.current_index {
            Some(_) if self.items.is_empty() => None,
            Some(i) => Some(i.min(self.items.len() - 1)),
            None => None,
        };
        self.set_current(clamped);
    }

    /// Take the index the presentation layer should scroll into view.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.scroll_request.take()
    }

    fn set_current(&mut self, index: Option<usize>) {
        if self.current_index == index {
            return;
        }
        self.current_index = index;
        self.scroll_request = index;
    }
}

impl<T> Pageable for ViewerState<T> {
    fn next(&mut self) -> bool {
        ViewerState::next(self)
    }

    fn prev(&mut self) -> bool {
        ViewerState::prev(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::PagingNavigator;

    fn viewer(n: usize) -> ViewerState<usize> {
        ViewerState::new((0..n).collect())
    }

    #[test]
    fn test_select_and_reject() {
        let mut v = viewer(3);
        assert_eq!(v.current_index(), None);
        assert!(v.current().is_none());

        assert!(v.select_index(2));
        assert_eq!(v.current(), Some(&2));

        assert!(!v.select_index(3));
        assert_eq!(v.current_index(), Some(2));
    }

    #[test]
    fn test_next_prev_bounded() {
        let mut v = viewer(3);

        // Nothing selected: both are no-ops
        assert!(!v.next());
        assert!(!v.prev());
        assert_eq!(v.current_index(), None);

        v.select_index(2);
        assert!(!v.next());
        assert_eq!(v.current_index(), Some(2));

        v.select_index(0);
        assert!(!v.prev());
        assert_eq!(v.current_index(), Some(0));

        assert!(v.next());
        assert_eq!(v.current_index(), Some(1));
    }

    #[test]
    fn test_select_clear_select_round_trip() {
        let mut v = viewer(5);
        v.select_index(3);
        v.clear();
        assert_eq!(v.current_index(), None);
        v.select_index(3);
        assert_eq!(v.current_index(), Some(3));
    }

    #[test]
    fn test_replace_items_clamps_or_clears() {
        let mut v = viewer(10);
        v.select_index(8);

        v.replace_items((0..4).collect());
        assert_eq!(v.current_index(), Some(3));

        v.replace_items((0..6).collect());
        assert_eq!(v.current_index(), Some(3));

        v.replace_items(Vec::new());
        assert_eq!(v.current_index(), None);

        let mut fresh = viewer(0);
        fresh.replace_items(vec![1, 2]);
        assert_eq!(fresh.current_index(), None);
    }

    #[test]
    fn test_scroll_requests_follow_changes() {
        let mut v = viewer(4);
        assert_eq!(v.take_scroll_request(), None);

        v.select_index(1);
        assert_eq!(v.take_scroll_request(), Some(1));
        assert_eq!(v.take_scroll_request(), None);

        // Re-selecting the same index is not a change
        v.select_index(1);
        assert_eq!(v.take_scroll_request(), None);

        v.next();
        v.next();
        assert_eq!(v.take_scroll_request(), Some(3));

        v.clear();
        assert_eq!(v.take_scroll_request(), None);
    }

    #[test]
    fn test_swipe_scenario() {
        let mut v = viewer(10);
        let mut nav = PagingNavigator::new(50.0);
        v.select_index(3);

        // Swipe left 80px
        nav.on_touch_start(300.0);
        nav.on_touch_move(220.0);
        nav.on_touch_end(&mut v);
        assert_eq!(v.current_index(), Some(4));

        // Swipe right 10px
        nav.on_touch_start(100.0);
        nav.on_touch_move(110.0);
        nav.on_touch_end(&mut v);
        assert_eq!(v.current_index(), Some(4));

        v.prev();
        v.prev();
        v.prev();
        assert_eq!(v.current_index(), Some(1));
    }

    #[test]
    fn test_swipe_at_edges() {
        let mut v = viewer(2);
        let mut nav = PagingNavigator::new(50.0);
        v.select_index(1);

        nav.on_touch_start(300.0);
        nav.on_touch_move(0.0);
        nav.on_touch_end(&mut v);
        assert_eq!(v.current_index(), Some(1));

        v.select_index(0);
        nav.on_touch_start(0.0);
        nav.on_touch_move(300.0);
        nav.on_touch_end(&mut v);
        assert_eq!(v.current_index(), Some(0));
    }
}

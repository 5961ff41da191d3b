//! Swipe-to-page navigation.
//!
//! Records where a horizontal touch started and where it last was; on
//! release, a swipe longer than the threshold pages the target once.

/// Something that can be paged one step at a time.
///
/// Implementations are bounded: paging past either end is a no-op that
/// returns `false`.
pub trait Pageable {
    fn next(&mut self) -> bool;
    fn prev(&mut self) -> bool;
}

/// Direction a completed swipe paged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Finger moved right-to-left.
    Next,
    /// Finger moved left-to-right.
    Prev,
}

/// Tracks one horizontal swipe at a time.
#[derive(Debug, Clone)]
pub struct PagingNavigator {
    threshold: f64,
    touch_start: Option<f64>,
    touch_end: Option<f64>,
}

impl PagingNavigator {
    /// Create a navigator with a minimum swipe distance in px.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            touch_start: None,
            touch_end: None,
        }
    }

    /// Minimum swipe distance.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Finger down. Starts a fresh swipe.
    pub fn on_touch_start(&mut self, x: f64) {
        self.touch_end = None;
        self.touch_start = Some(x);
    }

    /// Finger moved.
    pub fn on_touch_move(&mut self, x: f64) {
        self.touch_end = Some(x);
    }

    /// Direction the current swipe would page in, if released now.
    pub fn pending_direction(&self) -> Option<SwipeDirection> {
        let distance = self.touch_start? - self.touch_end?;
        if distance > self.threshold {
            Some(SwipeDirection::Next)
        } else if distance < -self.threshold {
            Some(SwipeDirection::Prev)
        } else {
            None
        }
    }

    /// Finger up. Pages `target` if the swipe was long enough.
    ///
    /// Returns the direction paged, even if the target was already at its
    /// edge and did not move.
    pub fn on_touch_end<P: Pageable + ?Sized>(&mut self, target: &mut P) -> Option<SwipeDirection> {
        let direction = self.pending_direction();
        self.touch_start = None;
        self.touch_end = None;

        match direction {
            Some(SwipeDirection::Next) => {
                target.next();
            }
            Some(SwipeDirection::Prev) => {
                target.prev();
            }
            None => {}
        }
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        next: usize,
        prev: usize,
    }

    impl Pageable for Counter {
        fn next(&mut self) -> bool {
            self.next += 1;
            true
        }

        fn prev(&mut self) -> bool {
            self.prev += 1;
            true
        }
    }

    fn swipe(nav: &mut PagingNavigator, from: f64, to: f64, target: &mut Counter) -> Option<SwipeDirection> {
        nav.on_touch_start(from);
        nav.on_touch_move(to);
        nav.on_touch_end(target)
    }

    #[test]
    fn test_left_swipe_pages_next() {
        let mut nav = PagingNavigator::new(50.0);
        let mut target = Counter::default();
        assert_eq!(swipe(&mut nav, 300.0, 220.0, &mut target), Some(SwipeDirection::Next));
        assert_eq!((target.next, target.prev), (1, 0));
    }

    #[test]
    fn test_right_swipe_pages_prev() {
        let mut nav = PagingNavigator::new(50.0);
        let mut target = Counter::default();
        assert_eq!(swipe(&mut nav, 100.0, 151.0, &mut target), Some(SwipeDirection::Prev));
        assert_eq!((target.next, target.prev), (0, 1));
    }

    #[test]
    fn test_short_swipes_never_page() {
        let mut nav = PagingNavigator::new(50.0);
        let mut target = Counter::default();
        for d in [-50.0, -49.5, -10.0, 0.0, 10.0, 49.9, 50.0] {
            assert_eq!(swipe(&mut nav, 200.0, 200.0 - d, &mut target), None, "d={d}");
        }
        assert_eq!((target.next, target.prev), (0, 0));
    }

    #[test]
    fn test_tap_without_move_does_nothing() {
        let mut nav = PagingNavigator::new(50.0);
        let mut target = Counter::default();

        // A long swipe, then a tap: the tap must not reuse the old end point
        swipe(&mut nav, 300.0, 100.0, &mut target);
        nav.on_touch_start(300.0);
        assert_eq!(nav.on_touch_end(&mut target), None);
        assert_eq!(target.next, 1);
    }

    #[test]
    fn test_end_without_start_does_nothing() {
        let mut nav = PagingNavigator::new(50.0);
        let mut target = Counter::default();
        nav.on_touch_move(0.0);
        assert_eq!(nav.on_touch_end(&mut target), None);
        assert_eq!((target.next, target.prev), (0, 0));
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        // x = 0 is a real position, not "no touch"
        let mut nav = PagingNavigator::new(50.0);
        let mut target = Counter::default();
        assert_eq!(swipe(&mut nav, 0.0, 80.0, &mut target), Some(SwipeDirection::Prev));
        assert_eq!(swipe(&mut nav, 80.0, 0.0, &mut target), Some(SwipeDirection::Next));
    }
}

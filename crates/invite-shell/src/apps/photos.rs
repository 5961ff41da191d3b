//! Photos app: a grid plus a full-screen lightbox.
//!
//! The lightbox is open whenever a photo is selected. While it is open,
//! horizontal swipes page through the gallery and the thumbnail strip
//! follows the selection.

use invite_core::Photo;
use invite_gesture::{PagingNavigator, SwipeDirection, ViewerState};

use super::EscapeOutcome;

/// Photos app state.
#[derive(Debug)]
pub struct PhotosApp {
    viewer: ViewerState<Photo>,
    pager: PagingNavigator,
    /// Gallery request this window is waiting on.
    request: u64,
    loading: bool,
    error: Option<String>,
}

impl PhotosApp {
    /// Create an app waiting for gallery request `request`.
    pub fn new(swipe_threshold: f64, request: u64) -> Self {
        Self {
            viewer: ViewerState::default(),
            pager: PagingNavigator::new(swipe_threshold),
            request,
            loading: true,
            error: None,
        }
    }

    pub fn request(&self) -> u64 {
        self.request
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Gallery arrived (or refreshed).
    pub fn set_photos(&mut self, photos: Vec<Photo>) {
        self.loading = false;
        self.error = None;
        self.viewer.replace_items(photos);
    }

    /// Gallery request failed. Photos already shown stay.
    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn photos(&self) -> &[Photo] {
        self.viewer.items()
    }

    pub fn viewer(&self) -> &ViewerState<Photo> {
        &self.viewer
    }

    /// Grid or thumbnail tap.
    pub fn open_photo(&mut self, index: usize) -> bool {
        self.viewer.select_index(index)
    }

    /// "Done" button or backdrop tap.
    pub fn close_lightbox(&mut self) {
        self.viewer.clear();
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.viewer.current_index().is_some()
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.viewer.current()
    }

    /// Right arrow.
    pub fn next(&mut self) -> bool {
        self.viewer.next()
    }

    /// Left arrow.
    pub fn prev(&mut self) -> bool {
        self.viewer.prev()
    }

    pub fn touch_start(&mut self, x: f64) {
        if self.is_lightbox_open() {
            self.pager.on_touch_start(x);
        }
    }

    pub fn touch_move(&mut self, x: f64) {
        if self.is_lightbox_open() {
            self.pager.on_touch_move(x);
        }
    }

    pub fn touch_end(&mut self) -> Option<SwipeDirection> {
        if !self.is_lightbox_open() {
            return None;
        }
        self.pager.on_touch_end(&mut self.viewer)
    }

    /// Index of the thumbnail to scroll into view, if the selection moved.
    pub fn take_scroll_request(&mut self) -> Option<usize> {
        self.viewer.take_scroll_request()
    }

    pub fn escape(&mut self) -> EscapeOutcome {
        if self.is_lightbox_open() {
            self.close_lightbox();
            EscapeOutcome::Consumed
        } else {
            EscapeOutcome::Close
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(n: u64) -> Vec<Photo> {
        (1..=n)
            .map(|i| Photo {
                name: format!("{i}.jpg"),
                url: format!("https://cdn.example/{i}.jpg"),
                sequence: Some(i),
            })
            .collect()
    }

    #[test]
    fn test_loading_lifecycle() {
        let mut app = PhotosApp::new(50.0, 1);
        assert!(app.is_loading());

        app.set_load_error("offline");
        assert!(!app.is_loading());
        assert_eq!(app.error(), Some("offline"));

        app.set_photos(gallery(3));
        assert!(app.error().is_none());
        assert_eq!(app.photos().len(), 3);
        assert!(!app.is_lightbox_open());
    }

    #[test]
    fn test_lightbox_swipes() {
        let mut app = PhotosApp::new(50.0, 1);
        app.set_photos(gallery(10));
        assert!(app.open_photo(3));
        assert_eq!(app.take_scroll_request(), Some(3));

        app.touch_start(300.0);
        app.touch_move(220.0);
        assert_eq!(app.touch_end(), Some(SwipeDirection::Next));
        assert_eq!(app.current_photo().unwrap().name, "5.jpg");
        assert_eq!(app.take_scroll_request(), Some(4));

        app.touch_start(100.0);
        app.touch_move(110.0);
        assert_eq!(app.touch_end(), None);
        assert_eq!(app.viewer().current_index(), Some(4));
    }

    #[test]
    fn test_swipes_ignored_on_grid() {
        let mut app = PhotosApp::new(50.0, 1);
        app.set_photos(gallery(3));

        app.touch_start(300.0);
        app.touch_move(0.0);
        assert_eq!(app.touch_end(), None);
        assert!(!app.is_lightbox_open());
    }

    #[test]
    fn test_escape_closes_lightbox_first() {
        let mut app = PhotosApp::new(50.0, 1);
        app.set_photos(gallery(3));
        app.open_photo(0);

        assert_eq!(app.escape(), EscapeOutcome::Consumed);
        assert!(!app.is_lightbox_open());
        assert_eq!(app.escape(), EscapeOutcome::Close);
    }

    #[test]
    fn test_refresh_keeps_selection_valid() {
        let mut app = PhotosApp::new(50.0, 1);
        app.set_photos(gallery(10));
        app.open_photo(9);

        app.set_photos(gallery(4));
        assert_eq!(app.viewer().current_index(), Some(3));
        assert_eq!(app.current_photo().unwrap().name, "4.jpg");
    }
}

//! Gesture controllers for the invitation launcher.
//!
//! This crate provides the interaction controllers behind the lock screen
//! slider and the photo lightbox:
//! - `DragTracker` turns pointer motion into slider progress
//! - `UnlockController` arms a one-shot unlock when the slider is released
//! - `PagingNavigator` turns horizontal swipes into next/prev calls
//! - `ViewerState` holds a bounded selection over an ordered collection
//!
//! All types are GUI-independent. Hosts feed them input events and read
//! state back; nothing here renders.

pub mod drag;
pub mod pager;
pub mod timer;
pub mod unlock;
pub mod viewer;

pub use drag::{progress_percent, DragSession, DragTracker};
pub use pager::{Pageable, PagingNavigator, SwipeDirection};
pub use timer::DeferredCall;
pub use unlock::{ReleaseOutcome, UnlockController, UnlockPhase};
pub use viewer::ViewerState;

pub use invite_core::{Bounds, GestureError};

//! Slide-to-unlock controller.
//!
//! State machine: `Idle -> Dragging -> (Idle | Committed)`. Releasing the
//! thumb past the commit threshold arms a one-shot callback that fires after
//! the unlock transition has played; anything less snaps the thumb back.
//! `Committed` is terminal.

use std::fmt;
use std::time::Duration;

use invite_core::{Bounds, GestureConfig, GestureError};
use tokio::runtime::Handle;
use tokio::time::Instant;

use crate::drag::DragTracker;
use crate::timer::DeferredCall;

type UnlockCallback = Box<dyn FnOnce() + Send + 'static>;

/// Controller phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnlockPhase {
    #[default]
    Idle,
    Dragging,
    Committed,
}

/// What a release did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReleaseOutcome {
    /// No drag was in progress.
    Ignored,

    /// Released at or below the threshold; progress is back to 0.
    SnappedBack { released_at: f64 },

    /// Released past the threshold; the callback fires at `deadline`.
    Committed { percent: f64, deadline: Instant },
}

/// Drives the lock screen slider.
pub struct UnlockController {
    threshold: f64,
    delay: Duration,
    thumb_width: f64,
    tracker: DragTracker,
    phase: UnlockPhase,
    progress: f64,
    on_unlock: Option<UnlockCallback>,
    pending: Option<DeferredCall>,
}

impl UnlockController {
    /// Create a controller that calls `on_unlock` once after a commit.
    pub fn new<F>(config: &GestureConfig, on_unlock: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            threshold: config.commit_threshold,
            delay: config.commit_delay(),
            thumb_width: config.thumb_width,
            tracker: DragTracker::new(),
            phase: UnlockPhase::Idle,
            progress: 0.0,
            on_unlock: Some(Box::new(on_unlock)),
            pending: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> UnlockPhase {
        self.phase
    }

    /// Slider progress in `[0, 100]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the thumb is past the threshold (the host swaps the arrow
    /// glyph for a celebration icon).
    pub fn is_armed(&self) -> bool {
        self.progress > self.threshold
    }

    pub fn is_committed(&self) -> bool {
        self.phase == UnlockPhase::Committed
    }

    /// Deadline of the pending unlock callback, if one is scheduled.
    pub fn commit_deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .filter(|call| !call.is_finished())
            .map(DeferredCall::deadline)
    }

    /// Pointer/touch went down on the thumb.
    pub fn on_drag_start(&mut self) -> bool {
        if self.phase != UnlockPhase::Idle {
            tracing::debug!("Unlock drag start ignored in {:?}", self.phase);
            return false;
        }
        self.tracker.on_drag_start();
        self.phase = UnlockPhase::Dragging;
        true
    }

    /// Pointer moved. Returns the resulting progress.
    pub fn on_drag_move(
        &mut self,
        client_x: f64,
        container: Option<Bounds>,
    ) -> Result<f64, GestureError> {
        if self.phase != UnlockPhase::Dragging {
            return Ok(self.progress);
        }
        if let Some(percent) = self
            .tracker
            .on_drag_move(client_x, container, self.thumb_width)?
        {
            self.progress = percent;
        }
        Ok(self.progress)
    }

    /// Pointer/touch released.
    ///
    /// Committing needs a tokio runtime for the deferred callback. Without
    /// one the drag stays active and `NoRuntime` is returned.
    pub fn on_drag_end(&mut self) -> Result<ReleaseOutcome, GestureError> {
        if self.phase != UnlockPhase::Dragging {
            return Ok(ReleaseOutcome::Ignored);
        }

        let released_at = self.tracker.session().map_or(0.0, |s| s.percent);
        if released_at <= self.threshold {
            self.tracker.on_drag_end();
            self.phase = UnlockPhase::Idle;
            self.progress = 0.0;
            tracing::debug!("Unlock released at {:.1}% - snapping back", released_at);
            return Ok(ReleaseOutcome::SnappedBack { released_at });
        }

        let runtime = Handle::try_current().map_err(|_| GestureError::NoRuntime)?;
        self.tracker.on_drag_end();
        self.phase = UnlockPhase::Committed;
        self.progress = released_at;

        let callback = self.on_unlock.take();
        let call = DeferredCall::spawn_on(&runtime, self.delay, move || {
            if let Some(callback) = callback {
                callback();
            }
        });
        let deadline = call.deadline();
        self.pending = Some(call);

        tracing::info!(
            "Unlock committed at {:.1}%, firing in {:?}",
            released_at,
            self.delay
        );
        Ok(ReleaseOutcome::Committed {
            percent: released_at,
            deadline,
        })
    }

    /// Tear down: cancel a pending unlock callback.
    pub fn dispose(&mut self) {
        if let Some(call) = self.pending.take() {
            if !call.is_finished() {
                tracing::debug!("Cancelling pending unlock callback");
            }
            call.cancel();
        }
    }
}

impl Drop for UnlockController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for UnlockController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnlockController")
            .field("phase", &self.phase)
            .field("progress", &self.progress)
            .field("threshold", &self.threshold)
            .field("pending", &self.commit_deadline())
            .finish_non_exhaustive()
    }
}

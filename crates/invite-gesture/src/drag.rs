//! Drag tracking for the unlock slider.
//!
//! Converts raw pointer/touch x coordinates into a slider percentage. The
//! thumb is centred under the pointer and may travel from the left edge of
//! the track to `width - thumb_width`.

use invite_core::{Bounds, GestureError};

/// An in-progress drag. Exists only between drag-start and drag-end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragSession {
    /// First x seen after the drag started.
    pub start_x: Option<f64>,

    /// Most recent x.
    pub last_x: Option<f64>,

    /// Percent computed from `last_x`.
    pub percent: f64,
}

/// Tracks at most one drag session at a time.
#[derive(Debug, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag session.
    ///
    /// Returns `false` and leaves the running session untouched if one is
    /// already active.
    pub fn on_drag_start(&mut self) -> bool {
        if self.session.is_some() {
            tracing::debug!("Drag start ignored: session already active");
            return false;
        }
        self.session = Some(DragSession::default());
        true
    }

    /// Feed a pointer position.
    ///
    /// Returns `Ok(None)` when no session is active. A missing container is
    /// an error for this call only; the session keeps its last value.
    pub fn on_drag_move(
        &mut self,
        client_x: f64,
        container: Option<Bounds>,
        thumb_width: f64,
    ) -> Result<Option<f64>, GestureError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let bounds = container.ok_or(GestureError::MissingContainer)?;
        let percent = progress_percent(client_x, bounds, thumb_width)?;

        session.start_x.get_or_insert(client_x);
        session.last_x = Some(client_x);
        session.percent = percent;
        Ok(Some(percent))
    }

    /// End the session and report its last percent.
    ///
    /// Returns `None` when no session was active.
    pub fn on_drag_end(&mut self) -> Option<f64> {
        self.session.take().map(|s| s.percent)
    }

    /// Whether a session is active.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }
}

/// Map a pointer x onto slider progress in `[0, 100]`.
///
/// Positions outside the track clamp to the nearest end. A NaN position
/// counts as the left end.
pub fn progress_percent(
    client_x: f64,
    bounds: Bounds,
    thumb_width: f64,
) -> Result<f64, GestureError> {
    let max_drag = bounds.width - thumb_width;
    if !max_drag.is_finite() || max_drag <= 0.0 {
        return Err(GestureError::DegenerateTrack {
            width: bounds.width,
            thumb_width,
        });
    }

    let offset = client_x - bounds.left - thumb_width / 2.0;
    let constrained = if offset.is_nan() {
        0.0
    } else {
        offset.clamp(0.0, max_drag)
    };
    Ok(constrained * 100.0 / max_drag)
}

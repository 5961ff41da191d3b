//! State model for the invitation launcher.
//!
//! This module contains the screen state machine. All types are
//! renderer-independent for testability.

mod state;

pub use state::{
    AppContent, AppWindow, HomeState, LaunchOutcome, LockScreen, Shell, ShellEvent, ShellPhase,
    WindowStage,
};

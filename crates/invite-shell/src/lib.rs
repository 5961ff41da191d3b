//! Screen model and headless host for the invitation launcher.
//!
//! This crate provides:
//! - The lock screen / home screen state machine (`Shell`)
//! - Per-app state for Photos, Mail, Messages and Wallet
//! - Clock and D-day formatting
//! - A line-command host that drives the shell without a renderer

pub mod apps;
pub mod clock;
pub mod commands;
pub mod host;
pub mod model;

// Re-export commonly used types
pub use apps::{
    AppKind, EscapeOutcome, MailApp, MapProvider, MapsApp, MessagesApp, PhotosApp, WalletApp,
};
pub use commands::{parse_command, Command, CommandError};
pub use host::Host;
pub use model::{AppContent, AppWindow, LaunchOutcome, Shell, ShellEvent, ShellPhase, WindowStage};

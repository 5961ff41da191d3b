//! Core types for the invitation launcher.
//!
//! This crate contains shared data structures used across all invite crates:
//! - Geometry handed to gesture controllers by the host view
//! - Photo, guestbook and wallet records
//! - Configuration types and loading
//! - Error types

mod config;
mod error;
mod geometry;
mod item;

pub use config::{
    config_dir, config_path, load_config, load_or_default, AccountSide, EventConfig,
    GalleryConfig, GestureConfig, InviteConfig, MapLinks, Route, TransitionConfig, VenueConfig,
    WalletAccount, WalletConfig,
};
pub use error::{ConfigError, GestureError, StoreError};
pub use geometry::Bounds;
pub use item::{GuestEntry, GuestEntryDraft, ObjectRef, Photo};

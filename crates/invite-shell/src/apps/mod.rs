//! Per-app state for the modal apps on the home screen.
//!
//! Each app owns only its own view state. Remote data arrives through the
//! host, which calls the app's setters once a request completes.

mod mail;
mod maps;
mod messages;
mod photos;
mod wallet;

pub use mail::{MailApp, MailView};
pub use maps::{MapProvider, MapsApp};
pub use messages::{default_profiles, ChatLine, MessagesApp, MessagesView, Profile};
pub use photos::PhotosApp;
pub use wallet::{clipboard_text, WalletApp};

use serde::{Deserialize, Serialize};

/// Icons on the home screen and dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppKind {
    Maps,
    Photos,
    Mail,
    Calendar,
    Wallet,
    Messages,
    Weather,
    News,
    Invite,
}

impl AppKind {
    /// Every icon, in home-screen order.
    pub const ALL: [AppKind; 9] = [
        AppKind::Maps,
        AppKind::Photos,
        AppKind::Mail,
        AppKind::Calendar,
        AppKind::Wallet,
        AppKind::Messages,
        AppKind::Weather,
        AppKind::News,
        AppKind::Invite,
    ];

    /// Icon label.
    pub fn label(&self) -> &'static str {
        match self {
            AppKind::Maps => "Maps",
            AppKind::Photos => "Photos",
            AppKind::Mail => "Mail",
            AppKind::Calendar => "Calendar",
            AppKind::Wallet => "Wallet",
            AppKind::Messages => "Messages",
            AppKind::Weather => "Weather",
            AppKind::News => "News",
            AppKind::Invite => "Invite",
        }
    }

    /// Look up an icon by its label, ignoring case.
    pub fn from_label(label: &str) -> Option<AppKind> {
        AppKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }

    /// Whether tapping the icon opens a modal window.
    pub fn opens_window(&self) -> bool {
        !matches!(self, AppKind::Calendar | AppKind::Weather | AppKind::News)
    }
}

/// What an app did with the Escape key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// The app stepped back internally.
    Consumed,
    /// The app has nothing left to unwind; close the window.
    Close,
}

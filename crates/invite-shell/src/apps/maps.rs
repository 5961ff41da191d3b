//! Maps app: venue details, directions, and share links for map apps.

use invite_core::{Route, VenueConfig};
use serde::{Deserialize, Serialize};

/// Map apps the venue can be opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapProvider {
    Naver,
    Kakao,
    TMap,
}

impl MapProvider {
    pub const ALL: [MapProvider; 3] = [MapProvider::Naver, MapProvider::Kakao, MapProvider::TMap];

    pub fn label(&self) -> &'static str {
        match self {
            MapProvider::Naver => "naver",
            MapProvider::Kakao => "kakao",
            MapProvider::TMap => "tmap",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label))
    }
}

/// Maps app state. Everything here is static, so the app only reads.
#[derive(Debug)]
pub struct MapsApp {
    venue: VenueConfig,
}

impl MapsApp {
    pub fn new(venue: VenueConfig) -> Self {
        Self { venue }
    }

    pub fn venue(&self) -> &VenueConfig {
        &self.venue
    }

    pub fn routes(&self) -> &[Route] {
        &self.venue.routes
    }

    /// Share link for a provider. An unset link yields `None`.
    pub fn link(&self, provider: MapProvider) -> Option<&str> {
        let links = &self.venue.links;
        let url = match provider {
            MapProvider::Naver => &links.naver,
            MapProvider::Kakao => &links.kakao,
            MapProvider::TMap => &links.tmap,
        };
        Some(url.as_str()).filter(|url| !url.is_empty())
    }

    /// Providers with a link, in button order.
    pub fn providers(&self) -> impl Iterator<Item = MapProvider> + '_ {
        MapProvider::ALL
            .into_iter()
            .filter(move |p| self.link(*p).is_some())
    }

    /// Directions button. Returns the link the host should open externally.
    pub fn open_directions(&self, provider: MapProvider) -> Option<String> {
        let url = self.link(provider)?;
        tracing::debug!("Opening directions in {}", provider.label());
        Some(url.to_string())
    }
}

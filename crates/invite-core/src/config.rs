//! Configuration types.
//!
//! Configuration lives in a single `config.toml`. Every field has a default,
//! so an empty or missing file yields the stock invitation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime configuration loaded from config.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InviteConfig {
    /// Slider and swipe thresholds
    #[serde(default)]
    pub gesture: GestureConfig,

    /// Window and toast timings
    #[serde(default)]
    pub transitions: TransitionConfig,

    /// Wedding details
    #[serde(default)]
    pub event: EventConfig,

    /// Photo gallery source
    #[serde(default)]
    pub gallery: GalleryConfig,

    /// Bank accounts shown in the wallet
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Venue and directions shown by Maps
    #[serde(default)]
    pub venue: VenueConfig,
}

impl InviteConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.gesture;
        for (name, value) in [
            ("commit_threshold", g.commit_threshold),
            ("swipe_threshold", g.swipe_threshold),
            ("thumb_width", g.thumb_width),
            ("track_width", g.track_width),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        if !(0.0..100.0).contains(&g.commit_threshold) {
            return Err(ConfigError::Invalid(format!(
                "commit_threshold must be in [0, 100), got {}",
                g.commit_threshold
            )));
        }
        if g.swipe_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "swipe_threshold must be positive, got {}",
                g.swipe_threshold
            )));
        }
        if g.thumb_width <= 0.0 || g.thumb_width >= g.track_width {
            return Err(ConfigError::Invalid(format!(
                "thumb_width {} must be positive and narrower than track_width {}",
                g.thumb_width, g.track_width
            )));
        }
        Ok(())
    }
}

/// Gesture configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Slider percent that must be exceeded to unlock.
    pub commit_threshold: f64,

    /// Minimum horizontal swipe distance in px.
    pub swipe_threshold: f64,

    /// Delay between commit and the unlock callback.
    pub commit_delay_ms: u64,

    /// Slider thumb width in px, padding included.
    pub thumb_width: f64,

    /// Slider track width in px, used by hosts without a live layout.
    pub track_width: f64,
}

impl GestureConfig {
    /// Commit delay as a `Duration`.
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 80.0,
            swipe_threshold: 50.0,
            commit_delay_ms: 300,
            thumb_width: 56.0,
            track_width: 320.0,
        }
    }
}

/// Transition timings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Time an app window spends in its closing animation.
    pub close_delay_ms: u64,

    /// How long a toast stays visible.
    pub toast_ms: u64,
}

impl TransitionConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            close_delay_ms: 300,
            toast_ms: 2000,
        }
    }
}

/// Wedding details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Date counted down to by the D-day widget.
    pub wedding_date: NaiveDate,

    /// Article opened by the News icon. No link leaves the icon inert.
    pub news_url: Option<String>,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            wedding_date: NaiveDate::from_ymd_opt(2026, 3, 28).unwrap_or_default(),
            news_url: Some(
                "https://www.notepet.co.kr/news/article/article_view/?idx=14720".to_string(),
            ),
        }
    }
}

/// Photo gallery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Object store prefix holding the photos.
    pub prefix: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            prefix: "originals/snap/".to_string(),
        }
    }
}

/// Wallet configuration.
///
/// A file that lists any `[[wallet.accounts]]` replaces the stock list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub accounts: Vec<WalletAccount>,
}

impl Default for WalletConfig {
    fn default() -> Self {
        use AccountSide::{Bride, Groom};
        let accounts = [
            (Groom, "박시우", "우리은행", "1002-355-095506"),
            (Groom, "박성동", "경남은행", "502-22-036-7775"),
            (Groom, "백윤정", "농협은행", "8211-5456-1869-70"),
            (Bride, "최지니", "카카오뱅크", "3333-26-0023726"),
            (Bride, "최석봉", "국민은행", "662002-01-459632"),
            (Bride, "김현규", "국민은행", "662002-01-535848"),
        ];
        Self {
            accounts: accounts
                .into_iter()
                .map(|(side, holder, bank, number)| WalletAccount {
                    side,
                    holder: holder.to_string(),
                    bank: bank.to_string(),
                    number: number.to_string(),
                })
                .collect(),
        }
    }
}

/// Which family an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountSide {
    Groom,
    Bride,
}

/// A bank account shown in the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub side: AccountSide,
    pub holder: String,
    pub bank: String,
    /// Account number as displayed, dashes included.
    pub number: String,
}

/// Venue shown by the Maps app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub name: String,
    pub phone: String,
    /// Building name printed under the venue name.
    pub building: String,
    pub address: String,
    /// Short notices such as where to find an ATM.
    pub notices: Vec<String>,
    /// Directions grouped by way of travel.
    pub routes: Vec<Route>,
    pub links: MapLinks,
}

/// One way of getting to the venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub title: String,
    pub steps: Vec<String>,
}

/// Share links for the map apps. An empty link hides that button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapLinks {
    pub naver: String,
    pub kakao: String,
    pub tmap: String,
}

impl Default for MapLinks {
    fn default() -> Self {
        Self {
            naver: "https://naver.me/5N15n4Vu".to_string(),
            kakao: "https://place.map.kakao.com/1408612060".to_string(),
            tmap: "https://tmap.life/5c83f3d0".to_string(),
        }
    }
}

impl Default for VenueConfig {
    fn default() -> Self {
        fn route(title: &str, steps: &[&str]) -> Route {
            Route {
                title: title.to_string(),
                steps: steps.iter().map(|s| s.to_string()).collect(),
            }
        }

        Self {
            name: "이라운지 서울대점".to_string(),
            phone: "02-875-7761".to_string(),
            building: "서울대학교 엔지니어 하우스".to_string(),
            address: "서울시 관악구 관악로1 서울대학교, 310동 엔지니어 하우스".to_string(),
            notices: vec![
                "이라운지 내에 ATM이 없습니다.".to_string(),
                "ATM은 302동 제2공학관 또는 301동 제1공학관에서 이용 가능합니다.".to_string(),
            ],
            routes: vec![
                route(
                    "대중교통 이용시",
                    &[
                        "2호선 서울대입구역 3번 출구 → 5511, 5513번 버스 → 제2공학관(종점)",
                        "신림선 관악산역 1번 출구 → 5511, 5516번 버스 → 제2공학관(종점)",
                    ],
                ),
                route("승용차 이용시", &["2시간 무료주차 (주차권 발급)"]),
                route(
                    "신랑 측 전세버스",
                    &["부산 사상역 오전 7시 30분 출발", "마산역 오전 8시 30분 출발"],
                ),
                route(
                    "기차 이용시",
                    &[
                        "광명역 정차: 8507번 버스 → 관악산입구 → 5511, 5516번 버스 → 제2공학관",
                        "광명역 미정차: 서울역 환승센터 → 관악경찰서 → 5513번 버스 → 제2공학관",
                    ],
                ),
            ],
            links: MapLinks::default(),
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("invite"))
}

/// Get the path to config.toml.
///
/// Tries paths in order:
/// 1. XDG-style: ~/.config/invite/config.toml
/// 2. Platform config dir
pub fn config_path() -> Option<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        let xdg_path = home.join(".config").join("invite").join("config.toml");
        if xdg_path.exists() {
            return Some(xdg_path);
        }
    }

    let path = config_dir()?.join("config.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Read, parse and validate a config file.
pub fn load_config(path: &Path) -> Result<InviteConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    let config: InviteConfig = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load the user config, falling back to defaults on any problem.
pub fn load_or_default() -> InviteConfig {
    let Some(path) = config_path() else {
        tracing::info!("No config.toml found - using defaults");
        return InviteConfig::default();
    };

    match load_config(&path) {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::error!("{}: {} - using defaults", path.display(), e);
            InviteConfig::default()
        }
    }
}

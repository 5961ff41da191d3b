//! Screen state model for the invitation launcher.
//!
//! The shell starts on the lock screen. Sliding the thumb past the commit
//! threshold schedules `ShellEvent::Unlocked`; handling that event switches
//! to the home screen, where icons open one modal app window at a time.
//!
//! Remote work (gallery listing, guestbook inserts) runs on the host. Its
//! results come back as `ShellEvent`s so every state change flows through
//! `Shell::handle_event`. Each Photos window gets a fresh gallery request id;
//! listings tagged with any other id are dropped.

use invite_core::{Bounds, GestureError, InviteConfig, Photo, StoreError};
use invite_gesture::{ReleaseOutcome, UnlockController};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

use crate::apps::{
    AppKind, EscapeOutcome, MailApp, MapsApp, MessagesApp, PhotosApp, WalletApp,
};

// =============================================================================
// Events
// =============================================================================

/// Events delivered to the shell from timers and background tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// The unlock commit delay elapsed.
    Unlocked,

    /// Gallery listing for `request` finished.
    GalleryLoaded {
        request: u64,
        result: Result<Vec<Photo>, StoreError>,
    },

    /// Guestbook insert finished.
    GuestbookSubmitted(Result<String, StoreError>),
}

/// Result of tapping a home screen icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// A modal window opened.
    Opened,
    /// The host should open this link outside the shell.
    External(String),
    /// The icon does nothing.
    Inert,
    /// Another window is open or still closing.
    Busy,
    /// Still on the lock screen.
    Locked,
}

// =============================================================================
// Shell Phase State Machine
// =============================================================================

/// Top-level state machine. Home is only reachable through an unlock.
#[derive(Debug)]
pub enum ShellPhase {
    Locked(LockScreen),
    Home(HomeState),
}

impl ShellPhase {
    pub fn home(&self) -> Option<&HomeState> {
        match self {
            ShellPhase::Home(state) => Some(state),
            ShellPhase::Locked(_) => None,
        }
    }

    pub fn home_mut(&mut self) -> Option<&mut HomeState> {
        match self {
            ShellPhase::Home(state) => Some(state),
            ShellPhase::Locked(_) => None,
        }
    }

    pub fn lock_screen(&self) -> Option<&LockScreen> {
        match self {
            ShellPhase::Locked(lock) => Some(lock),
            ShellPhase::Home(_) => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, ShellPhase::Locked(_))
    }
}

// =============================================================================
// Lock Screen
// =============================================================================

/// Lock screen with its slide-to-unlock control.
#[derive(Debug)]
pub struct LockScreen {
    pub unlock: UnlockController,
}

impl LockScreen {
    /// The screen fades out between commit and unlock.
    pub fn is_fading(&self) -> bool {
        self.unlock.is_committed()
    }
}

// =============================================================================
// Home Screen
// =============================================================================

/// Home screen with at most one app window.
#[derive(Debug, Default)]
pub struct HomeState {
    pub window: Option<AppWindow>,
}

/// Per-app state inside a window.
#[derive(Debug)]
pub enum AppContent {
    Maps(MapsApp),
    Photos(PhotosApp),
    Mail(MailApp),
    Wallet(WalletApp),
    Messages(MessagesApp),
    Invite,
}

impl AppContent {
    fn escape(&mut self) -> EscapeOutcome {
        match self {
            AppContent::Photos(app) => app.escape(),
            AppContent::Mail(app) => app.escape(),
            AppContent::Messages(app) => app.escape(),
            AppContent::Maps(_) | AppContent::Wallet(_) | AppContent::Invite => {
                EscapeOutcome::Close
            }
        }
    }
}

/// Window lifecycle. A closing window keeps its content until the
/// transition ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowStage {
    Open,
    Closing { until: Instant },
}

/// A modal app window.
#[derive(Debug)]
pub struct AppWindow {
    pub kind: AppKind,
    pub stage: WindowStage,
    pub content: AppContent,
}

impl AppWindow {
    pub fn is_open(&self) -> bool {
        self.stage == WindowStage::Open
    }
}

// =============================================================================
// Shell
// =============================================================================

/// The whole launcher.
#[derive(Debug)]
pub struct Shell {
    config: InviteConfig,
    phase: ShellPhase,
    /// Last gallery request id handed to a Photos window.
    gallery_requests: u64,
}

impl Shell {
    /// Create a locked shell. The unlock timer posts `Unlocked` on `events`.
    pub fn new(config: InviteConfig, events: UnboundedSender<ShellEvent>) -> Self {
        let unlock = UnlockController::new(&config.gesture, move || {
            if events.send(ShellEvent::Unlocked).is_err() {
                tracing::warn!("Shell event channel closed before unlock");
            }
        });
        Self {
            config,
            phase: ShellPhase::Locked(LockScreen { unlock }),
            gallery_requests: 0,
        }
    }

    pub fn config(&self) -> &InviteConfig {
        &self.config
    }

    pub fn phase(&self) -> &ShellPhase {
        &self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn window(&self) -> Option<&AppWindow> {
        self.phase.home().and_then(|h| h.window.as_ref())
    }

    fn window_mut(&mut self) -> Option<&mut AppWindow> {
        self.phase.home_mut().and_then(|h| h.window.as_mut())
    }

    fn unlock_mut(&mut self) -> Option<&mut UnlockController> {
        match &mut self.phase {
            ShellPhase::Locked(lock) => Some(&mut lock.unlock),
            ShellPhase::Home(_) => None,
        }
    }

    // -------------------------------------------------------------------------
    // Lock screen input
    // -------------------------------------------------------------------------

    pub fn drag_start(&mut self) -> bool {
        self.unlock_mut().is_some_and(|u| u.on_drag_start())
    }

    /// Returns the slider progress, or `None` once unlocked.
    pub fn drag_move(
        &mut self,
        client_x: f64,
        container: Option<Bounds>,
    ) -> Result<Option<f64>, GestureError> {
        match self.unlock_mut() {
            Some(unlock) => unlock.on_drag_move(client_x, container).map(Some),
            None => Ok(None),
        }
    }

    pub fn drag_end(&mut self) -> Result<ReleaseOutcome, GestureError> {
        match self.unlock_mut() {
            Some(unlock) => unlock.on_drag_end(),
            None => Ok(ReleaseOutcome::Ignored),
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Unlocked => {
                if self.is_locked() {
                    tracing::info!("Unlocked - showing home screen");
                    self.phase = ShellPhase::Home(HomeState::default());
                }
            }
            ShellEvent::GalleryLoaded { request, result } => {
                let Some(app) = self.photos_mut() else {
                    tracing::debug!("Gallery arrived with Photos closed");
                    return;
                };
                if app.request() != request {
                    tracing::debug!(
                        "Dropping stale gallery {} (waiting on {})",
                        request,
                        app.request()
                    );
                    return;
                }
                match result {
                    Ok(photos) => app.set_photos(photos),
                    Err(e) => {
                        tracing::warn!("Gallery load failed: {}", e);
                        app.set_load_error(e.to_string());
                    }
                }
            }
            ShellEvent::GuestbookSubmitted(result) => match self.mail_mut() {
                Some(app) => app.finish_submit(result),
                None => tracing::debug!("Guestbook result arrived with Mail closed"),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Home screen
    // -------------------------------------------------------------------------

    /// Icon tap.
    pub fn launch(&mut self, kind: AppKind) -> LaunchOutcome {
        let swipe_threshold = self.config.gesture.swipe_threshold;
        let accounts = self.config.wallet.accounts.clone();
        let venue = self.config.venue.clone();
        let news_url = self.config.event.news_url.clone();

        let Some(home) = self.phase.home_mut() else {
            return LaunchOutcome::Locked;
        };
        if home.window.is_some() {
            return LaunchOutcome::Busy;
        }

        let content = match kind {
            AppKind::Calendar | AppKind::Weather => return LaunchOutcome::Inert,
            AppKind::News => {
                return match news_url.filter(|url| !url.is_empty()) {
                    Some(url) => LaunchOutcome::External(url),
                    None => LaunchOutcome::Inert,
                };
            }
            AppKind::Maps => AppContent::Maps(MapsApp::new(venue)),
            AppKind::Photos => {
                self.gallery_requests += 1;
                AppContent::Photos(PhotosApp::new(swipe_threshold, self.gallery_requests))
            }
            AppKind::Mail => AppContent::Mail(MailApp::new()),
            AppKind::Wallet => AppContent::Wallet(WalletApp::new(accounts)),
            AppKind::Messages => AppContent::Messages(MessagesApp::default()),
            AppKind::Invite => AppContent::Invite,
        };

        tracing::debug!("Opening {}", kind.label());
        home.window = Some(AppWindow {
            kind,
            stage: WindowStage::Open,
            content,
        });
        LaunchOutcome::Opened
    }

    /// Start the closing transition. Returns false if nothing was open.
    pub fn close_app(&mut self, now: Instant) -> bool {
        let delay = self.config.transitions.close_delay();
        match self.window_mut() {
            Some(window) if window.is_open() => {
                window.stage = WindowStage::Closing { until: now + delay };
                true
            }
            _ => false,
        }
    }

    /// Escape key: let the app unwind, then close its window.
    pub fn escape(&mut self, now: Instant) -> bool {
        let outcome = match self.window_mut() {
            Some(window) if window.is_open() => window.content.escape(),
            _ => return false,
        };
        match outcome {
            EscapeOutcome::Consumed => true,
            EscapeOutcome::Close => self.close_app(now),
        }
    }

    /// Advance transitions. Returns true if the window was removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(home) = self.phase.home_mut() else {
            return false;
        };
        let Some(window) = home.window.as_mut() else {
            return false;
        };

        if let AppContent::Wallet(app) = &mut window.content {
            app.tick(now);
        }

        let stage = window.stage;
        match stage {
            WindowStage::Closing { until } if now >= until => {
                tracing::debug!("Closed {}", window.kind.label());
                home.window = None;
                true
            }
            _ => false,
        }
    }

    // -------------------------------------------------------------------------
    // App access
    // -------------------------------------------------------------------------

    pub fn maps(&self) -> Option<&MapsApp> {
        match self.window().map(|w| &w.content) {
            Some(AppContent::Maps(app)) => Some(app),
            _ => None,
        }
    }

    pub fn photos_mut(&mut self) -> Option<&mut PhotosApp> {
        match self.window_mut().map(|w| &mut w.content) {
            Some(AppContent::Photos(app)) => Some(app),
            _ => None,
        }
    }

    pub fn mail_mut(&mut self) -> Option<&mut MailApp> {
        match self.window_mut().map(|w| &mut w.content) {
            Some(AppContent::Mail(app)) => Some(app),
            _ => None,
        }
    }

    pub fn wallet_mut(&mut self) -> Option<&mut WalletApp> {
        match self.window_mut().map(|w| &mut w.content) {
            Some(AppContent::Wallet(app)) => Some(app),
            _ => None,
        }
    }

    pub fn messages_mut(&mut self) -> Option<&mut MessagesApp> {
        match self.window_mut().map(|w| &mut w.content) {
            Some(AppContent::Messages(app)) => Some(app),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use invite_gesture::UnlockPhase;
    use std::time::Duration;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    const TRACK: Bounds = Bounds {
        left: 0.0,
        width: 320.0,
    };

    fn locked() -> (Shell, UnboundedReceiver<ShellEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Shell::new(InviteConfig::default(), tx), rx)
    }

    fn unlocked() -> Shell {
        let (mut shell, _rx) = locked();
        shell.handle_event(ShellEvent::Unlocked);
        shell
    }

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unlock_reaches_home() {
        let (mut shell, mut rx) = locked();

        assert!(shell.drag_start());
        assert_eq!(shell.drag_move(300.0, Some(TRACK)).unwrap(), Some(100.0));
        assert!(matches!(
            shell.drag_end().unwrap(),
            ReleaseOutcome::Committed { .. }
        ));
        assert!(shell.phase().lock_screen().unwrap().is_fading());

        tokio::time::advance(Duration::from_millis(299)).await;
        settle().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        let event = rx.try_recv().unwrap();
        assert_eq!(event, ShellEvent::Unlocked);

        shell.handle_event(event);
        assert!(!shell.is_locked());
        assert_eq!(shell.drag_end().unwrap(), ReleaseOutcome::Ignored);
        assert_eq!(shell.drag_move(10.0, Some(TRACK)).unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_drag_stays_locked() {
        let (mut shell, mut rx) = locked();

        shell.drag_start();
        shell.drag_move(100.0, Some(TRACK)).unwrap();
        assert!(matches!(
            shell.drag_end().unwrap(),
            ReleaseOutcome::SnappedBack { .. }
        ));

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
        let lock = shell.phase().lock_screen().unwrap();
        assert_eq!(lock.unlock.phase(), UnlockPhase::Idle);
        assert!(!lock.is_fading());
    }

    #[test]
    fn test_launch_while_locked() {
        let (mut shell, _rx) = locked();
        assert_eq!(shell.launch(AppKind::Photos), LaunchOutcome::Locked);
    }

    #[test]
    fn test_launch_outcomes() {
        let mut shell = unlocked();
        assert_eq!(shell.launch(AppKind::Calendar), LaunchOutcome::Inert);
        assert_eq!(shell.launch(AppKind::Weather), LaunchOutcome::Inert);
        assert!(matches!(
            shell.launch(AppKind::News),
            LaunchOutcome::External(url) if url.starts_with("https://")
        ));
        assert!(shell.window().is_none());

        assert_eq!(shell.launch(AppKind::Wallet), LaunchOutcome::Opened);
        assert_eq!(shell.launch(AppKind::Mail), LaunchOutcome::Busy);
        assert!(shell.wallet_mut().is_some());
        assert!(shell.mail_mut().is_none());
    }

    #[test]
    fn test_news_without_link_is_inert() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = InviteConfig::default();
        config.event.news_url = Some(String::new());
        let mut shell = Shell::new(config, tx);
        shell.handle_event(ShellEvent::Unlocked);
        assert_eq!(shell.launch(AppKind::News), LaunchOutcome::Inert);
    }

    #[test]
    fn test_two_stage_close() {
        let mut shell = unlocked();
        let now = Instant::now();
        shell.launch(AppKind::Maps);

        assert!(shell.close_app(now));
        assert!(!shell.close_app(now));
        assert_eq!(shell.launch(AppKind::Photos), LaunchOutcome::Busy);

        assert!(!shell.tick(now + Duration::from_millis(299)));
        assert!(shell.window().is_some());
        assert!(shell.tick(now + Duration::from_millis(300)));
        assert!(shell.window().is_none());
        assert_eq!(shell.launch(AppKind::Photos), LaunchOutcome::Opened);
    }

    #[test]
    fn test_escape_routes_to_messages() {
        let mut shell = unlocked();
        let now = Instant::now();
        shell.launch(AppKind::Messages);
        let app = shell.messages_mut().unwrap();
        app.open_chat("bride");
        app.open_profile("bride");

        assert!(shell.escape(now));
        assert!(shell.escape(now));
        assert!(shell.window().unwrap().is_open());

        assert!(shell.escape(now));
        assert_eq!(
            shell.window().unwrap().stage,
            WindowStage::Closing {
                until: now + Duration::from_millis(300)
            }
        );
        assert!(!shell.escape(now));
    }

    fn photo(n: u64) -> Photo {
        Photo {
            name: format!("{n}.jpg"),
            url: format!("https://cdn.example/{n}.jpg"),
            sequence: Some(n),
        }
    }

    #[test]
    fn test_gallery_event() {
        let mut shell = unlocked();

        // Ignored while Photos is closed
        shell.handle_event(ShellEvent::GalleryLoaded {
            request: 1,
            result: Ok(vec![photo(1)]),
        });

        shell.launch(AppKind::Photos);
        let request = shell.photos_mut().unwrap().request();
        assert!(shell.photos_mut().unwrap().is_loading());
        shell.handle_event(ShellEvent::GalleryLoaded {
            request,
            result: Ok(vec![photo(1)]),
        });
        assert_eq!(shell.photos_mut().unwrap().photos().len(), 1);

        shell.handle_event(ShellEvent::GalleryLoaded {
            request,
            result: Err(StoreError::Backend("offline".to_string())),
        });
        let app = shell.photos_mut().unwrap();
        assert_eq!(app.photos().len(), 1);
        assert!(app.error().is_some());
    }

    #[test]
    fn test_stale_gallery_is_dropped() {
        let mut shell = unlocked();
        let now = Instant::now();

        shell.launch(AppKind::Photos);
        let first = shell.photos_mut().unwrap().request();
        shell.close_app(now);
        shell.tick(now + Duration::from_millis(300));

        shell.launch(AppKind::Photos);
        let second = shell.photos_mut().unwrap().request();
        assert_ne!(first, second);

        // The first window's listing lands in the second window
        shell.handle_event(ShellEvent::GalleryLoaded {
            request: first,
            result: Ok(vec![photo(1), photo(2)]),
        });
        assert!(shell.photos_mut().unwrap().is_loading());

        shell.handle_event(ShellEvent::GalleryLoaded {
            request: second,
            result: Ok(vec![photo(3)]),
        });
        let app = shell.photos_mut().unwrap();
        assert!(!app.is_loading());
        assert_eq!(app.photos()[0].name, "3.jpg");
    }

    #[test]
    fn test_maps_window() {
        let mut shell = unlocked();
        assert_eq!(shell.launch(AppKind::Maps), LaunchOutcome::Opened);
        let app = shell.maps().unwrap();
        assert_eq!(app.venue().phone, "02-875-7761");
        assert!(shell.escape(Instant::now()));
        assert!(!shell.window().unwrap().is_open());
    }

    #[test]
    fn test_guestbook_event() {
        let mut shell = unlocked();
        shell.launch(AppKind::Mail);
        let app = shell.mail_mut().unwrap();
        app.set_name("Mina");
        app.set_content("Congratulations!");
        assert!(app.begin_submit().is_some());

        shell.handle_event(ShellEvent::GuestbookSubmitted(Ok("doc-1".to_string())));
        let app = shell.mail_mut().unwrap();
        assert!(!app.is_submitting());
        assert_eq!(app.view(), crate::apps::MailView::List);
    }
}

//! Headless host.
//!
//! Owns the shell and the data sources, applies parsed commands, and runs
//! remote requests as tokio tasks whose results come back as
//! `ShellEvent`s on the shell's event channel.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Local;
use invite_core::{AccountSide, Bounds, InviteConfig, StoreError};
use invite_gesture::ReleaseOutcome;
use invite_store::{load_gallery, DocumentStore, Guestbook, ObjectStore};
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

use crate::apps::{AppKind, MailView, MessagesView};
use crate::clock::{dday_label, days_until, format_date_ko, format_time};
use crate::commands::{Command, HELP};
use crate::model::{AppContent, LaunchOutcome, Shell, ShellEvent, ShellPhase, WindowStage};

fn reply(changed: bool) -> String {
    if changed {
        "ok".to_string()
    } else {
        "ignored".to_string()
    }
}

/// Shell plus the services it talks to.
pub struct Host {
    shell: Shell,
    events: UnboundedSender<ShellEvent>,
    objects: Arc<dyn ObjectStore>,
    guestbook: Guestbook,
    track: Bounds,
}

impl Host {
    /// Build a locked shell and open the guestbook subscription.
    pub fn new(
        config: InviteConfig,
        objects: Arc<dyn ObjectStore>,
        documents: Arc<dyn DocumentStore>,
        events: UnboundedSender<ShellEvent>,
    ) -> Result<Self, StoreError> {
        let guestbook = Guestbook::open(documents)?;
        let track = Bounds::new(0.0, config.gesture.track_width);
        Ok(Self {
            shell: Shell::new(config, events.clone()),
            events,
            objects,
            guestbook,
            track,
        })
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn guestbook(&self) -> &Guestbook {
        &self.guestbook
    }

    pub fn handle_event(&mut self, event: ShellEvent) {
        self.shell.handle_event(event);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.shell.tick(now)
    }

    /// Apply one command and describe the result.
    pub fn execute(&mut self, command: Command, now: Instant) -> String {
        match command {
            Command::DragStart => {
                if self.shell.drag_start() {
                    "dragging".to_string()
                } else {
                    "ignored".to_string()
                }
            }
            Command::DragMove(x) => match self.shell.drag_move(x, Some(self.track)) {
                Ok(Some(progress)) => format!("progress {progress:.1}%"),
                Ok(None) => "ignored".to_string(),
                Err(e) => format!("error: {e}"),
            },
            Command::DragEnd => match self.shell.drag_end() {
                Ok(ReleaseOutcome::Committed { percent, .. }) => {
                    format!("released at {percent:.1}% - unlocking")
                }
                Ok(ReleaseOutcome::SnappedBack { released_at }) => {
                    format!("released at {released_at:.1}% - snapped back")
                }
                Ok(ReleaseOutcome::Ignored) => "ignored".to_string(),
                Err(e) => format!("error: {e}"),
            },
            Command::Open(kind) => self.open(kind),
            Command::Close => reply(self.shell.close_app(now)),
            Command::Escape => reply(self.shell.escape(now)),
            Command::Swipe { from, to } => match self.shell.photos_mut() {
                Some(app) => {
                    app.touch_start(from);
                    app.touch_move(to);
                    match app.touch_end() {
                        Some(direction) => format!("{direction:?}"),
                        None => "no swipe".to_string(),
                    }
                }
                None => "Photos is not open".to_string(),
            },
            Command::Photo(index) => {
                let opened = self.shell.photos_mut().is_some_and(|app| app.open_photo(index));
                reply(opened)
            }
            Command::Next => {
                let moved = self.shell.photos_mut().is_some_and(|app| app.next());
                reply(moved)
            }
            Command::Prev => {
                let moved = self.shell.photos_mut().is_some_and(|app| app.prev());
                reply(moved)
            }
            Command::Mail(view) => match self.shell.mail_mut() {
                Some(app) => {
                    app.show(view);
                    "ok".to_string()
                }
                None => "Mail is not open".to_string(),
            },
            Command::Sign { name, message } => self.sign(name, message),
            Command::Chat(id) => {
                let opened = self.shell.messages_mut().is_some_and(|app| app.open_chat(&id));
                reply(opened)
            }
            Command::Profile(id) => {
                let opened = self
                    .shell
                    .messages_mut()
                    .is_some_and(|app| app.open_profile(&id));
                reply(opened)
            }
            Command::Back => {
                let Some(app) = self.shell.messages_mut() else {
                    return "Messages is not open".to_string();
                };
                app.back();
                "ok".to_string()
            }
            Command::Copy(index) => {
                let toast = self.shell.config().transitions.toast_duration();
                match self
                    .shell
                    .wallet_mut()
                    .and_then(|app| app.copy_account(index, now, toast))
                {
                    Some(text) => format!("copied {text}"),
                    None => "nothing to copy".to_string(),
                }
            }
            Command::Directions(provider) => {
                let Some(app) = self.shell.maps() else {
                    return "Maps is not open".to_string();
                };
                match app.open_directions(provider) {
                    Some(url) => format!("open {url}"),
                    None => format!("no {} link", provider.label()),
                }
            }
            Command::Status => self.status(now),
            Command::Help => HELP.to_string(),
            Command::Quit => "bye".to_string(),
        }
    }

    fn open(&mut self, kind: AppKind) -> String {
        match self.shell.launch(kind) {
            LaunchOutcome::Opened => {
                if let Some(request) = self.shell.photos_mut().map(|app| app.request()) {
                    self.spawn_gallery_load(request);
                }
                format!("opened {}", kind.label())
            }
            LaunchOutcome::External(url) => format!("open {url}"),
            LaunchOutcome::Inert => "nothing happens".to_string(),
            LaunchOutcome::Busy => "another app is open".to_string(),
            LaunchOutcome::Locked => "locked".to_string(),
        }
    }

    fn spawn_gallery_load(&self, request: u64) {
        let store = self.objects.clone();
        let prefix = self.shell.config().gallery.prefix.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = load_gallery(store.as_ref(), &prefix).await;
            if events
                .send(ShellEvent::GalleryLoaded { request, result })
                .is_err()
            {
                tracing::debug!("Shell gone before gallery arrived");
            }
        });
    }

    fn sign(&mut self, name: String, message: String) -> String {
        let Some(app) = self.shell.mail_mut() else {
            return "Mail is not open".to_string();
        };
        if app.is_submitting() {
            return "already sending".to_string();
        }
        app.show(MailView::Write);
        app.set_name(name);
        app.set_content(message);
        let Some(draft) = app.begin_submit() else {
            return "name and message are required".to_string();
        };

        let submit = self.guestbook.submit(&draft);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = submit.await;
            if events.send(ShellEvent::GuestbookSubmitted(result)).is_err() {
                tracing::debug!("Shell gone before guestbook insert finished");
            }
        });
        "sending".to_string()
    }

    /// Human-readable summary of what is on screen.
    pub fn status(&self, now: Instant) -> String {
        let mut out = String::new();
        let local = Local::now();
        let _ = writeln!(out, "{}  {}", format_time(&local), format_date_ko(&local));

        match self.shell.phase() {
            ShellPhase::Locked(lock) => {
                let _ = write!(
                    out,
                    "locked ({:?}, {:.1}%{})",
                    lock.unlock.phase(),
                    lock.unlock.progress(),
                    if lock.is_fading() { ", fading" } else { "" }
                );
            }
            ShellPhase::Home(home) => {
                let days = days_until(local.date_naive(), self.shell.config().event.wedding_date);
                let _ = writeln!(out, "home  {}", dday_label(days));
                match &home.window {
                    None => {
                        let _ = write!(out, "no window");
                    }
                    Some(window) => {
                        let stage = match window.stage {
                            WindowStage::Open => "open",
                            WindowStage::Closing { .. } => "closing",
                        };
                        let _ = write!(out, "{} ({})", window.kind.label(), stage);
                        self.describe_content(&mut out, &window.content, now);
                    }
                }
            }
        }
        out
    }

    fn describe_content(&self, out: &mut String, content: &AppContent, now: Instant) {
        match content {
            AppContent::Photos(app) => {
                if app.is_loading() {
                    let _ = write!(out, "\nloading...");
                } else if let Some(error) = app.error() {
                    let _ = write!(out, "\n{error}");
                }
                let _ = write!(out, "\n{} photos", app.photos().len());
                if let (Some(index), Some(photo)) =
                    (app.viewer().current_index(), app.current_photo())
                {
                    let _ = write!(out, ", viewing #{} {}", index + 1, photo.name);
                }
            }
            AppContent::Mail(app) => {
                let _ = write!(out, "\n{:?}", app.view());
                if app.is_submitting() {
                    let _ = write!(out, " (sending)");
                }
                if let Some(error) = app.error() {
                    let _ = write!(out, "\n{error}");
                }
                if app.view() == MailView::List {
                    for entry in self.guestbook.entries() {
                        let _ = write!(out, "\n{}: {}", entry.name, entry.content);
                    }
                }
            }
            AppContent::Messages(app) => {
                match app.view() {
                    MessagesView::List => {
                        for profile in app.profiles() {
                            let _ = write!(
                                out,
                                "\n{} ({}): {}",
                                profile.name,
                                profile.id,
                                profile.last_message().unwrap_or_default()
                            );
                        }
                    }
                    MessagesView::ChatRoom(_) => {
                        if let Some(profile) = app.open_chat_profile() {
                            for line in &profile.chat {
                                let _ = write!(out, "\n[{}] {}", line.time, line.text);
                            }
                        }
                    }
                }
                if let Some(profile) = app.profile_card() {
                    let _ = write!(
                        out,
                        "\nprofile: {} - {}",
                        profile.name,
                        profile.status.as_deref().unwrap_or_default()
                    );
                }
            }
            AppContent::Wallet(app) => {
                for (side, title) in [(AccountSide::Groom, "groom"), (AccountSide::Bride, "bride")] {
                    let _ = write!(out, "\n{title}");
                    for (i, account) in app.accounts_for(side) {
                        let _ = write!(
                            out,
                            "\n  {i}. {} {} {}",
                            account.holder, account.bank, account.number
                        );
                    }
                }
                if app.toast_visible(now) {
                    let _ = write!(out, "\ncopied to clipboard");
                }
            }
            AppContent::Maps(app) => {
                let venue = app.venue();
                let _ = write!(out, "\n{} {}", venue.name, venue.phone);
                let _ = write!(out, "\n({})\n{}", venue.building, venue.address);
                for notice in &venue.notices {
                    let _ = write!(out, "\n* {notice}");
                }
                for route in app.routes() {
                    let _ = write!(out, "\n{}", route.title);
                    for step in &route.steps {
                        let _ = write!(out, "\n  - {step}");
                    }
                }
                let labels: Vec<_> = app.providers().map(|p| p.label()).collect();
                let _ = write!(out, "\ndirections: {}", labels.join(" | "));
            }
            AppContent::Invite => {}
        }
    }
}

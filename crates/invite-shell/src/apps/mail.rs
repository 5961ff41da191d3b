//! Mail app: the guestbook.
//!
//! `Home` offers writing or reading. Submitting is two-phase because the
//! insert is async: `begin_submit` hands the host a validated draft,
//! `finish_submit` applies the result.

use invite_core::{GuestEntryDraft, StoreError};

use super::EscapeOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MailView {
    #[default]
    Home,
    Write,
    List,
}

/// Mail app state.
#[derive(Debug, Default)]
pub struct MailApp {
    view: MailView,
    form: GuestEntryDraft,
    submitting: bool,
    error: Option<String>,
}

impl MailApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> MailView {
        self.view
    }

    pub fn form(&self) -> &GuestEntryDraft {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Error from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn show(&mut self, view: MailView) {
        self.view = view;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.form.name = name.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
    }

    /// Whether the send button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.form.is_complete()
    }

    /// Validate the form and mark it in flight.
    ///
    /// Returns `None` for blank fields or while a submit is pending.
    pub fn begin_submit(&mut self) -> Option<GuestEntryDraft> {
        if self.submitting {
            return None;
        }
        let draft = self.form.validate()?;
        self.submitting = true;
        self.error = None;
        Some(draft)
    }

    /// Apply the result of the insert started by `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<String, StoreError>) {
        self.submitting = false;
        match result {
            Ok(id) => {
                tracing::debug!("Guestbook entry {} sent", id);
                self.form = GuestEntryDraft::default();
                self.view = MailView::List;
            }
            Err(e) => {
                tracing::warn!("Guestbook submit failed: {}", e);
                self.error = Some("Sending failed. Please try again.".to_string());
            }
        }
    }

    pub fn escape(&mut self) -> EscapeOutcome {
        match self.view {
            MailView::Home => EscapeOutcome::Close,
            MailView::Write | MailView::List => {
                self.view = MailView::Home;
                EscapeOutcome::Consumed
            }
        }
    }
}

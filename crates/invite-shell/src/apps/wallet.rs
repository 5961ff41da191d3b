//! Wallet app: gift accounts for both families.

use invite_core::{AccountSide, WalletAccount};
use std::time::Duration;
use tokio::time::Instant;

/// Account number as pasted into a banking app.
pub fn clipboard_text(number: &str) -> String {
    number.chars().filter(|c| *c != '-').collect()
}

/// Wallet app state.
#[derive(Debug, Default)]
pub struct WalletApp {
    accounts: Vec<WalletAccount>,
    toast_until: Option<Instant>,
}

impl WalletApp {
    pub fn new(accounts: Vec<WalletAccount>) -> Self {
        Self {
            accounts,
            toast_until: None,
        }
    }

    pub fn accounts(&self) -> &[WalletAccount] {
        &self.accounts
    }

    /// Accounts of one family in configured order, with the index
    /// `copy_account` expects.
    pub fn accounts_for(
        &self,
        side: AccountSide,
    ) -> impl Iterator<Item = (usize, &WalletAccount)> {
        self.accounts
            .iter()
            .enumerate()
            .filter(move |(_, a)| a.side == side)
    }

    /// Copy button. Returns the clipboard text and shows the toast.
    pub fn copy_account(&mut self, index: usize, now: Instant, toast: Duration) -> Option<String> {
        let account = self.accounts.get(index)?;
        let text = clipboard_text(&account.number);
        tracing::debug!("Copied {} account of {}", account.bank, account.holder);
        self.toast_until = Some(now + toast);
        Some(text)
    }

    pub fn toast_visible(&self, now: Instant) -> bool {
        self.toast_until.is_some_and(|until| now < until)
    }

    /// Drop the toast once it has expired.
    pub fn tick(&mut self, now: Instant) {
        if !self.toast_visible(now) {
            self.toast_until = None;
        }
    }
}

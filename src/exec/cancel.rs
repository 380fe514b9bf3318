//! Signal-driven cancellation.

use crate::error::Result;
use crate::ui;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

/// Shared cancellation flag. The first reason recorded wins until the
/// token is re-armed.
///
/// A runner re-arms its token at the start of every command, so a
/// cancellation only ever applies to the command in flight when it
/// arrived.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    reason: Arc<Mutex<Option<String>>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self, reason: impl Into<String>) {
        let mut slot = self.lock();
        if slot.is_none() {
            *slot = Some(reason.into());
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.lock().is_some()
    }

    pub fn reason(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Forget any earlier cancellation.
    pub fn rearm(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.reason.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

static SIGNAL_TOKEN: OnceLock<CancelToken> = OnceLock::new();

/// Token cancelled by SIGINT or SIGTERM.
///
/// The handler is installed on first call; later calls return the same token.
pub fn signal_token() -> Result<CancelToken> {
    if let Some(token) = SIGNAL_TOKEN.get() {
        return Ok(token.clone());
    }

    let token = CancelToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || {
        ui::mark_interrupted();
        handler_token.cancel("received interrupt or termination signal");
    })?;

    Ok(SIGNAL_TOKEN.get_or_init(|| token).clone())
}

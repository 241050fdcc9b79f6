//! The Notification Sink: one-way, user-visible messages about failed cart
//! operations.
//!
//! The cart fires exactly one [`Notice`] per failed operation and none on success
//! or on ignored requests. The UI decides how to render it (toast, status line).

use std::fmt::Display;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

/// Why a removal failed. Both variants show the same message to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveFailure {
    /// The product was not in the cart.
    NotInCart,
    /// The new cart could not be written to storage.
    Persistence,
}

/// The fixed set of messages the cart sends to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AddFailed,
    RemoveFailed(RemoveFailure),
    UpdateFailed,
    InsufficientStock,
}

impl Notice {
    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::AddFailed => "Error adding product",
            Notice::RemoveFailed(_) => "Error removing product",
            Notice::UpdateFailed => "Error changing product amount",
            Notice::InsufficientStock => "Requested amount is out of stock",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives notices. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log. The default sink for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(?notice, "{}", notice.message());
    }
}

/// Forwards notices to a UI loop over an unbounded channel.
///
/// Notices sent after the receiver is gone are dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        let _ = self.sender.send(notice);
    }
}

/// Keeps every notice in memory, for assertions in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_default()
    }

    /// Removes and returns the notices received so far.
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut notices| std::mem::take(&mut *notices))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

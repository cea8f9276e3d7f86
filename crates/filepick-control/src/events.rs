//! Notifications the control sends to its host
//!
//! Delivery is fire-and-forget: the control never waits for, or learns about, what the
//! host does with an event.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use filepick_core::{FileStatus, SelectedFileEntry, UploadResponseRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlEvent {
    /// Newly chosen files that passed the acceptance checks
    #[serde(rename_all = "camelCase")]
    FileListChanged { new_files: Vec<SelectedFileEntry> },
    /// A file removal was requested from the selected-file list
    #[serde(rename_all = "camelCase")]
    FileRemoved {
        removed_file: SelectedFileEntry,
        status: FileStatus,
        response: Option<UploadResponseRecord>,
    },
}

impl ControlEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ControlEvent::FileListChanged { .. } => "file-list-changed",
            ControlEvent::FileRemoved { .. } => "file-removed",
        }
    }
}

/// Receiver side of control notifications
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ControlEvent);
}

/// Sink that drops every event, for hosts that poll the control state instead
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event: ControlEvent) {}
}

/// Sink forwarding events into an unbounded tokio channel
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ControlEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ControlEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: ControlEvent) {
        let name = event.name();
        if self.tx.send(event).is_err() {
            tracing::warn!(event = name, "Event receiver dropped, notification discarded");
        }
    }
}

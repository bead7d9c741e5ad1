use std::time::Duration;

use crate::{FileDescriptor, NotificationId};

/// Work the host must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Begin the repeating status poll (first request immediately).
    StartStatusPolling,
    /// Cancel the repeating status poll. In-flight requests are left alone.
    StopStatusPolling,
    /// One-off status request outside the polling schedule.
    RefreshStatus,
    UploadFiles { files: Vec<FileDescriptor> },
    IngestUrl { url: String },
    AskQuestion { query: String },
    ClearIndex,
    /// Reset any native file-picker widget so the same file can be picked again.
    ResetFilePicker,
    /// Deliver `Msg::NotificationExpired { id }` after `after` has elapsed.
    ExpireNotification { id: NotificationId, after: Duration },
}

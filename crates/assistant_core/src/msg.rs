use crate::{BackendStatus, FileDescriptor, Mode, NotificationId};

/// Failure of a backend request as the controller sees it.
///
/// `detail` carries the backend's human-readable explanation when it sent one;
/// transport and decode failures leave it empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackendFailure {
    pub detail: Option<String>,
}

impl BackendFailure {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    pub fn generic() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The controller became visible; polling starts.
    Mounted,
    /// The controller is being torn down; polling stops.
    Unmounted,
    /// User switched ingestion mode.
    ModeSelected(Mode),
    /// User picked files. Replaces the previous selection.
    FilesSelected(Vec<FileDescriptor>),
    /// User removed one selected file by position.
    FileRemoved { index: usize },
    /// User edited the URL box.
    UrlInputChanged(String),
    /// User submitted the file selection.
    UploadFilesClicked,
    /// User submitted the URL.
    UploadUrlClicked,
    /// User edited the question box.
    QuestionInputChanged(String),
    /// User pressed the ask button.
    AskClicked,
    /// User pressed Enter in the question box. `soft_newline` is set when a
    /// modifier was held, which inserts a line break instead of submitting.
    QuestionEnterPressed { soft_newline: bool },
    /// User asked to empty the transcript.
    ClearChatClicked,
    /// User asked to wipe the backend index; a confirmation is requested first.
    ClearIndexClicked,
    /// User's answer to the clear-index confirmation.
    ClearIndexAnswered(bool),
    /// A status request (poll or refresh) succeeded.
    StatusRefreshed(BackendStatus),
    /// A status request failed. Logged only.
    StatusPollFailed { reason: String },
    /// Completion of `Effect::UploadFiles`; `Ok` carries the backend message.
    FilesUploaded { result: Result<Option<String>, BackendFailure> },
    /// Completion of `Effect::IngestUrl`; `Ok` carries the backend message.
    UrlIngested { result: Result<Option<String>, BackendFailure> },
    /// Completion of `Effect::AskQuestion`; `Ok` carries the answer text.
    AnswerReceived { result: Result<String, BackendFailure> },
    /// Completion of `Effect::ClearIndex`; `Ok` carries the backend message.
    IndexCleared { result: Result<Option<String>, BackendFailure> },
    /// Display lifetime of a notification ran out.
    NotificationExpired { id: NotificationId },
    /// Reserved wake-up for hosts with a frame clock. Changes nothing.
    Tick,
    /// Changes nothing.
    NoOp,
}

use crate::{BackendStatus, Mode, Notification, Turn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub name: String,
    pub size: u64,
}

/// Everything a host needs to draw the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: Mode,
    pub files: Vec<FileRowView>,
    pub url_input: String,
    pub status: BackendStatus,
    pub turns: Vec<Turn>,
    /// Bumped each time the chat is cleared, so hosts can tell a clear from a
    /// withdrawn question.
    pub chat_generation: u64,
    pub question_input: String,
    pub notification: Option<Notification>,
    pub loading: bool,
    pub can_upload_files: bool,
    pub can_upload_url: bool,
    /// Questions are accepted only while the index is ready and nothing else is
    /// in flight.
    pub can_ask: bool,
    pub awaiting_clear_confirmation: bool,
    pub polling: bool,
    pub dirty: bool,
}

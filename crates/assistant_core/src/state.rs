use crate::view_model::{AppViewModel, FileRowView};
use crate::{BackendStatus, Checkpoint, Conversation, Ingestion, NotificationCenter, TaskLock};

/// Complete session controller state. Mutated only by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) ingestion: Ingestion,
    pub(crate) status: BackendStatus,
    pub(crate) conversation: Conversation,
    pub(crate) question_input: String,
    pub(crate) notifications: NotificationCenter,
    pub(crate) lock: TaskLock,
    /// Checkpoint of the question currently in flight.
    pub(crate) pending_exchange: Option<Checkpoint>,
    pub(crate) awaiting_clear_confirmation: bool,
    pub(crate) polling: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingestion(&self) -> &Ingestion {
        &self.ingestion
    }

    pub fn status(&self) -> BackendStatus {
        self.status
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn is_loading(&self) -> bool {
        self.lock.is_held()
    }

    pub fn view(&self) -> AppViewModel {
        let loading = self.is_loading();
        let mode = self.ingestion.mode();
        AppViewModel {
            mode,
            files: self
                .ingestion
                .files()
                .iter()
                .map(|file| FileRowView {
                    name: file.name.clone(),
                    size: file.size,
                })
                .collect(),
            url_input: self.ingestion.url_input().to_string(),
            status: self.status,
            turns: self.conversation.turns().to_vec(),
            chat_generation: self.conversation.generation(),
            question_input: self.question_input.clone(),
            notification: self.notifications.current().cloned(),
            loading,
            can_upload_files: !loading && mode == crate::Mode::File,
            can_upload_url: !loading && mode == crate::Mode::Url,
            can_ask: !loading && self.status.is_ready(),
            awaiting_clear_confirmation: self.awaiting_clear_confirmation,
            polling: self.polling,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets
    /// the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

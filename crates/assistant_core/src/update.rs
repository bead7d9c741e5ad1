use assistant_logging::{assistant_debug, assistant_info, assistant_warn};

use crate::{AppState, BackendFailure, BackendStatus, Effect, Mode, Msg, Operation, Severity, Turn};

const MSG_NO_FILES: &str = "Please select at least one file";
const MSG_NO_URL: &str = "Please enter a URL";
const MSG_NO_QUESTION: &str = "Please enter a question";
const MSG_THINKING: &str = "Thinking...";
const MSG_CHAT_CLEARED: &str = "Chat cleared";
const MSG_UPLOAD_OK: &str = "Files uploaded successfully";
const MSG_URL_OK: &str = "Website processed successfully";
const MSG_ANSWER_OK: &str = "Answer received";
const MSG_INDEX_CLEARED: &str = "Index cleared";
const MSG_UPLOAD_FAILED: &str = "Upload failed";
const MSG_URL_FAILED: &str = "URL processing failed";
const MSG_ASK_FAILED: &str = "Failed to get an answer";
const MSG_CLEAR_FAILED: &str = "Failed to clear index";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.polling {
                Vec::new()
            } else {
                state.polling = true;
                state.mark_dirty();
                vec![Effect::StartStatusPolling]
            }
        }
        Msg::Unmounted => {
            if state.polling {
                state.polling = false;
                state.mark_dirty();
                vec![Effect::StopStatusPolling]
            } else {
                Vec::new()
            }
        }
        Msg::ModeSelected(mode) => {
            if state.ingestion.set_mode(mode) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            assistant_debug!("Selected {} file(s)", files.len());
            state.ingestion.select_files(files);
            state.mark_dirty();
            vec![Effect::RefreshStatus]
        }
        Msg::FileRemoved { index } => match state.ingestion.remove_file(index) {
            Some(now_empty) => {
                state.mark_dirty();
                if now_empty {
                    vec![Effect::ResetFilePicker]
                } else {
                    Vec::new()
                }
            }
            None => {
                assistant_debug!("Ignoring removal of file #{} (out of range)", index);
                Vec::new()
            }
        },
        Msg::UrlInputChanged(text) => {
            state.ingestion.set_url_input(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::UploadFilesClicked => submit_files(&mut state),
        Msg::UploadUrlClicked => submit_url(&mut state),
        Msg::FilesUploaded { result } => {
            if !release(&mut state, Operation::UploadFiles) {
                return (state, Vec::new());
            }
            match result {
                Ok(message) => {
                    assistant_info!("Upload finished");
                    state.ingestion.clear_files();
                    let notice = message.unwrap_or_else(|| MSG_UPLOAD_OK.to_string());
                    vec![
                        notify(&mut state, notice, Severity::Success),
                        Effect::ResetFilePicker,
                        Effect::RefreshStatus,
                    ]
                }
                Err(failure) => vec![notify_failure(&mut state, failure, MSG_UPLOAD_FAILED)],
            }
        }
        Msg::UrlIngested { result } => {
            if !release(&mut state, Operation::IngestUrl) {
                return (state, Vec::new());
            }
            match result {
                Ok(message) => {
                    assistant_info!("URL ingestion finished");
                    state.ingestion.clear_url();
                    let notice = message.unwrap_or_else(|| MSG_URL_OK.to_string());
                    vec![
                        notify(&mut state, notice, Severity::Success),
                        Effect::RefreshStatus,
                    ]
                }
                Err(failure) => vec![notify_failure(&mut state, failure, MSG_URL_FAILED)],
            }
        }
        Msg::QuestionInputChanged(text) => {
            state.question_input = text;
            state.mark_dirty();
            Vec::new()
        }
        Msg::AskClicked | Msg::QuestionEnterPressed { soft_newline: false } => {
            ask_question(&mut state)
        }
        Msg::QuestionEnterPressed { soft_newline: true } => {
            state.question_input.push('\n');
            state.mark_dirty();
            Vec::new()
        }
        Msg::AnswerReceived { result } => {
            if !release(&mut state, Operation::AskQuestion) {
                return (state, Vec::new());
            }
            let checkpoint = state.pending_exchange.take();
            match result {
                Ok(answer) => {
                    let committed = checkpoint
                        .map(|checkpoint| {
                            state
                                .conversation
                                .commit(checkpoint, Turn::assistant(answer))
                        })
                        .unwrap_or(false);
                    if !committed {
                        assistant_debug!("Dropping answer for a conversation that was cleared");
                        return (state, Vec::new());
                    }
                    vec![notify(&mut state, MSG_ANSWER_OK, Severity::Success)]
                }
                Err(failure) => {
                    if let Some(checkpoint) = checkpoint {
                        state.conversation.rollback(checkpoint);
                    }
                    vec![notify_failure(&mut state, failure, MSG_ASK_FAILED)]
                }
            }
        }
        Msg::ClearChatClicked => {
            state.conversation.clear();
            vec![notify(&mut state, MSG_CHAT_CLEARED, Severity::Info)]
        }
        Msg::ClearIndexClicked => {
            if !state.awaiting_clear_confirmation {
                state.awaiting_clear_confirmation = true;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ClearIndexAnswered(confirmed) => {
            if !state.awaiting_clear_confirmation {
                return (state, Vec::new());
            }
            state.awaiting_clear_confirmation = false;
            state.mark_dirty();
            if confirmed {
                assistant_info!("Clearing backend index");
                vec![Effect::ClearIndex]
            } else {
                Vec::new()
            }
        }
        Msg::IndexCleared { result } => match result {
            Ok(message) => {
                state.status = BackendStatus::no_documents();
                let notice = message.unwrap_or_else(|| MSG_INDEX_CLEARED.to_string());
                vec![notify(&mut state, notice, Severity::Success)]
            }
            Err(failure) => {
                assistant_warn!("Clearing the index failed: {:?}", failure.detail);
                vec![notify(&mut state, MSG_CLEAR_FAILED, Severity::Error)]
            }
        },
        Msg::StatusRefreshed(status) => {
            if state.status != status {
                state.status = status;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::StatusPollFailed { reason } => {
            // Keep the last known status.
            assistant_warn!("Status request failed: {}", reason);
            Vec::new()
        }
        Msg::NotificationExpired { id } => {
            if state.notifications.expire(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_files(state: &mut AppState) -> Vec<Effect> {
    if state.ingestion.mode() != Mode::File {
        return Vec::new();
    }
    if state.ingestion.files().is_empty() {
        return vec![notify(state, MSG_NO_FILES, Severity::Warning)];
    }
    if !acquire(state, Operation::UploadFiles) {
        return Vec::new();
    }
    vec![Effect::UploadFiles {
        files: state.ingestion.files().to_vec(),
    }]
}

fn submit_url(state: &mut AppState) -> Vec<Effect> {
    if state.ingestion.mode() != Mode::Url {
        return Vec::new();
    }
    let Some(url) = state.ingestion.submittable_url() else {
        return vec![notify(state, MSG_NO_URL, Severity::Warning)];
    };
    if !acquire(state, Operation::IngestUrl) {
        return Vec::new();
    }
    vec![Effect::IngestUrl { url }]
}

fn ask_question(state: &mut AppState) -> Vec<Effect> {
    let query = state.question_input.trim().to_string();
    if query.is_empty() {
        return vec![notify(state, MSG_NO_QUESTION, Severity::Warning)];
    }
    if !acquire(state, Operation::AskQuestion) {
        return Vec::new();
    }

    // The question is shown before the request goes out.
    let checkpoint = state.conversation.begin_exchange(Turn::user(query.clone()));
    state.pending_exchange = Some(checkpoint);
    state.question_input.clear();
    let expire = notify(state, MSG_THINKING, Severity::Info);
    vec![expire, Effect::AskQuestion { query }]
}

fn acquire(state: &mut AppState, operation: Operation) -> bool {
    if state.lock.try_acquire(operation) {
        state.mark_dirty();
        true
    } else {
        assistant_debug!(
            "Ignoring {:?}: {:?} is still in flight",
            operation,
            state.lock.holder()
        );
        false
    }
}

fn release(state: &mut AppState, operation: Operation) -> bool {
    if state.lock.release(operation) {
        state.mark_dirty();
        true
    } else {
        assistant_warn!("Completion for {:?} without a matching request", operation);
        false
    }
}

fn notify(state: &mut AppState, message: impl Into<String>, severity: Severity) -> Effect {
    state.mark_dirty();
    state.notifications.notify(message, severity)
}

fn notify_failure(state: &mut AppState, failure: BackendFailure, fallback: &str) -> Effect {
    let message = failure
        .detail
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    notify(state, message, Severity::Error)
}

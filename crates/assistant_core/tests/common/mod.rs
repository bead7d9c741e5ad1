#![allow(dead_code)]

use std::sync::Once;

use assistant_core::{update, AppState, BackendStatus, Effect, FileDescriptor, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(assistant_logging::initialize_for_tests);
}

pub fn file(name: &str, size: u64) -> FileDescriptor {
    FileDescriptor::new(name, size, format!("/data/{name}"))
}

/// Applies messages in order and returns the final state with every effect.
pub fn apply(state: AppState, msgs: impl IntoIterator<Item = Msg>) -> (AppState, Vec<Effect>) {
    msgs.into_iter()
        .fold((state, Vec::new()), |(state, mut effects), msg| {
            let (state, new_effects) = update(state, msg);
            effects.extend(new_effects);
            (state, effects)
        })
}

pub fn ready_state() -> AppState {
    let (mut state, _) = update(AppState::new(), Msg::StatusRefreshed(BackendStatus::ready()));
    state.consume_dirty();
    state
}

pub fn ask(state: AppState, question: &str) -> (AppState, Vec<Effect>) {
    apply(
        state,
        [Msg::QuestionInputChanged(question.to_string()), Msg::AskClicked],
    )
}

pub fn has_request(effects: &[Effect]) -> bool {
    effects.iter().any(|effect| {
        matches!(
            effect,
            Effect::UploadFiles { .. }
                | Effect::IngestUrl { .. }
                | Effect::AskQuestion { .. }
                | Effect::ClearIndex
        )
    })
}

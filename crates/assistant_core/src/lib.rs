//! Assistant core: the session controller as a pure state machine.
//!
//! Hosts feed [`Msg`]s into [`update`], run the returned [`Effect`]s, and feed
//! each effect's completion back in as another message.
mod conversation;
mod effect;
mod ingestion;
mod msg;
mod notification;
mod state;
mod status;
mod task_lock;
mod update;
mod view_model;

pub use conversation::{Checkpoint, Conversation, Role, Turn};
pub use effect::Effect;
pub use ingestion::{FileDescriptor, Ingestion, Mode};
pub use msg::{BackendFailure, Msg};
pub use notification::{
    Notification, NotificationCenter, NotificationId, Severity, NOTIFICATION_LIFETIME,
};
pub use state::AppState;
pub use status::{BackendStatus, Readiness};
pub use task_lock::{Operation, TaskLock};
pub use update::update;
pub use view_model::{AppViewModel, FileRowView};

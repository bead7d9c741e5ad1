//! Assistant client: HTTP access to the question-answering backend and the
//! worker that runs requests and status polling off the UI thread.
mod api;
mod config;
mod engine;
mod poller;
mod types;

pub use api::{BackendApi, ReqwestBackend};
pub use config::{
    ClientConfig, ConfigError, API_URL_ENV, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL,
};
pub use engine::{ChannelEventSink, ClientHandle, EventSink};
pub use poller::StatusPoller;
pub use types::{ClientError, ClientEvent, StatusReport, UploadSource};

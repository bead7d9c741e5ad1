use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusReport {
    pub status: String,
    #[serde(default)]
    pub index_exists: bool,
}

/// A file to send in an upload, read from `path` when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSource {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Status(Result<StatusReport, ClientError>),
    FilesUploaded(Result<Option<String>, ClientError>),
    UrlIngested(Result<Option<String>, ClientError>),
    Answered(Result<String, ClientError>),
    IndexCleared(Result<Option<String>, ClientError>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend returned status {code}")]
    Status { code: u16, detail: Option<String> },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("cannot read {path}: {message}")]
    ReadFile { path: String, message: String },
}

impl ClientError {
    /// Text worth showing to the user, if the failure carries any.
    pub fn user_detail(&self) -> Option<String> {
        match self {
            ClientError::Status { detail, .. } => detail.clone(),
            ClientError::ReadFile { .. } => Some(self.to_string()),
            ClientError::Timeout | ClientError::Transport(_) | ClientError::Decode(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,
}

/// Error body. `detail` is usually a string but validation errors send a list.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UrlRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionRequest<'a> {
    pub query: &'a str,
}

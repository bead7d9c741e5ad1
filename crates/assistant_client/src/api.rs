use assistant_logging::{assistant_debug, assistant_info};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::types::{AnswerResponse, ErrorBody, MessageResponse, QuestionRequest, UrlRequest};
use crate::{ClientConfig, ClientError, StatusReport, UploadSource};

/// Operations offered by the question-answering backend.
#[async_trait::async_trait]
pub trait BackendApi: Send + Sync {
    async fn status(&self) -> Result<StatusReport, ClientError>;

    /// Uploads every file as a repeated `files` multipart field. Returns the
    /// backend's confirmation message, if any.
    async fn upload_files(&self, files: &[UploadSource]) -> Result<Option<String>, ClientError>;

    async fn upload_url(&self, url: &str) -> Result<Option<String>, ClientError>;

    async fn ask(&self, query: &str) -> Result<String, ClientError>;

    async fn clear_index(&self) -> Result<Option<String>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl BackendApi for ReqwestBackend {
    async fn status(&self) -> Result<StatusReport, ClientError> {
        let response = self
            .client
            .get(self.config.endpoint("status"))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_json(response).await
    }

    async fn upload_files(&self, files: &[UploadSource]) -> Result<Option<String>, ClientError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|err| ClientError::ReadFile {
                    path: file.path.display().to_string(),
                    message: err.to_string(),
                })?;
            assistant_debug!("Attaching {} ({} bytes)", file.name, bytes.len());
            form = form.part("files", Part::bytes(bytes).file_name(file.name.clone()));
        }

        let response = self
            .client
            .post(self.config.endpoint("upload/"))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: MessageResponse = read_json(response).await?;
        Ok(body.message)
    }

    async fn upload_url(&self, url: &str) -> Result<Option<String>, ClientError> {
        let response = self
            .client
            .post(self.config.endpoint("upload-url/"))
            .json(&UrlRequest { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: MessageResponse = read_json(response).await?;
        Ok(body.message)
    }

    async fn ask(&self, query: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.config.endpoint("ask/"))
            .json(&QuestionRequest { query })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: AnswerResponse = read_json(response).await?;
        assistant_info!(
            "Answer received ({} chars, {} sources)",
            body.answer.len(),
            body.sources.len()
        );
        Ok(body.answer)
    }

    async fn clear_index(&self) -> Result<Option<String>, ClientError> {
        let response = self
            .client
            .delete(self.config.endpoint("clear/"))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: MessageResponse = read_json(response).await?;
        Ok(body.message)
    }
}

/// Decodes a success body, or turns a non-2xx response into
/// [`ClientError::Status`] carrying the backend's `detail`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(ClientError::Status {
            code: status.as_u16(),
            detail: parse_detail(&body),
        });
    }
    serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
}

fn parse_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        structured => Some(structured.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout;
    }
    ClientError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_detail;

    #[test]
    fn detail_is_taken_verbatim_from_string() {
        assert_eq!(
            parse_detail(br#"{"detail":"index missing"}"#).as_deref(),
            Some("index missing")
        );
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let body = br#"{"detail":[{"loc":["body","query"],"msg":"field required"}]}"#;
        let detail = parse_detail(body).unwrap();
        assert!(detail.starts_with('['));
        assert!(detail.contains("field required"));
    }

    #[test]
    fn missing_or_unparseable_detail_is_none() {
        assert_eq!(parse_detail(b"{}"), None);
        assert_eq!(parse_detail(br#"{"detail":null}"#), None);
        assert_eq!(parse_detail(b"Internal Server Error"), None);
    }
}

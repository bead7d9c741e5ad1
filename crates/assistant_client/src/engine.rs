use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use assistant_logging::{assistant_debug, assistant_info, assistant_warn};

use crate::{BackendApi, ClientEvent, StatusPoller, UploadSource};

/// Receives the outcome of every request the client runs.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    StartPolling,
    StopPolling,
    RefreshStatus,
    UploadFiles(Vec<UploadSource>),
    IngestUrl(String),
    Ask(String),
    ClearIndex,
}

/// Front door to the backend for a synchronous host.
///
/// Commands are queued to a worker thread that owns a tokio runtime; results
/// come back through the [`EventSink`]. Dropping the handle stops the worker,
/// which also cancels polling.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(
        api: Arc<dyn BackendApi>,
        poll_interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("assistant-client-io")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("assistant-client".to_string())
            .spawn(move || {
                let mut poller: Option<StatusPoller> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        ClientCommand::StartPolling => {
                            assistant_info!("Polling status every {:?}", poll_interval);
                            // Replacing an existing poller drops (and cancels) it.
                            poller = Some(StatusPoller::spawn(
                                runtime.handle(),
                                api.clone(),
                                poll_interval,
                                sink.clone(),
                            ));
                        }
                        ClientCommand::StopPolling => {
                            if let Some(poller) = poller.take() {
                                poller.stop();
                            }
                        }
                        request => {
                            let api = api.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                run_request(api.as_ref(), request, sink.as_ref()).await;
                            });
                        }
                    }
                }
                assistant_debug!("Client worker shutting down");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn start_polling(&self) {
        self.send(ClientCommand::StartPolling);
    }

    pub fn stop_polling(&self) {
        self.send(ClientCommand::StopPolling);
    }

    pub fn refresh_status(&self) {
        self.send(ClientCommand::RefreshStatus);
    }

    pub fn upload_files(&self, files: Vec<UploadSource>) {
        self.send(ClientCommand::UploadFiles(files));
    }

    pub fn ingest_url(&self, url: impl Into<String>) {
        self.send(ClientCommand::IngestUrl(url.into()));
    }

    pub fn ask(&self, query: impl Into<String>) {
        self.send(ClientCommand::Ask(query.into()));
    }

    pub fn clear_index(&self) {
        self.send(ClientCommand::ClearIndex);
    }

    fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            assistant_warn!("Client worker is gone; dropping command");
        }
    }
}

async fn run_request(api: &dyn BackendApi, command: ClientCommand, sink: &dyn EventSink) {
    let event = match command {
        ClientCommand::RefreshStatus => ClientEvent::Status(api.status().await),
        ClientCommand::UploadFiles(files) => {
            assistant_info!("Uploading {} file(s)", files.len());
            let result = api.upload_files(&files).await;
            log_outcome("upload", &result);
            ClientEvent::FilesUploaded(result)
        }
        ClientCommand::IngestUrl(url) => {
            assistant_info!("Submitting URL {}", url);
            let result = api.upload_url(&url).await;
            log_outcome("url ingest", &result);
            ClientEvent::UrlIngested(result)
        }
        ClientCommand::Ask(query) => {
            assistant_info!("Asking question ({} chars)", query.len());
            let result = api.ask(&query).await;
            log_outcome("ask", &result);
            ClientEvent::Answered(result)
        }
        ClientCommand::ClearIndex => {
            let result = api.clear_index().await;
            log_outcome("clear index", &result);
            ClientEvent::IndexCleared(result)
        }
        ClientCommand::StartPolling | ClientCommand::StopPolling => return,
    };
    sink.emit(event);
}

fn log_outcome<T>(operation: &str, result: &Result<T, crate::ClientError>) {
    match result {
        Ok(_) => assistant_info!("{} succeeded", operation),
        Err(err) => assistant_warn!("{} failed: {} ({:?})", operation, err, err.user_detail()),
    }
}

use std::sync::mpsc;
use std::thread;

use assistant_client::{
    ClientError, ClientEvent, ClientHandle, EventSink, StatusReport, UploadSource,
};
use assistant_core::{BackendFailure, BackendStatus, Effect, Msg, Readiness};
use assistant_logging::{assistant_debug, assistant_info};

use crate::app::AppEvent;

/// Executes effects returned by `update` against the backend client.
pub struct EffectRunner {
    client: ClientHandle,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, events: mpsc::Sender<AppEvent>) -> Self {
        Self { client, events }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartStatusPolling => self.client.start_polling(),
                Effect::StopStatusPolling => self.client.stop_polling(),
                Effect::RefreshStatus => self.client.refresh_status(),
                Effect::UploadFiles { files } => {
                    let sources = files
                        .into_iter()
                        .map(|file| UploadSource {
                            name: file.name,
                            path: file.path,
                        })
                        .collect();
                    self.client.upload_files(sources);
                }
                Effect::IngestUrl { url } => self.client.ingest_url(url),
                Effect::AskQuestion { query } => self.client.ask(query),
                Effect::ClearIndex => self.client.clear_index(),
                Effect::ResetFilePicker => {
                    // The terminal picker is stateless; `/files` always starts fresh.
                    assistant_debug!("File picker reset");
                }
                Effect::ExpireNotification { id, after } => {
                    let events = self.events.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = events.send(AppEvent::Core(Msg::NotificationExpired { id }));
                    });
                }
            }
        }
    }
}

/// Turns client events into core messages on the host's event channel.
pub struct CoreEventSink {
    events: mpsc::Sender<AppEvent>,
}

impl CoreEventSink {
    pub fn new(events: mpsc::Sender<AppEvent>) -> Self {
        Self { events }
    }
}

impl EventSink for CoreEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(AppEvent::Core(to_msg(event)));
    }
}

pub fn to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Status(Ok(report)) => Msg::StatusRefreshed(map_status(&report)),
        ClientEvent::Status(Err(err)) => Msg::StatusPollFailed {
            reason: err.to_string(),
        },
        ClientEvent::FilesUploaded(result) => Msg::FilesUploaded {
            result: result.map_err(to_failure),
        },
        ClientEvent::UrlIngested(result) => Msg::UrlIngested {
            result: result.map_err(to_failure),
        },
        ClientEvent::Answered(result) => Msg::AnswerReceived {
            result: result.map_err(to_failure),
        },
        ClientEvent::IndexCleared(result) => {
            if let Ok(message) = &result {
                assistant_info!("Index cleared: {:?}", message);
            }
            Msg::IndexCleared {
                result: result.map_err(to_failure),
            }
        }
    }
}

fn map_status(report: &StatusReport) -> BackendStatus {
    let readiness = match report.status.as_str() {
        "ready" => Readiness::Ready,
        "no_documents" => Readiness::NoDocuments,
        _ => Readiness::Unknown,
    };
    BackendStatus {
        readiness,
        index_exists: report.index_exists,
    }
}

fn to_failure(err: ClientError) -> BackendFailure {
    BackendFailure {
        detail: err.user_detail(),
    }
}

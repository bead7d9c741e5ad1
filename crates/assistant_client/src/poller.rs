use std::sync::Arc;
use std::time::Duration;

use assistant_logging::{assistant_debug, assistant_trace};
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::{BackendApi, ClientEvent, EventSink};

/// Repeating status request, owned by whoever holds it.
///
/// The first request goes out immediately. Dropping the poller cancels it.
pub struct StatusPoller {
    cancel: CancellationToken,
}

impl StatusPoller {
    pub fn spawn(
        runtime: &Handle,
        api: Arc<dyn BackendApi>,
        interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                let result = tokio::select! {
                    _ = token.cancelled() => break,
                    result = api.status() => result,
                };
                match &result {
                    Ok(report) => assistant_trace!("Polled status: {:?}", report),
                    Err(err) => assistant_debug!("Status poll failed: {}", err),
                }
                sink.emit(ClientEvent::Status(result));
            }
            assistant_debug!("Status polling stopped");
        });

        Self { cancel }
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use atlas_logging::{atlas_info, atlas_warn};

use crate::decode::decode_countries;
use crate::fetch::{ChannelProgressSink, FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
use crate::{EngineEvent, FailureKind, FetchError, LoadOutcome, LoadProgress, Stage};

enum EngineCommand {
    Load { url: String },
}

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = Arc::new(ReqwestFetcher::new(settings));

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Ask the engine to download and decode the country list.
    pub fn load(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Load { url: url.into() });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Load { url } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = run_load(fetcher, &url, &sink).await;
            match &result {
                Ok(outcome) => atlas_info!(
                    "load completed: {} records, {} dropped, {} bytes from {}",
                    outcome.records.len(),
                    outcome.dropped,
                    outcome.metadata.byte_len,
                    outcome.metadata.final_url
                ),
                Err(err) => atlas_warn!("load failed: {}: {}", err.kind, err.message),
            }
            let _ = event_tx.send(EngineEvent::LoadCompleted { result });
        }
    }
}

async fn run_load(
    fetcher: &dyn Fetcher,
    url: &str,
    sink: &dyn ProgressSink,
) -> Result<LoadOutcome, FetchError> {
    let output = fetcher.fetch(url, sink).await?;
    sink.emit(EngineEvent::Progress(LoadProgress {
        stage: Stage::Decoding,
        bytes: Some(output.metadata.byte_len),
    }));
    let decoded = decode_countries(&output.bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))?;
    if decoded.dropped > 0 {
        atlas_warn!("dropped {} malformed country elements", decoded.dropped);
    }
    Ok(LoadOutcome {
        records: decoded.records,
        dropped: decoded.dropped,
        metadata: output.metadata,
    })
}

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc, Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, LoadProgress, Stage};

/// Transfer limits for the one outbound read. The request timeout bounds the
/// whole exchange so the session can never hang in its loading phase.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Bounds the whole request, body included.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Hard cap on the downloaded body, checked against the declared
    /// Content-Length and again while streaming.
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that forwards every event over an `mpsc` channel. Send failures are
/// swallowed; a closed receiver just means nobody is watching anymore.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    /// Client with the configured timeouts and a redirect policy that counts
    /// every hop it follows into `redirects`.
    fn transfer_client(
        &self,
        redirects: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, FetchError> {
        let limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let followed = attempt.previous().len();
            redirects.store(followed, Ordering::Relaxed);
            if followed >= limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// Header checks that run before the body is pulled: HTTP status, the
    /// content-type allow-list, and the declared length against the size
    /// cap. Returns the content type for the transfer metadata.
    fn screen_response(&self, response: &reqwest::Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        if let Some(ct) = content_type.as_deref() {
            if !self.accepts_content_type(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "content type not accepted",
                ));
            }
        }

        if let Some(declared) = response.content_length() {
            if declared > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(declared),
                    },
                    "declared length over the size cap",
                ));
            }
        }

        Ok(content_type)
    }

    /// Drain the body stream with a running size check, reporting download
    /// progress after every chunk.
    async fn read_capped_body(
        &self,
        response: reqwest::Response,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<u8>, FetchError> {
        sink.emit(download_progress(0));

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(classify_transport_error)?;
            let received = body.len() as u64 + chunk.len() as u64;
            if received > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(received),
                    },
                    "body over the size cap",
                ));
            }
            body.extend_from_slice(&chunk);
            sink.emit(download_progress(body.len() as u64));
        }
        Ok(body)
    }

    fn accepts_content_type(&self, content_type: &str) -> bool {
        // Parameters after ';' (charset and friends) do not matter here.
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirects = Arc::new(AtomicUsize::new(0));
        let client = self.transfer_client(redirects.clone())?;

        let response = client
            .get(parsed)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(classify_transport_error)?;

        let content_type = self.screen_response(&response)?;
        let final_url = response.url().to_string();
        let body = self.read_capped_body(response, sink).await?;

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: redirects.load(Ordering::Relaxed),
            content_type,
            byte_len: body.len() as u64,
        };

        Ok(FetchOutput {
            bytes: body,
            metadata,
        })
    }
}

fn download_progress(bytes: u64) -> EngineEvent {
    EngineEvent::Progress(LoadProgress {
        stage: Stage::Downloading,
        bytes: Some(bytes),
    })
}

fn classify_transport_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}

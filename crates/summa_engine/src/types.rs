use crate::decode::DecodeError;
use crate::render::RenderError;
use crate::summarize::SummarizeError;

pub type RunId = u64;

/// Provider + model pair addressed by a summarize command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub provider_id: String,
    pub model_id: String,
}

impl ModelSpec {
    pub fn new(provider_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            model_id: model_id.into(),
        }
    }
}

/// Completion events emitted by the engine, one per command. The engine never
/// aborts in-flight work; a caller that no longer cares about a run simply
/// ignores its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ArticleExtracted {
        run_id: RunId,
        result: Result<String, ExtractError>,
    },
    SummaryReady {
        run_id: RunId,
        result: Result<String, SummarizeError>,
    },
    SummaryRendered {
        run_id: RunId,
        result: Result<String, RenderError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("request timed out")]
    Timeout,
    #[error("redirect limit exceeded")]
    RedirectLimit,
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("unsupported content type {0}")]
    UnsupportedContentType(String),
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("page contained no readable article")]
    NoContent,
}

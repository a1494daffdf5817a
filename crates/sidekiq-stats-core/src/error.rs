//! Shared error type across sidekiq-stats crates.

use thiserror::Error;

use crate::metric::MetricWrite;

/// Boxed underlying cause (HTTP client, backend SDK, ...).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Pipeline stage that failed (stable API, used in logs and exit reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration could not be read or is invalid.
    Config,
    /// Stats endpoint unreachable or timed out.
    Fetch,
    /// Stats endpoint returned unparseable content.
    Decode,
    /// A metric submission was rejected by the backend.
    Publish,
}

impl Stage {
    /// String representation used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Fetch => "fetch",
            Stage::Decode => "decode",
            Stage::Publish => "publish",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type used by core and bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("config: {0}")]
    Config(String),
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("backend write failed (metric={metric}, namespace={namespace}): {source}")]
    BackendWrite {
        metric: String,
        namespace: String,
        #[source]
        source: BoxError,
    },
}

impl BridgeError {
    /// Wrap a transport-level failure for `url`.
    pub fn transport(url: &str, source: impl Into<BoxError>) -> Self {
        BridgeError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// Wrap a backend rejection of `write`.
    pub fn backend_write(write: &MetricWrite, source: impl Into<BoxError>) -> Self {
        BridgeError::BackendWrite {
            metric: write.metric_name.clone(),
            namespace: write.namespace.clone(),
            source: source.into(),
        }
    }

    /// Map the error to the stage that produced it.
    pub fn stage(&self) -> Stage {
        match self {
            BridgeError::Config(_) => Stage::Config,
            BridgeError::Transport { .. } => Stage::Fetch,
            BridgeError::Decode(_) => Stage::Decode,
            BridgeError::BackendWrite { .. } => Stage::Publish,
        }
    }
}

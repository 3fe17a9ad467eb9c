use thiserror::Error;

/// Which write the Admin API rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update,
}

impl std::fmt::Display for WriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteKind::Create => write!(f, "create"),
            WriteKind::Update => write!(f, "update"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShopifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Non-2xx answer to a create or update. `body` is the raw response text.
    #[error("product {kind} rejected with HTTP {status}: {body}")]
    WriteRejected {
        kind: WriteKind,
        status: u16,
        body: String,
    },

    #[error("invalid Admin API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

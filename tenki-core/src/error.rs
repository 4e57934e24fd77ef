use reqwest::StatusCode;

/// Failure modes of a single lookup, in pipeline order.
///
/// Each variant terminates the invocation; nothing is retried and no partial
/// output is produced after a failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad user input (e.g. a malformed date argument). Raised before any
    /// network traffic.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request never produced a response: connection refused, DNS
    /// failure, timeout.
    #[error("Network error: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("Weather API returned status {status}: {body}")]
    Upstream { status: StatusCode, body: String },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Writing console or file output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

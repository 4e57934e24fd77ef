use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::WeatherQuery;
use crate::provider::open_meteo::ForecastResponse;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Abstraction over the upstream weather source.
///
/// There is a single production implementation ([`OpenMeteoClient`]); the
/// trait exists so the pipeline can be driven against a stub in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Perform exactly one request for `query` and return the raw typed
    /// response. Implementations do not retry.
    async fn fetch(&self, query: &WeatherQuery) -> Result<ForecastResponse>;
}

/// Trim a response body for error display.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_short_passthrough() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}

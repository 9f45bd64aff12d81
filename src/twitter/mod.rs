pub mod bot;
pub mod v1;

use crate::model::RequestData;
use async_trait::async_trait;
use thiserror::Error;

/// The two request verbs of the Twitter REST API.
///
/// `path` is an endpoint such as `statuses/update`; implementations resolve
/// it against their API root. Each call settles once with the response body
/// or the client's own error.
#[async_trait]
pub trait TwitterApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(&self, path: &str, data: &RequestData) -> Result<serde_json::Value, Self::Error>;

    async fn post(&self, path: &str, data: &RequestData)
        -> Result<serde_json::Value, Self::Error>;
}

/// Receives one message for every failed bot operation.
pub trait ErrorLog: Send + Sync {
    fn log_error(&self, message: &str);
}

/// Forwards failures to the `log` facade.
pub struct LogErrors;

impl ErrorLog for LogErrors {
    fn log_error(&self, message: &str) {
        log::error!("{}", message);
    }
}

#[derive(Debug, Error)]
pub enum Error<E: std::error::Error + 'static> {
    #[error("Twitter API request failed: {0}")]
    Api(#[source] E),
    #[error("Bot account has not been verified yet")]
    NotVerified,
    #[error("Unexpected response from {path}")]
    UnexpectedResponse {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

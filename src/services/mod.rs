use async_trait::async_trait;

use crate::models::DiagnosticRecord;

pub mod auth;
pub mod extract;
pub mod poller;
pub mod session;

pub use session::{RouterClient, RouterEndpoints, RouterSession};

pub type RouterResult<T> = Result<T, RouterError>;

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("Network error during {step}: {source}")]
    Network {
        step: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Unexpected response from {step}: {status}")]
    UnexpectedStatus {
        step: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("gSecureToken not found in login page")]
    TokenNotFound,
    #[error("password length {password_len} and token length {token_len} must be greater than 0")]
    EmptyCredentials {
        password_len: usize,
        token_len: usize,
    },
    #[error("No authenticated session")]
    NoSession,
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Something the driver loop can log into and poll for diagnostics.
#[async_trait]
pub trait SignalSource: Send {
    /// Discard any existing session and run the full login handshake.
    async fn connect(&mut self) -> RouterResult<()>;

    /// Fetch the diagnostics page with the current session.
    async fn poll(&mut self, fields: &[String]) -> RouterResult<DiagnosticRecord>;
}

use thiserror::Error;

/// Failure classification for a single lead submission attempt.
///
/// Both variants are recoverable: the wizard keeps the entered data and the
/// user may retry the submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("server rejected submission ({status}): {message}")]
    ServerRejected { status: u16, message: String },
}

/// Error type for configuration loading and persistence.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Errors surfaced by the interactive CLI front-end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

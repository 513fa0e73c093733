use thiserror::Error;

/// Pre-flight rejection of a submission. None of these reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("only .eml files can be uploaded")]
    InvalidFileType,
    #[error("enter a project name before uploading")]
    MissingProjectName,
    #[error("an upload is already in progress")]
    AlreadyInProgress,
}

/// Post-flight failure of an upload, surfaced through the notifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFailure {
    #[error("network error: {0}")]
    NetworkFailure(String),
    /// `detail` is the server's message, or an `HTTP <code>: <reason>` fallback.
    #[error("{detail}")]
    ServerRejected { status: u16, detail: String },
    #[error("malformed server response: {0}")]
    MalformedResponse(String),
}

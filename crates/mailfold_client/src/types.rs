use bytes::Bytes;
use serde::Deserialize;
use thiserror::Error;

/// Email file handed to the upload endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Bytes,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEmail {
    pub filename: String,
}

/// One row of `GET /api/projects/{name}/emails`. Missing fields read as "".
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct EmailEntry {
    pub date: String,
    pub from: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Network(String),
    #[error("file too large (max {max_bytes} bytes, got {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("not found")]
    NotFound,
    /// Non-2xx answer. `detail` is the server's message or an `HTTP <code>` fallback.
    #[error("{detail}")]
    Status { status: u16, detail: String },
    #[error("{0}")]
    Malformed(String),
}

/// Results reported back by [`ClientHandle`](crate::ClientHandle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    UploadFinished(Result<StoredEmail, ApiError>),
    ProjectsLoaded(Result<Vec<String>, ApiError>),
    EmailsLoaded {
        project: String,
        result: Result<Vec<EmailEntry>, ApiError>,
    },
    VersionLoaded(Result<String, ApiError>),
    /// The notice timer armed with this token ran out.
    TimerFired(u64),
}

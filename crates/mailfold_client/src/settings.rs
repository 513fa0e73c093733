use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Server root, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Applies to list and version reads.
    pub request_timeout: Duration,
    /// Upper bound on one upload round trip, conversion included.
    pub upload_timeout: Duration,
    pub max_upload_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(120),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

use mailfold_logging::client_debug;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::{ApiError, ClientSettings, EmailEntry, StoredEmail, UploadFile};

const EML_MIME: &str = "message/rfc822";

/// The server endpoints the client consumes.
#[async_trait::async_trait]
pub trait MailfoldApi: Send + Sync {
    /// `POST /api/convert-email` as multipart `file` + `project_name`.
    async fn convert_email(
        &self,
        file: UploadFile,
        project_name: &str,
    ) -> Result<StoredEmail, ApiError>;

    /// Yields [`ApiError::NotFound`] for a 404, like [`list_emails`](Self::list_emails).
    async fn list_projects(&self, include_others: bool) -> Result<Vec<String>, ApiError>;

    /// Yields [`ApiError::NotFound`] for a 404 so callers can show an empty list.
    async fn list_emails(&self, project: &str) -> Result<Vec<EmailEntry>, ApiError>;

    async fn fetch_version(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectsBody {
    projects: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmailsBody {
    emails: Vec<EmailRow>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EmailRow {
    date: Option<String>,
    from: Option<String>,
    subject: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VersionBody {
    version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(settings.base_url.clone()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.settings.base_url.clone()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl MailfoldApi for ReqwestApi {
    async fn convert_email(
        &self,
        file: UploadFile,
        project_name: &str,
    ) -> Result<StoredEmail, ApiError> {
        let len = file.bytes.len() as u64;
        if len > self.settings.max_upload_bytes {
            return Err(ApiError::TooLarge {
                max_bytes: self.settings.max_upload_bytes,
                actual: len,
            });
        }

        let url = self.endpoint(&["api", "convert-email"])?;
        let part = Part::stream_with_length(Body::from(file.bytes), len)
            .file_name(file.name.clone())
            .mime_str(EML_MIME)
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("project_name", project_name.to_string());

        client_debug!("POST {} file={} bytes={}", url, file.name, len);
        let response = self
            .client
            .post(url)
            .timeout(self.settings.upload_timeout)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body: ConvertResponse = read_json(response).await?;
        Ok(StoredEmail {
            filename: body.filename,
        })
    }

    async fn list_projects(&self, include_others: bool) -> Result<Vec<String>, ApiError> {
        let mut url = self.endpoint(&["api", "projects"])?;
        url.query_pairs_mut()
            .append_pair("include_others", if include_others { "true" } else { "false" });

        client_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let body: ProjectsBody = read_json(response).await?;
        Ok(body.projects)
    }

    async fn list_emails(&self, project: &str) -> Result<Vec<EmailEntry>, ApiError> {
        let url = self.endpoint(&["api", "projects", project, "emails"])?;

        client_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        let body: EmailsBody = read_json(response).await?;
        Ok(body
            .emails
            .into_iter()
            .map(|row| EmailEntry {
                date: row.date.unwrap_or_default(),
                from: row.from.unwrap_or_default(),
                subject: row.subject.unwrap_or_default(),
            })
            .collect())
    }

    async fn fetch_version(&self) -> Result<String, ApiError> {
        let url = self.endpoint(&["version.json"])?;
        let response = self
            .client
            .get(url)
            .timeout(self.settings.request_timeout)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body: VersionBody = read_json(response).await?;
        body.version
            .filter(|version| !version.trim().is_empty())
            .ok_or_else(|| ApiError::Malformed("missing version".to_string()))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))
}

/// Prefers the server's `detail`; falls back to the status line.
fn status_error(status: StatusCode, body: &str) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .filter(|detail| !detail.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        });
    ApiError::Status {
        status: status.as_u16(),
        detail,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Network(err.to_string())
}

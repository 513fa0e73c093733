use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::LevelFilter;
use mailfold_client::ClientSettings;
use mailfold_logging::{client_error, client_info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Bounds how long the client may stay in the converting state.
    pub upload_timeout_secs: u64,
    pub max_upload_mb: u64,
    pub notice_seconds: u64,
    pub include_others: bool,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub last_project: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            server_url: client.base_url,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            upload_timeout_secs: client.upload_timeout.as_secs(),
            max_upload_mb: client.max_upload_bytes / (1024 * 1024),
            notice_seconds: mailfold_core::NOTICE_DURATION.as_secs(),
            include_others: false,
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
            last_project: None,
        }
    }
}

impl AppConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.server_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            upload_timeout: Duration::from_secs(self.upload_timeout_secs.max(1)),
            max_upload_bytes: self.max_upload_mb.saturating_mul(1024 * 1024),
        }
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_secs(self.notice_seconds.max(1))
    }

    pub fn log_level(&self) -> LevelFilter {
        mailfold_logging::level_from_name(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Reads the config file. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()))
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Writes the config through a temp file in the same directory, then renames.
pub fn save(path: &Path, config: &AppConfig) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let content = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::new())
        .context("failed to serialize config")?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    Ok(())
}

/// Stores `project` as the last project used. Failures are logged only.
pub fn remember_last_project(path: &Path, project: &str) {
    let mut config = match load(path) {
        Ok(config) => config,
        Err(err) => {
            client_error!("Not saving last project: {:#}", err);
            return;
        }
    };
    if config.last_project.as_deref() == Some(project) {
        return;
    }
    config.last_project = Some(project.to_string());
    match save(path, &config) {
        Ok(()) => client_info!("Saved last project {} to {}", project, path.display()),
        Err(err) => client_error!("Failed to save last project: {:#}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.notice_duration(), Duration::from_secs(5));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mailfold.ron");
        fs::write(
            &path,
            r#"(server_url: "http://mail.local:9000", include_others: true, log_level: "debug")"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.server_url, "http://mail.local:9000");
        assert!(config.include_others);
        assert_eq!(config.log_level(), LevelFilter::Debug);
        assert_eq!(config.upload_timeout_secs, 120);
        assert_eq!(
            config.client_settings().max_upload_bytes,
            25 * 1024 * 1024
        );
    }

    #[test]
    fn garbage_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mailfold.ron");
        fs::write(&path, "not ron at all {").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn last_project_round_trips_through_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("mailfold.ron");

        remember_last_project(&path, "acme");
        let config = load(&path).unwrap();
        assert_eq!(config.last_project.as_deref(), Some("acme"));
        assert_eq!(config.server_url, AppConfig::default().server_url);
    }
}

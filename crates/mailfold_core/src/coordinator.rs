use mailfold_logging::{client_info, client_warn};

use crate::{CandidateFile, Notice, NoticeKind, SubmitError, UploadFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Converting,
}

/// One multipart upload: the file plus the trimmed project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: CandidateFile,
    pub project_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub stored_filename: String,
}

pub type UploadResult = Result<UploadReceipt, UploadFailure>;

/// What an observer learns once an upload has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleReport {
    Stored {
        project_name: String,
        stored_filename: String,
    },
    Failed {
        message: String,
    },
}

/// Follow-up work decided when an upload settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlePlan {
    pub notice: Notice,
    pub reload_projects: bool,
    pub reload_emails_for: Option<String>,
    pub report: SettleReport,
}

/// Owns the single in-flight upload guard.
///
/// `UploadState` is private; it moves only through [`submit`](Self::submit)
/// and [`settle`](Self::settle).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadCoordinator {
    state: UploadState,
    in_flight_project: Option<String>,
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn is_converting(&self) -> bool {
        self.state == UploadState::Converting
    }

    /// Validates and starts an upload.
    ///
    /// Checks run in a fixed order: file type, project name, then the
    /// in-flight guard. On success the state is already `Converting` when
    /// this returns, before any request exists.
    pub fn submit(
        &mut self,
        file: CandidateFile,
        project_name: &str,
    ) -> Result<UploadRequest, SubmitError> {
        if !file.is_eml() {
            return Err(SubmitError::InvalidFileType);
        }
        let project_name = project_name.trim();
        if project_name.is_empty() {
            return Err(SubmitError::MissingProjectName);
        }
        if self.is_converting() {
            return Err(SubmitError::AlreadyInProgress);
        }

        self.state = UploadState::Converting;
        self.in_flight_project = Some(project_name.to_string());
        client_info!(
            "Upload started file={} bytes={} project={}",
            file.name,
            file.bytes.len(),
            project_name
        );
        Ok(UploadRequest {
            file,
            project_name: project_name.to_string(),
        })
    }

    /// Returns to `Idle` and plans the follow-up.
    ///
    /// Returns `None` for a completion that arrives while idle; nothing is
    /// in flight to settle.
    pub fn settle(
        &mut self,
        result: UploadResult,
        selected_project: Option<&str>,
    ) -> Option<SettlePlan> {
        if !self.is_converting() {
            client_warn!("Ignoring upload completion while idle: {:?}", result);
            return None;
        }
        self.state = UploadState::Idle;
        let project_name = self.in_flight_project.take().unwrap_or_default();

        let plan = match result {
            Ok(receipt) => {
                client_info!(
                    "Upload stored project={} filename={}",
                    project_name,
                    receipt.stored_filename
                );
                SettlePlan {
                    notice: Notice {
                        message: format!("Email stored: {}", receipt.stored_filename),
                        kind: NoticeKind::Success,
                    },
                    reload_projects: true,
                    reload_emails_for: selected_project
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(ToOwned::to_owned),
                    report: SettleReport::Stored {
                        project_name,
                        stored_filename: receipt.stored_filename,
                    },
                }
            }
            Err(failure) => {
                client_warn!("Upload failed project={}: {}", project_name, failure);
                let message = failure.to_string();
                SettlePlan {
                    notice: Notice {
                        message: message.clone(),
                        kind: NoticeKind::Error,
                    },
                    reload_projects: false,
                    reload_emails_for: None,
                    report: SettleReport::Failed { message },
                }
            }
        };
        Some(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eml() -> CandidateFile {
        CandidateFile::new("mail.eml", b"Subject: hi\r\n\r\nbody".to_vec())
    }

    #[test]
    fn file_type_is_checked_before_project_name() {
        let mut coordinator = UploadCoordinator::new();
        let err = coordinator
            .submit(CandidateFile::new("mail.txt", Vec::new()), "  ")
            .unwrap_err();
        assert_eq!(err, SubmitError::InvalidFileType);
        assert_eq!(coordinator.state(), UploadState::Idle);
    }

    #[test]
    fn project_name_is_trimmed() {
        let mut coordinator = UploadCoordinator::new();
        let request = coordinator.submit(eml(), "  acme \t").unwrap();
        assert_eq!(request.project_name, "acme");
        assert!(coordinator.is_converting());
    }

    #[test]
    fn second_submit_is_rejected_while_converting() {
        let mut coordinator = UploadCoordinator::new();
        coordinator.submit(eml(), "acme").unwrap();
        assert_eq!(
            coordinator.submit(eml(), "acme"),
            Err(SubmitError::AlreadyInProgress)
        );
        assert!(coordinator.is_converting());
    }

    #[test]
    fn stray_settle_is_ignored() {
        let mut coordinator = UploadCoordinator::new();
        let plan = coordinator.settle(
            Ok(UploadReceipt {
                stored_filename: "x.md".into(),
            }),
            Some("acme"),
        );
        assert!(plan.is_none());
        assert_eq!(coordinator.state(), UploadState::Idle);
    }

    #[test]
    fn failure_plans_no_reloads() {
        let mut coordinator = UploadCoordinator::new();
        coordinator.submit(eml(), "acme").unwrap();
        let plan = coordinator
            .settle(
                Err(UploadFailure::NetworkFailure("connection refused".into())),
                Some("acme"),
            )
            .unwrap();
        assert!(!plan.reload_projects);
        assert_eq!(plan.reload_emails_for, None);
        assert_eq!(plan.notice.kind, NoticeKind::Error);
        assert!(plan.notice.message.contains("connection refused"));
        assert_eq!(coordinator.state(), UploadState::Idle);
    }
}

use std::time::Duration;

use crate::{SettleReport, SubmitError, TimerToken, UploadRequest};

/// Work requested by `update` and carried out by the app's effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadVersion,
    Upload(UploadRequest),
    ReloadProjects { include_others: bool },
    ReloadEmails { project: String },
    ArmNoticeTimer { token: TimerToken, after: Duration },
    CancelNoticeTimer { token: TimerToken },
    /// Remember the project of the last stored upload across runs.
    PersistLastProject(String),
    /// A submission was refused before reaching the network.
    SubmissionRejected(SubmitError),
    /// Always the last effect of a settle; follow-up reloads precede it.
    UploadSettled(SettleReport),
}

//! Mailfold core: pure upload state machine and view-model helpers.
mod coordinator;
mod effect;
mod error;
mod file_source;
mod list_view;
mod msg;
mod notifier;
mod state;
mod update;
mod view_model;

pub use coordinator::{
    SettlePlan, SettleReport, UploadCoordinator, UploadReceipt, UploadRequest, UploadResult,
    UploadState,
};
pub use effect::Effect;
pub use error::{SubmitError, UploadFailure};
pub use file_source::{CandidateFile, FileSource, EML_EXTENSION};
pub use list_view::{EmailSummary, ListLoad, ListView};
pub use msg::Msg;
pub use notifier::{Notice, NoticeKind, TimerToken, TransientNotifier, NOTICE_DURATION};
pub use state::AppState;
pub use update::update;
pub use view_model::{
    render_busy, render_drop_zone, render_emails, render_projects, AppViewModel, BusyView,
    DropZoneView, EmailsView, ProjectInputView, ProjectRowView, ProjectsView, BUSY_MESSAGE,
    PROJECTS_PLACEHOLDER,
};

use crate::{CandidateFile, EmailSummary, ListLoad, TimerToken, UploadResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Client started; load the version label and the project list.
    Started,
    /// User edited the project name input.
    ProjectNameChanged(String),
    /// User picked a project from the project list.
    ProjectSelected(String),
    /// A drag entered the drop target.
    DragEntered,
    /// A drag left the drop target without dropping.
    DragLeft,
    /// One or more files were dropped.
    FilesDropped(Vec<CandidateFile>),
    /// The file picker closed, with or without a selection.
    FilePicked(Option<CandidateFile>),
    /// A dropped path could not be read into memory.
    FileUnreadable { name: String, reason: String },
    /// The upload request finished, one way or the other.
    UploadSettled(UploadResult),
    ProjectsLoaded(ListLoad<String>),
    EmailsLoaded {
        project: String,
        load: ListLoad<EmailSummary>,
    },
    VersionLoaded(Option<String>),
    /// User toggled whether projects outside the default scope are listed.
    IncludeOthersChanged(bool),
    /// User asked for the lists to be fetched again.
    RefreshRequested,
    /// A notice hide timer fired.
    NoticeExpired(TimerToken),
    /// User dismissed the notice.
    NoticeDismissed,
    /// An empty input line; changes nothing.
    NoOp,
}

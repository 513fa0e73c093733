use std::time::Duration;

use crate::view_model::{render_busy, render_drop_zone, render_emails, render_projects};
use crate::{
    AppViewModel, EmailSummary, Effect, FileSource, ListView, ProjectInputView,
    TransientNotifier, UploadCoordinator, UploadState,
};

/// Whole client state. Fields are private; `update` is the only writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) coordinator: UploadCoordinator,
    pub(crate) file_source: FileSource,
    pub(crate) notifier: TransientNotifier,
    pub(crate) projects: ListView<String>,
    pub(crate) emails: ListView<EmailSummary>,
    project_name: String,
    input_focused: bool,
    emails_project: Option<String>,
    include_others: bool,
    version: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            coordinator: UploadCoordinator::new(),
            file_source: FileSource::new(),
            notifier: TransientNotifier::default(),
            projects: ListView::new("Projects"),
            emails: ListView::new("Emails"),
            project_name: String::new(),
            input_focused: false,
            emails_project: None,
            include_others: false,
            version: None,
            dirty: false,
        }
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notifier = TransientNotifier::new(duration);
        self
    }

    pub fn with_include_others(mut self, include_others: bool) -> Self {
        self.include_others = include_others;
        self
    }

    /// Pre-fills the project input, e.g. with the last project used.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn upload_state(&self) -> UploadState {
        self.coordinator.state()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The project the emails list follows: the trimmed input, if any.
    pub fn selected_project(&self) -> Option<&str> {
        let name = self.project_name.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn include_others(&self) -> bool {
        self.include_others
    }

    pub fn view(&self) -> AppViewModel {
        let converting = self.coordinator.is_converting();
        AppViewModel {
            upload: self.coordinator.state(),
            project_input: ProjectInputView {
                value: self.project_name.clone(),
                enabled: !converting,
                focused: self.input_focused && !converting,
            },
            drop_zone: render_drop_zone(&self.file_source),
            busy: render_busy(self.coordinator.state()),
            notice: self.notifier.current().cloned(),
            projects: render_projects(self.projects.items(), self.selected_project()),
            emails: render_emails(self.emails_project.as_deref(), self.emails.items()),
            include_others: self.include_others,
            version: self.version.clone(),
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_project_name(&mut self, name: String, focused: bool) {
        self.project_name = name;
        self.input_focused = focused;
        self.mark_dirty();
    }

    pub(crate) fn set_include_others(&mut self, include_others: bool) {
        self.include_others = include_others;
        self.mark_dirty();
    }

    pub(crate) fn set_version(&mut self, version: Option<String>) {
        self.version = version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| format!("v.{v}"));
        self.mark_dirty();
    }

    pub(crate) fn emails_project(&self) -> Option<&str> {
        self.emails_project.as_deref()
    }

    /// Points the emails list at `project` and asks for a reload.
    ///
    /// A blank name hides the list without touching the network.
    pub(crate) fn request_emails(&mut self, project: &str) -> Vec<Effect> {
        let project = project.trim();
        self.mark_dirty();
        if project.is_empty() {
            self.emails_project = None;
            self.emails.clear();
            return Vec::new();
        }
        if self.emails_project.as_deref() != Some(project) {
            self.emails.clear();
        }
        self.emails_project = Some(project.to_string());
        vec![Effect::ReloadEmails {
            project: project.to_string(),
        }]
    }
}

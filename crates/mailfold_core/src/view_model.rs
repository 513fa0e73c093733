use crate::{EmailSummary, FileSource, Notice, UploadState};

pub const BUSY_MESSAGE: &str = "Converting email to Markdown...";
pub const PROJECTS_PLACEHOLDER: &str =
    "No projects yet. Type a project name above to create the first one.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub upload: UploadState,
    pub project_input: ProjectInputView,
    pub drop_zone: DropZoneView,
    pub busy: BusyView,
    pub notice: Option<Notice>,
    pub projects: ProjectsView,
    pub emails: EmailsView,
    pub include_others: bool,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectInputView {
    pub value: String,
    pub enabled: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropZoneView {
    pub enabled: bool,
    pub dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusyView {
    pub visible: bool,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectsView {
    /// Shown instead of an empty list.
    Placeholder(&'static str),
    Items(Vec<ProjectRowView>),
}

impl Default for ProjectsView {
    fn default() -> Self {
        ProjectsView::Placeholder(PROJECTS_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRowView {
    /// 1-based position, used by `:select`.
    pub index: usize,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EmailsView {
    /// An empty emails list is not rendered at all.
    #[default]
    Hidden,
    Table {
        project: String,
        rows: Vec<EmailSummary>,
    },
}

pub fn render_projects(projects: &[String], selected: Option<&str>) -> ProjectsView {
    if projects.is_empty() {
        return ProjectsView::Placeholder(PROJECTS_PLACEHOLDER);
    }
    ProjectsView::Items(
        projects
            .iter()
            .enumerate()
            .map(|(i, name)| ProjectRowView {
                index: i + 1,
                name: name.clone(),
                selected: selected == Some(name.as_str()),
            })
            .collect(),
    )
}

pub fn render_emails(project: Option<&str>, emails: &[EmailSummary]) -> EmailsView {
    match project {
        Some(project) if !emails.is_empty() => EmailsView::Table {
            project: project.to_string(),
            rows: emails.to_vec(),
        },
        _ => EmailsView::Hidden,
    }
}

pub fn render_busy(state: UploadState) -> BusyView {
    BusyView {
        visible: state == UploadState::Converting,
        message: BUSY_MESSAGE,
    }
}

pub fn render_drop_zone(source: &FileSource) -> DropZoneView {
    DropZoneView {
        enabled: source.is_enabled(),
        dragging: source.is_dragging(),
    }
}

use chrono::{DateTime, Local, NaiveDateTime};
use mailfold_core::{
    AppViewModel, BusyView, DropZoneView, EmailSummary, EmailsView, Notice, NoticeKind,
    ProjectInputView, ProjectsView,
};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders the whole screen as text lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(match &view.version {
        Some(version) => format!("Mailfold {version}"),
        None => "Mailfold".to_string(),
    });
    lines.push(String::new());

    if let Some(notice) = &view.notice {
        lines.push(render_notice(notice));
        lines.push(String::new());
    }

    lines.push(render_project_input(&view.project_input));
    lines.extend(render_drop_zone(view.drop_zone, &view.busy));
    lines.push(String::new());

    let scope = if view.include_others { " (all)" } else { "" };
    lines.push(format!("Existing projects{scope}:"));
    lines.extend(render_projects(&view.projects));

    let emails = render_emails(&view.emails);
    if !emails.is_empty() {
        lines.push(String::new());
        lines.extend(emails);
    }
    lines
}

fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("[ok] {}", notice.message),
        NoticeKind::Error => format!("[error] {}", notice.message),
    }
}

fn render_project_input(input: &ProjectInputView) -> String {
    let marker = if input.focused { ">" } else { " " };
    let lock = if input.enabled { "" } else { " (locked)" };
    format!("{marker} Project: [{}]{lock}", input.value)
}

fn render_drop_zone(zone: DropZoneView, busy: &BusyView) -> Vec<String> {
    if busy.visible {
        return vec![format!("  ... {}", busy.message)];
    }
    let hint = if zone.dragging {
        "  Release to upload"
    } else if zone.enabled {
        "  Drop an .eml file here, or :pick <path>"
    } else {
        "  (drop disabled)"
    };
    vec![hint.to_string()]
}

fn render_projects(projects: &ProjectsView) -> Vec<String> {
    match projects {
        ProjectsView::Placeholder(text) => vec![format!("  {text}")],
        ProjectsView::Items(rows) => rows
            .iter()
            .map(|row| {
                let marker = if row.selected { "*" } else { " " };
                format!(" {marker}{:>3}. {}", row.index, row.name)
            })
            .collect(),
    }
}

/// Empty when the emails list is hidden.
fn render_emails(emails: &EmailsView) -> Vec<String> {
    let EmailsView::Table { project, rows } = emails else {
        return Vec::new();
    };
    let mut lines = vec![
        format!("Emails in {project}:"),
        format!("  {:<16}  {:<32}  {}", "Date", "From", "Subject"),
    ];
    lines.extend(rows.iter().map(render_email_row));
    lines
}

fn render_email_row(email: &EmailSummary) -> String {
    format!(
        "  {:<16}  {:<32}  {}",
        format_email_date(&email.date),
        email.from,
        email.subject
    )
}

/// Local `YYYY-MM-DD HH:MM` for RFC 3339, RFC 2822 or naive ISO dates; raw text otherwise.
pub fn format_email_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.with_timezone(&Local).format(DATE_FORMAT).to_string();
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return date.with_timezone(&Local).format(DATE_FORMAT).to_string();
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return date.format(DATE_FORMAT).to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailfold_core::{
        render_busy, render_emails as view_emails, render_projects as view_projects,
        UploadState, PROJECTS_PLACEHOLDER,
    };

    fn idle_view() -> AppViewModel {
        AppViewModel {
            project_input: ProjectInputView {
                value: "acme".into(),
                enabled: true,
                focused: true,
            },
            drop_zone: DropZoneView {
                enabled: true,
                dragging: false,
            },
            busy: render_busy(UploadState::Idle),
            projects: view_projects(&[], None),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn empty_projects_show_placeholder_and_emails_are_absent() {
        let text = render(&idle_view()).join("\n");
        assert!(text.contains(PROJECTS_PLACEHOLDER));
        assert!(!text.contains("Emails in"));
    }

    #[test]
    fn converting_replaces_drop_hint_with_busy_message() {
        let mut view = idle_view();
        view.upload = UploadState::Converting;
        view.busy = render_busy(UploadState::Converting);
        view.project_input.enabled = false;
        view.drop_zone.enabled = false;

        let text = render(&view).join("\n");
        assert!(text.contains("Converting email to Markdown..."));
        assert!(text.contains("(locked)"));
        assert!(!text.contains("Drop an .eml file"));
    }

    #[test]
    fn emails_table_lists_rows() {
        let mut view = idle_view();
        view.projects = view_projects(&["acme".to_string()], Some("acme"));
        view.emails = view_emails(
            Some("acme"),
            &[EmailSummary {
                date: "not a date".into(),
                from: "alice@example.com".into(),
                subject: "Quarterly report".into(),
            }],
        );
        view.notice = Some(Notice {
            message: "Email stored: msg1.md".into(),
            kind: NoticeKind::Success,
        });

        let lines = render(&view);
        assert!(lines.contains(&"[ok] Email stored: msg1.md".to_string()));
        assert!(lines.iter().any(|l| l.starts_with(" *  1. acme")));
        assert!(lines.iter().any(|l| l.contains("Quarterly report") && l.contains("not a date")));
    }

    #[test]
    fn naive_iso_dates_are_shortened() {
        assert_eq!(format_email_date("2024-03-01T09:30:15"), "2024-03-01 09:30");
        assert_eq!(format_email_date("  "), "");
        assert_eq!(format_email_date("yesterday"), "yesterday");
    }
}

use mailfold_logging::{client_debug, client_warn};

use crate::{AppState, CandidateFile, Effect, Msg, NoticeKind, SettleReport, SubmitError};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![
            Effect::LoadVersion,
            Effect::ReloadProjects {
                include_others: state.include_others(),
            },
        ],
        Msg::ProjectNameChanged(text) => {
            if state.coordinator.is_converting() {
                client_debug!("Project input is disabled while converting");
                return (state, Vec::new());
            }
            state.set_project_name(text, true);
            Vec::new()
        }
        Msg::ProjectSelected(name) => {
            // Selection writes into the project input, which is locked mid-upload.
            if state.coordinator.is_converting() {
                client_debug!("Ignoring project selection while converting");
                return (state, Vec::new());
            }
            state.set_project_name(name.clone(), true);
            state.request_emails(&name)
        }
        Msg::DragEntered => {
            if state.file_source.set_dragging(true) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DragLeft => {
            if state.file_source.set_dragging(false) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            let picked = state.file_source.take_drop(files);
            state.mark_dirty();
            submit(&mut state, picked)
        }
        Msg::FilePicked(file) => {
            let picked = state.file_source.take_pick(file);
            submit(&mut state, picked)
        }
        Msg::FileUnreadable { name, reason } => {
            state.file_source.set_dragging(false);
            state.mark_dirty();
            state
                .notifier
                .show(format!("Could not read {name}: {reason}"), NoticeKind::Error)
        }
        Msg::UploadSettled(result) => settle(&mut state, result),
        Msg::ProjectsLoaded(load) => {
            state.projects.apply(load);
            state.mark_dirty();
            Vec::new()
        }
        Msg::EmailsLoaded { project, load } => {
            if state.emails_project() != Some(project.as_str()) {
                client_debug!("Dropping stale emails for project {}", project);
                return (state, Vec::new());
            }
            state.emails.apply(load);
            state.mark_dirty();
            Vec::new()
        }
        Msg::VersionLoaded(version) => {
            state.set_version(version);
            Vec::new()
        }
        Msg::IncludeOthersChanged(include_others) => {
            state.set_include_others(include_others);
            vec![Effect::ReloadProjects { include_others }]
        }
        Msg::RefreshRequested => {
            let mut effects = vec![Effect::ReloadProjects {
                include_others: state.include_others(),
            }];
            if let Some(project) = state.selected_project().map(str::to_owned) {
                effects.extend(state.request_emails(&project));
            }
            effects
        }
        Msg::NoticeExpired(token) => {
            if state.notifier.expire(token) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.mark_dirty();
            state.notifier.hide()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut AppState, picked: Result<CandidateFile, SubmitError>) -> Vec<Effect> {
    let project_name = state.project_name().to_string();
    match picked.and_then(|file| state.coordinator.submit(file, &project_name)) {
        Ok(request) => {
            // Lock the surfaces in the same step that entered Converting.
            state.file_source.set_enabled(false);
            state.mark_dirty();
            let mut effects = state.notifier.hide();
            effects.push(Effect::Upload(request));
            effects
        }
        Err(SubmitError::AlreadyInProgress) => {
            client_warn!("Dropping submission: an upload is already in progress");
            vec![Effect::SubmissionRejected(SubmitError::AlreadyInProgress)]
        }
        Err(err) => {
            state.mark_dirty();
            let mut effects = state.notifier.show(err.to_string(), NoticeKind::Error);
            effects.push(Effect::SubmissionRejected(err));
            effects
        }
    }
}

fn settle(state: &mut AppState, result: crate::UploadResult) -> Vec<Effect> {
    let selected = state.selected_project().map(str::to_owned);
    let Some(plan) = state.coordinator.settle(result, selected.as_deref()) else {
        return Vec::new();
    };
    state.file_source.set_enabled(true);
    state.mark_dirty();

    let mut effects = state.notifier.show(plan.notice.message, plan.notice.kind);
    if plan.reload_projects {
        effects.push(Effect::ReloadProjects {
            include_others: state.include_others(),
        });
    }
    if let Some(project) = plan.reload_emails_for {
        effects.extend(state.request_emails(&project));
    }
    if let SettleReport::Stored { project_name, .. } = &plan.report {
        effects.push(Effect::PersistLastProject(project_name.clone()));
    }
    effects.push(Effect::UploadSettled(plan.report));
    effects
}

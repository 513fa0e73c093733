use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use bytes::Bytes;
use mailfold_client::{ApiError, ClientEvent, ClientEvents, ClientHandle, UploadFile};
use mailfold_core::{
    Effect, EmailSummary, ListLoad, Msg, SettleReport, SubmitError, UploadFailure, UploadReceipt,
    UploadResult,
};
use mailfold_logging::{client_info, client_warn};

use super::app::LoopEvent;
use super::config;

/// Effects the app loop itself has to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    Rejected(SubmitError),
    Settled(SettleReport),
}

pub struct EffectRunner {
    client: ClientHandle,
    config_path: PathBuf,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, config_path: PathBuf) -> Self {
        Self {
            client,
            config_path,
        }
    }

    /// Starts every effect in order and returns the ones the loop must observe.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Vec<Observed> {
        let mut observed = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadVersion => self.client.load_version(),
                Effect::Upload(request) => {
                    client_info!(
                        "Upload file={} bytes={} project={}",
                        request.file.name,
                        request.file.bytes.len(),
                        request.project_name
                    );
                    self.client.upload(
                        UploadFile {
                            name: request.file.name,
                            bytes: Bytes::from(request.file.bytes),
                        },
                        request.project_name,
                    );
                }
                Effect::ReloadProjects { include_others } => {
                    self.client.load_projects(include_others)
                }
                Effect::ReloadEmails { project } => self.client.load_emails(project),
                Effect::ArmNoticeTimer { token, after } => self.client.arm_timer(token, after),
                Effect::CancelNoticeTimer { token } => self.client.cancel_timer(token),
                Effect::PersistLastProject(project) => {
                    config::remember_last_project(&self.config_path, &project)
                }
                Effect::SubmissionRejected(err) => observed.push(Observed::Rejected(err)),
                Effect::UploadSettled(report) => observed.push(Observed::Settled(report)),
            }
        }
        observed
    }
}

/// Forwards client events into the app loop until either side goes away.
pub fn spawn_event_forwarder(events: ClientEvents, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if loop_tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::UploadFinished(result) => Msg::UploadSettled(map_upload(result)),
        ClientEvent::ProjectsLoaded(result) => Msg::ProjectsLoaded(map_list(result, |name| name)),
        ClientEvent::EmailsLoaded { project, result } => Msg::EmailsLoaded {
            project,
            load: map_list(result, |entry| EmailSummary {
                date: entry.date,
                from: entry.from,
                subject: entry.subject,
            }),
        },
        ClientEvent::VersionLoaded(result) => Msg::VersionLoaded(match result {
            Ok(version) => Some(version),
            Err(err) => {
                client_warn!("Failed to load version: {}", err);
                None
            }
        }),
        ClientEvent::TimerFired(token) => Msg::NoticeExpired(token),
    }
}

fn map_upload(result: Result<mailfold_client::StoredEmail, ApiError>) -> UploadResult {
    result
        .map(|stored| UploadReceipt {
            stored_filename: stored.filename,
        })
        .map_err(|err| match err {
            ApiError::Status { status, detail } => UploadFailure::ServerRejected { status, detail },
            ApiError::NotFound => UploadFailure::ServerRejected {
                status: 404,
                detail: "HTTP 404: Not Found".to_string(),
            },
            ApiError::Malformed(reason) => UploadFailure::MalformedResponse(reason),
            other @ (ApiError::InvalidUrl(_)
            | ApiError::Timeout
            | ApiError::Network(_)
            | ApiError::TooLarge { .. }) => UploadFailure::NetworkFailure(other.to_string()),
        })
}

fn map_list<T, U>(result: Result<Vec<T>, ApiError>, map: impl Fn(T) -> U) -> ListLoad<U> {
    match result {
        Ok(items) => ListLoad::Loaded(items.into_iter().map(map).collect()),
        Err(ApiError::NotFound) => ListLoad::NotFound,
        Err(err) => ListLoad::Failed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailfold_client::{EmailEntry, StoredEmail};
    use pretty_assertions::assert_eq;

    #[test]
    fn server_detail_reaches_the_notice_text() {
        let msg = map_event(ClientEvent::UploadFinished(Err(ApiError::Status {
            status: 500,
            detail: "storage full".into(),
        })));
        let Msg::UploadSettled(Err(failure)) = msg else {
            panic!("expected failed settle");
        };
        assert_eq!(failure.to_string(), "storage full");
    }

    #[test]
    fn timeout_settles_as_network_failure() {
        let msg = map_event(ClientEvent::UploadFinished(Err(ApiError::Timeout)));
        assert_eq!(
            msg,
            Msg::UploadSettled(Err(UploadFailure::NetworkFailure(
                "request timed out".into()
            )))
        );
    }

    #[test]
    fn stored_filename_is_carried_over() {
        let msg = map_event(ClientEvent::UploadFinished(Ok(StoredEmail {
            filename: "msg1.md".into(),
        })));
        assert_eq!(
            msg,
            Msg::UploadSettled(Ok(UploadReceipt {
                stored_filename: "msg1.md".into()
            }))
        );
    }

    #[test]
    fn list_results_map_to_loads() {
        let msg = map_event(ClientEvent::EmailsLoaded {
            project: "acme".into(),
            result: Ok(vec![EmailEntry {
                date: "d".into(),
                from: "f".into(),
                subject: "s".into(),
            }]),
        });
        assert_eq!(
            msg,
            Msg::EmailsLoaded {
                project: "acme".into(),
                load: ListLoad::Loaded(vec![EmailSummary {
                    date: "d".into(),
                    from: "f".into(),
                    subject: "s".into(),
                }]),
            }
        );

        assert_eq!(
            map_event(ClientEvent::ProjectsLoaded(Err(ApiError::NotFound))),
            Msg::ProjectsLoaded(ListLoad::NotFound)
        );
        assert!(matches!(
            map_event(ClientEvent::ProjectsLoaded(Err(ApiError::Timeout))),
            Msg::ProjectsLoaded(ListLoad::Failed(_))
        ));
    }
}

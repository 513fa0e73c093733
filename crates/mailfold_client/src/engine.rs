use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mailfold_logging::{client_debug, client_error};
use tokio::task::JoinHandle;

use crate::{ApiError, ClientEvent, ClientSettings, MailfoldApi, ReqwestApi, UploadFile};

enum ApiCall {
    Upload { file: UploadFile, project_name: String },
    LoadProjects { include_others: bool },
    LoadEmails { project: String },
    LoadVersion,
}

enum ClientCommand {
    Api(ApiCall),
    ArmTimer { token: u64, after: Duration },
    CancelTimer { token: u64 },
}

/// Runs API calls and the notice timer on a background tokio runtime.
///
/// Commands are fire-and-forget; results come back on the paired
/// [`ClientEvents`] receiver in completion order.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

pub struct ClientEvents {
    event_rx: mpsc::Receiver<ClientEvent>,
}

impl ClientEvents {
    /// Blocks until the next event; `None` once the client has shut down.
    pub fn recv(&self) -> Option<ClientEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<(Self, ClientEvents), ApiError> {
        let api = ReqwestApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    /// Same as [`new`](Self::new) but over any [`MailfoldApi`].
    pub fn with_api(api: Arc<dyn MailfoldApi>) -> Result<(Self, ClientEvents), ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("mailfold-client")
            .build()
            .map_err(|err| ApiError::Network(format!("failed to start runtime: {err}")))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut notice_timer: Option<(u64, JoinHandle<()>)> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    ClientCommand::ArmTimer { token, after } => {
                        if let Some((old, handle)) = notice_timer.take() {
                            client_debug!("Replacing notice timer {} with {}", old, token);
                            handle.abort();
                        }
                        let event_tx = event_tx.clone();
                        let handle = runtime.spawn(async move {
                            tokio::time::sleep(after).await;
                            let _ = event_tx.send(ClientEvent::TimerFired(token));
                        });
                        notice_timer = Some((token, handle));
                    }
                    ClientCommand::CancelTimer { token } => {
                        if let Some((current, handle)) = notice_timer.take() {
                            if current == token {
                                handle.abort();
                            } else {
                                notice_timer = Some((current, handle));
                            }
                        }
                    }
                    ClientCommand::Api(call) => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let event = handle_call(api.as_ref(), call).await;
                            if event_tx.send(event).is_err() {
                                client_error!("Client event receiver dropped");
                            }
                        });
                    }
                }
            }
            if let Some((_, handle)) = notice_timer {
                handle.abort();
            }
        });

        Ok((Self { cmd_tx }, ClientEvents { event_rx }))
    }

    pub fn upload(&self, file: UploadFile, project_name: impl Into<String>) {
        self.send(ClientCommand::Api(ApiCall::Upload {
            file,
            project_name: project_name.into(),
        }));
    }

    pub fn load_projects(&self, include_others: bool) {
        self.send(ClientCommand::Api(ApiCall::LoadProjects { include_others }));
    }

    pub fn load_emails(&self, project: impl Into<String>) {
        self.send(ClientCommand::Api(ApiCall::LoadEmails {
            project: project.into(),
        }));
    }

    pub fn load_version(&self) {
        self.send(ClientCommand::Api(ApiCall::LoadVersion));
    }

    /// Arms the single notice timer, aborting whichever one was armed before.
    pub fn arm_timer(&self, token: u64, after: Duration) {
        self.send(ClientCommand::ArmTimer { token, after });
    }

    pub fn cancel_timer(&self, token: u64) {
        self.send(ClientCommand::CancelTimer { token });
    }

    fn send(&self, command: ClientCommand) {
        if self.cmd_tx.send(command).is_err() {
            client_error!("Client worker is gone; command dropped");
        }
    }
}

async fn handle_call(api: &dyn MailfoldApi, call: ApiCall) -> ClientEvent {
    match call {
        ApiCall::Upload { file, project_name } => {
            ClientEvent::UploadFinished(api.convert_email(file, &project_name).await)
        }
        ApiCall::LoadProjects { include_others } => {
            ClientEvent::ProjectsLoaded(api.list_projects(include_others).await)
        }
        ApiCall::LoadEmails { project } => {
            let result = api.list_emails(&project).await;
            ClientEvent::EmailsLoaded { project, result }
        }
        ApiCall::LoadVersion => ClientEvent::VersionLoaded(api.fetch_version().await),
    }
}

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use mailfold_client::ClientHandle;
use mailfold_core::{
    update, AppState, AppViewModel, Msg, ProjectsView, SettleReport, UploadState,
};
use mailfold_logging::{client_debug, client_info, client_warn};

use super::cli::Args;
use super::effects::{spawn_event_forwarder, EffectRunner, Observed};
use super::ui::input::{self, InputCommand};
use super::ui::render;
use super::{config, files, logging};

/// Everything the main loop waits on.
#[derive(Debug)]
pub enum LoopEvent {
    Msg(Msg),
    Line(String),
    InputClosed,
}

pub fn run_app() -> Result<()> {
    let args = Args::parse();

    let mut config = config::load(&args.config)?;
    if let Some(server) = &args.server {
        config.server_url = server.clone();
    }
    if args.include_others {
        config.include_others = true;
    }
    logging::initialize(
        args.log.unwrap_or(config.log_destination),
        config.log_level(),
    );
    client_info!(
        "Starting mailfold {} against {}",
        env!("CARGO_PKG_VERSION"),
        config.server_url
    );

    let (client, events) =
        ClientHandle::new(config.client_settings()).context("failed to start the client")?;
    let project = args
        .project
        .clone()
        .or_else(|| config.last_project.clone())
        .unwrap_or_default();
    let state = AppState::new()
        .with_notice_duration(config.notice_duration())
        .with_include_others(config.include_others)
        .with_project_name(project);

    let (loop_tx, loop_rx) = mpsc::channel();
    spawn_event_forwarder(events, loop_tx.clone());
    let session = Session::new(state, EffectRunner::new(client, args.config.clone()));

    match &args.file {
        Some(path) => run_once(session, path, &loop_rx),
        None => run_interactive(session, loop_tx, &loop_rx),
    }
}

struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Observed> {
        client_debug!("Dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects)
    }

    /// The view, if anything changed since the last call.
    fn take_view(&mut self) -> Option<AppViewModel> {
        self.state
            .consume_dirty()
            .then(|| self.state.view())
    }

    fn project_at(&self, index: usize) -> Option<String> {
        match self.state.view().projects {
            ProjectsView::Items(rows) => rows
                .into_iter()
                .find(|row| row.index == index)
                .map(|row| row.name),
            ProjectsView::Placeholder(_) => None,
        }
    }
}

/// Uploads one file and waits for the server's answer.
fn run_once(mut session: Session, path: &Path, loop_rx: &mpsc::Receiver<LoopEvent>) -> Result<()> {
    let msg = files::pick_message(path);
    if let Msg::FileUnreadable { name, reason } = &msg {
        bail!("could not read {name}: {reason}");
    }
    for observed in session.dispatch(msg) {
        if let Observed::Rejected(err) = observed {
            bail!(err);
        }
    }
    if session.state.upload_state() != UploadState::Converting {
        bail!("nothing was uploaded");
    }

    while let Ok(event) = loop_rx.recv() {
        let LoopEvent::Msg(msg) = event else {
            continue;
        };
        for observed in session.dispatch(msg) {
            match observed {
                Observed::Settled(SettleReport::Stored {
                    project_name,
                    stored_filename,
                }) => {
                    println!("Email stored: {stored_filename} (project {project_name})");
                    return Ok(());
                }
                Observed::Settled(SettleReport::Failed { message }) => bail!(message),
                Observed::Rejected(_) => {}
            }
        }
    }
    bail!("client stopped before the upload finished")
}

fn run_interactive(
    mut session: Session,
    loop_tx: mpsc::Sender<LoopEvent>,
    loop_rx: &mpsc::Receiver<LoopEvent>,
) -> Result<()> {
    spawn_stdin_reader(loop_tx);
    session.dispatch(Msg::Started);

    let mut screen = Screen::new();
    screen.draw(&session.state.view())?;
    screen.print(input::HELP)?;

    // A rejected second submission is dropped silently; the notice and busy
    // line of the upload in flight stay as they are.
    while let Ok(event) = loop_rx.recv() {
        match event {
            LoopEvent::Msg(msg) => {
                session.dispatch(msg);
            }
            LoopEvent::Line(line) => match input::parse_line(&line) {
                InputCommand::Quit => break,
                InputCommand::Help => {
                    screen.print(input::HELP)?;
                    continue;
                }
                InputCommand::Invalid(reason) => {
                    screen.print(&format!("! {reason}"))?;
                    continue;
                }
                InputCommand::Select(index) => match session.project_at(index) {
                    Some(name) => {
                        session.dispatch(Msg::ProjectSelected(name));
                    }
                    None => {
                        screen.print(&format!("! no project number {index}"))?;
                        continue;
                    }
                },
                command => {
                    for msg in command_messages(command) {
                        session.dispatch(msg);
                    }
                }
            },
            LoopEvent::InputClosed => break,
        }

        if let Some(view) = session.take_view() {
            screen.draw(&view)?;
        }
    }

    if session.state.upload_state() == UploadState::Converting {
        client_warn!("Exiting with an upload still in flight");
    }
    client_info!("Shutting down");
    Ok(())
}

/// Messages for commands that map straight onto the state machine.
fn command_messages(command: InputCommand) -> Vec<Msg> {
    match command {
        InputCommand::Drop(paths) => {
            let mut msgs = vec![Msg::DragEntered];
            msgs.extend(files::drop_messages(&paths));
            msgs
        }
        InputCommand::Pick(path) => vec![files::pick_message(&path)],
        InputCommand::Project(name) => vec![Msg::ProjectNameChanged(name)],
        InputCommand::Others(include) => vec![Msg::IncludeOthersChanged(include)],
        InputCommand::Refresh => vec![Msg::RefreshRequested],
        InputCommand::Dismiss => vec![Msg::NoticeDismissed],
        InputCommand::Empty => vec![Msg::NoOp],
        InputCommand::Select(_) | InputCommand::Help | InputCommand::Quit => Vec::new(),
        InputCommand::Invalid(_) => Vec::new(),
    }
}

fn spawn_stdin_reader(loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let event = match line {
                Ok(line) => LoopEvent::Line(line),
                Err(err) => {
                    client_warn!("Failed to read input: {}", err);
                    LoopEvent::InputClosed
                }
            };
            let closed = matches!(event, LoopEvent::InputClosed);
            if loop_tx.send(event).is_err() || closed {
                return;
            }
        }
        let _ = loop_tx.send(LoopEvent::InputClosed);
    });
}

struct Screen {
    clear: bool,
}

impl Screen {
    fn new() -> Self {
        Self {
            clear: io::stdout().is_terminal(),
        }
    }

    fn draw(&mut self, view: &AppViewModel) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.clear {
            write!(out, "\x1b[2J\x1b[H")?;
        } else {
            writeln!(out, "----")?;
        }
        for line in render::render(view) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}

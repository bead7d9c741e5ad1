use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use assistant_client::{ClientConfig, ClientHandle, ReqwestBackend};
use assistant_core::{update, AppState, FileDescriptor, Mode, Msg};
use assistant_logging::{assistant_info, assistant_warn};

use crate::cli::Cli;
use crate::commands::{self, Input};
use crate::effects::{CoreEventSink, EffectRunner};
use crate::logging;
use crate::render::{self, Renderer};

/// Everything the host loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A message for the state machine (backend results, timers).
    Core(Msg),
    /// One line typed by the user.
    Line(String),
    /// Stdin closed.
    InputClosed,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(cli.log, cli.log_level.into());

    let config = ClientConfig::resolve(cli.api_url.as_deref())
        .and_then(|config| config.with_poll_interval(Duration::from_secs(cli.poll_secs)))
        .context("invalid configuration")?;
    assistant_info!("Using backend at {}", config.base_url());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let api = Arc::new(ReqwestBackend::new(config.clone()).context("building HTTP client")?);
    let client = ClientHandle::new(
        api,
        config.poll_interval(),
        Arc::new(CoreEventSink::new(event_tx.clone())),
    )
    .context("starting backend worker")?;
    let runner = EffectRunner::new(client, event_tx.clone());
    spawn_input_reader(event_tx);

    println!("Research assistant connected to {}", config.base_url());
    println!("{}", commands::HELP);

    let mut session = Session::new(runner, config.base_url().to_string());
    session.dispatch(Msg::Mounted);

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Core(msg) => session.dispatch(msg),
            AppEvent::Line(line) => {
                if !session.handle_line(&line) {
                    break;
                }
            }
            AppEvent::InputClosed => break,
        }
    }

    session.dispatch(Msg::Unmounted);
    assistant_info!("Session ended");
    Ok(())
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    renderer: Renderer,
    base_url: String,
}

impl Session {
    fn new(runner: EffectRunner, base_url: String) -> Self {
        Self {
            state: AppState::new(),
            runner,
            renderer: Renderer::new(),
            base_url,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.run(effects);
        if was_dirty {
            print_lines(self.renderer.render(&view));
        }
    }

    /// Returns `false` when the user asked to leave.
    fn handle_line(&mut self, line: &str) -> bool {
        match commands::parse(line, &self.state.view()) {
            Input::Msgs(msgs) => {
                for msg in msgs {
                    self.dispatch(msg);
                }
            }
            Input::SelectFiles(paths) => {
                let files = describe_files(paths);
                if !files.is_empty() {
                    self.dispatch(Msg::ModeSelected(Mode::File));
                    self.dispatch(Msg::FilesSelected(files));
                }
            }
            Input::ShowStatus => print_lines(render::summary(&self.state.view(), &self.base_url)),
            Input::Help => println!("{}", commands::HELP),
            Input::Rejected(hint) => println!("[hint] {hint}"),
            Input::Quit => return false,
            Input::Empty => {}
        }
        true
    }
}

/// Reads size and name for each path; unreadable paths are reported and skipped.
fn describe_files(paths: Vec<PathBuf>) -> Vec<FileDescriptor> {
    paths
        .into_iter()
        .filter_map(|path| match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                Some(FileDescriptor::new(name, meta.len(), path))
            }
            Ok(_) => {
                println!("[warning] {} is not a file", path.display());
                None
            }
            Err(err) => {
                println!("[warning] cannot read {}: {}", path.display(), err);
                None
            }
        })
        .collect()
}

fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(AppEvent::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    assistant_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

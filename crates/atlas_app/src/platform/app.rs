use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::time::Duration;

use atlas_core::{update, AppState, AppViewModel, LoadPhase, Msg};
use atlas_logging::atlas_info;
use chrono::Utc;

use super::config::Config;
use super::effects::EffectRunner;
use super::input::{self, Command};
use super::logging;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::initialize(config.log_destination);
    atlas_info!("atlas starting; endpoint {}", config.endpoint);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx, &config);

    let mut state = AppState::new();

    // Kick off the one-shot load. Requesting it does not mark the state
    // dirty, so print the opening frame by hand.
    let view = pump(&mut state, &runner, Msg::LoadRequested);
    print_frame(&ui::render::render(&view));

    wait_for_load(&mut state, &runner, &msg_rx);
    atlas_info!("load finished at {}", Utc::now().to_rfc3339());

    println!("\nType `help` for commands.");
    interactive_loop(&mut state, &runner, &msg_rx)
}

/// Run one message through the pure update, execute its effects, and print
/// a fresh frame when the state marked itself dirty. Returns the derived
/// view so callers can inspect the outcome.
fn pump(state: &mut AppState, runner: &EffectRunner, msg: Msg) -> AppViewModel {
    let taken = std::mem::take(state);
    let (next, effects) = update(taken, msg);
    *state = next;
    runner.run(effects);

    let view = state.view();
    if state.consume_dirty() {
        print_frame(&ui::render::render(&view));
    }
    view
}

/// Pump engine messages until the load completes. The engine's own request
/// timeout bounds this loop; completion always arrives, as success or as a
/// surfaced failure.
fn wait_for_load(state: &mut AppState, runner: &EffectRunner, msg_rx: &mpsc::Receiver<Msg>) {
    loop {
        match msg_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(msg) => {
                let view = pump(state, runner, msg);
                if view.phase == LoadPhase::Ready {
                    return;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return,
        }
    }
}

fn interactive_loop(
    state: &mut AppState,
    runner: &EffectRunner,
    msg_rx: &mpsc::Receiver<Msg>,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        drain_pending(state, runner, msg_rx);

        print!("{}", ui::constants::PROMPT);
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match input::parse(&line) {
            Ok(Command::ToggleSort) => {
                pump(state, runner, Msg::SortToggled);
            }
            Ok(Command::Filter(filter)) => {
                pump(state, runner, Msg::FilterPicked(filter));
            }
            Ok(Command::Page(page)) => {
                let view = pump(state, runner, Msg::PageSelected(page - 1));
                if view.page_count == 0 {
                    println!("no pages to select");
                } else if view.current_page != page - 1 {
                    println!("no page {page}; pages run 1 to {}", view.page_count);
                }
            }
            Ok(Command::Help) => println!("{}", ui::constants::HELP_TEXT),
            Ok(Command::Quit) => return Ok(()),
            Err(hint) => println!("{hint}"),
        }
    }
}

/// Apply any messages the engine produced while the prompt was idle.
fn drain_pending(state: &mut AppState, runner: &EffectRunner, msg_rx: &mpsc::Receiver<Msg>) {
    while let Ok(msg) = msg_rx.try_recv() {
        pump(state, runner, msg);
    }
}

fn print_frame(frame: &str) {
    println!();
    print!("{frame}");
    let _ = io::stdout().flush();
}

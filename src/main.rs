mod app;
mod bridge;
mod config;
mod content;
mod logging;
mod ui;

use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::content::{Flow, ProbeView};
use crate::logging::{JsonFileSink, LogSink, TracingSink};
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let cfg = config::load_config()?;
    init_tracing(&cfg.logging)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Diagnostics go to `webshell.log` in the log directory; the terminal
/// belongs to the UI. Nothing is installed when logging is off.
fn init_tracing(cfg: &config::LoggingConfig) -> Result<()> {
    if !cfg.enabled {
        return Ok(());
    }
    let dir = logging::expand_home(&cfg.log_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("webshell.log"))
        .context("Failed to open diagnostics log")?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut view = ProbeView::new(&cfg.content, event_tx.clone())?;
    let mut sinks: Vec<Box<dyn LogSink>> =
        vec![Box::new(JsonFileSink::new(&cfg.logging)), Box::new(TracingSink)];

    let mut state = AppState::new(cfg);
    // Load failures ring the terminal bell
    state.on_error = Some(Box::new(|_message: &str| {
        let _ = io::stdout().write_all(b"\x07");
        let _ = io::stdout().flush();
    }));

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
    drop(event_tx);

    let mut actions = handler::mount(&mut state);

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    loop {
        for action in actions.drain(..) {
            match content::execute(&mut view, &action, content::open_external) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => state.should_quit = true,
                Err(e) => {
                    state.log_error(
                        "content_command_failed",
                        json!({ "command": action.name(), "error": format!("{:#}", e) }),
                    );
                }
            }
        }

        for record in state.pending_logs.drain(..) {
            for sink in sinks.iter_mut() {
                sink.emit(&record);
            }
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }

        let Some(event) = event_rx.recv().await else { break };
        actions = handler::handle_event(&mut state, event, Instant::now());
    }

    Ok(())
}

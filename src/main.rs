#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info, warn};
use ratatui::{Terminal, prelude::*};

use showdown::FrameClock;
use showdown::app::App;
use showdown::config::{GameConfig, loader};
use showdown::settings::SettingsStore;
use showdown::sound::AudioState;
use showdown::storage::{MemoryStore, SharedStore};
use showdown::ui;

fn main() -> Result<()> {
    // Create log file and redirect stderr to it
    let log_path = "showdown.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .context("Failed to create log file")?;

    // Redirect stderr to the log file
    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Showdown");

    let config = match loader::load_config() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            GameConfig::default()
        }
    };

    let store: SharedStore = match config.storage.open() {
        Ok(store) => store,
        Err(e) => {
            warn!("Records unavailable ({e}), keeping them in memory for this run");
            Arc::new(MemoryStore::new())
        }
    };

    let settings = SettingsStore::load(store.clone()).get();
    let audio = AudioState::new(&settings);
    let app = App::new(&config, store, audio);

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(
        &mut terminal,
        app,
        config.timing.render_tick(),
        config.timing.game_tick(),
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    info!("Goodbye, partner");
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> Result<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();
    let mut clock = FrameClock::new();

    // Explicitly flush any pending input events that might be in the buffer
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    let mut audio_error_logged = false;

    loop {
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();
            let delta = clock.tick();

            // If audio device is unavailable and we haven't logged it yet, log it once
            if !audio_error_logged && !app.world.resource::<AudioState>().is_available() {
                error!("Audio device is unavailable. Continuing without sound.");
                audio_error_logged = true;
            }

            let size = terminal.size()?;
            app.set_terminal_size(size.width, size.height);
            app.on_tick(delta);
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(5))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    debug!("Key event: {key:?}");
                    app.handle_key(key.code);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }
}

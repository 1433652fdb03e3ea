use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};
use tracing::{error, info};

mod app;
mod keys;
mod listing;
mod nav;
mod ui;
mod utils;

use app::App;
use ui::{render_browser, render_help};
use utils::EVENT_POLL_INTERVAL;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("burrow=info")
        .init();

    info!("Starting Burrow file browser");

    let start_dir = match std::env::args().nth(1) {
        Some(arg) => listing::resolve_path(&arg),
        None => std::env::current_dir()?,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let mut app = App::new(start_dir, runtime.handle().clone())?;

    let terminal = ratatui::init();
    let result = run(terminal, &mut app);
    ratatui::restore();

    match &result {
        Ok(()) => info!("Burrow exited successfully"),
        Err(e) => error!("Burrow exited with error: {}", e),
    }

    result
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        app.poll_loads();
        terminal.draw(|frame| render(app, frame))?;

        if event::poll(EVENT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(command) = keys::command_for(&key) {
                        app.apply(command);
                    }
                }
            }
        }

        if app.should_quit {
            break Ok(());
        }
    }
}

fn render(app: &mut App, frame: &mut Frame) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Browser
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    app.render_header(frame, main_layout[0]);

    if app.show_help {
        render_help(frame, main_layout[1]);
    } else {
        render_browser(app, frame, main_layout[1]);
    }

    app.render_footer(frame, main_layout[2]);
}

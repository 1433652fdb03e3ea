use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::{debug, error, info};

use crate::{
    keys::Command,
    listing::{self, DirectoryReadError, Entry},
    nav::Navigator,
    utils::{MANUAL_REFRESH_COOLDOWN, format_path_display},
};

struct LoadResult {
    generation: u64,
    path: PathBuf,
    outcome: Result<Vec<Entry>, DirectoryReadError>,
}

pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub current_dir: PathBuf,
    pub navigator: Navigator,
    pub loading: bool,
    pub last_error: Option<String>,
    // Directory history scaffolding; no back-navigation is bound yet.
    pub directory_history: Vec<PathBuf>,
    last_manual_refresh: Instant,
    generation: u64,
    runtime: Handle,
    results_tx: Sender<LoadResult>,
    results_rx: Receiver<LoadResult>,
}

impl App {
    /// Load the start directory synchronously. A failure here is fatal to
    /// startup and propagates out of `main`.
    pub fn new(start_dir: PathBuf, runtime: Handle) -> Result<Self, DirectoryReadError> {
        let entries = runtime.block_on(listing::list_directory(&start_dir))?;
        info!(
            "loaded {} entries from {}",
            entries.len(),
            start_dir.display()
        );

        let (results_tx, results_rx) = mpsc::channel();
        Ok(Self {
            should_quit: false,
            show_help: false,
            navigator: Navigator::new(entries),
            directory_history: vec![start_dir.clone()],
            current_dir: start_dir,
            loading: false,
            last_error: None,
            last_manual_refresh: Instant::now()
                .checked_sub(MANUAL_REFRESH_COOLDOWN)
                .unwrap_or_else(Instant::now),
            generation: 0,
            runtime,
            results_tx,
            results_rx,
        })
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Help => self.show_help = !self.show_help,
            Command::Escape => self.show_help = false,
            // The help overlay swallows everything else.
            _ if self.show_help => {}
            _ if self.loading => {
                // Never applied to a list that is about to be replaced.
                debug!("dropping {command:?} while a listing is in flight");
            }
            Command::MoveUp => self.navigator.move_up(),
            Command::MoveDown => self.navigator.move_down(),
            Command::PageUp => self.navigator.page_up(),
            Command::PageDown => self.navigator.page_down(),
            Command::Home => self.navigator.home(),
            Command::End => self.navigator.end(),
            // Entering the selection is a future feature.
            Command::Enter => {}
            Command::Refresh => self.reload(),
        }
    }

    /// Re-list the current directory, rate-limited to one refresh per
    /// cooldown window.
    pub fn reload(&mut self) {
        if self.last_manual_refresh.elapsed() < MANUAL_REFRESH_COOLDOWN {
            return;
        }
        self.last_manual_refresh = Instant::now();
        self.start_load(self.current_dir.clone());
    }

    /// Kick off an asynchronous listing. Each load bumps the generation
    /// counter; results from superseded loads are discarded on arrival.
    fn start_load(&mut self, path: PathBuf) {
        self.generation += 1;
        self.loading = true;
        let generation = self.generation;
        let tx = self.results_tx.clone();
        self.runtime.spawn(async move {
            let outcome = listing::list_directory(&path).await;
            // The receiver only goes away on shutdown.
            let _ = tx.send(LoadResult {
                generation,
                path,
                outcome,
            });
        });
    }

    /// Drain listing results that arrived since the last tick.
    pub fn poll_loads(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            if result.generation != self.generation {
                debug!("discarding stale listing for {}", result.path.display());
                continue;
            }
            self.loading = false;
            match result.outcome {
                Ok(entries) => {
                    info!(
                        "loaded {} entries from {}",
                        entries.len(),
                        result.path.display()
                    );
                    self.navigator.load(entries);
                    self.last_error = None;
                    if self.directory_history.last() != Some(&result.path) {
                        self.directory_history.push(result.path.clone());
                    }
                    self.current_dir = result.path;
                }
                Err(err) => {
                    // The previous listing stays on screen.
                    error!("{err}");
                    self.last_error = Some(err.to_string());
                }
            }
        }
    }

    pub fn status_line(&self) -> String {
        let count = self.navigator.len();
        let mut status = format!(
            "{} | {} items",
            format_path_display(&self.current_dir),
            count
        );
        if let Some(entry) = self.navigator.selected_entry() {
            let icon = if entry.is_directory { "📁" } else { "📄" };
            status.push_str(&format!(" | {icon} {}", entry.name));
        }
        if count > self.navigator.window_height() {
            status.push_str(&format!(
                " | {}/{}",
                self.navigator.selected_index() + 1,
                count
            ));
        }
        if self.loading {
            status.push_str(" | loading…");
        }
        if let Some(err) = &self.last_error {
            status.push_str(&format!(" | {err}"));
        }
        status
    }

    pub fn render_header(&self, frame: &mut Frame, area: Rect) {
        let username = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown-user".to_string());
        let title_text = format!(
            "{} :: FILE BROWSER :: {}",
            username.to_uppercase(),
            format_path_display(&self.current_dir)
        );
        let title = Paragraph::new(title_text)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            );
        frame.render_widget(title, area);
    }

    pub fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let text = if self.show_help {
            "ESC or ? to close".to_string()
        } else {
            format!("{} | ? (help) | q (quit)", self.status_line())
        };
        let footer = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(footer, area);
    }
}

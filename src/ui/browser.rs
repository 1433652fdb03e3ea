use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    app::App,
    listing::Entry,
    utils::{FILE_NAME_MAX_LEN, format_path_display, format_size, truncate_string},
};

pub fn render_browser(app: &mut App, frame: &mut Frame, area: Rect) {
    let title = format!("📂 Explorer: {}", format_path_display(&app.current_dir));
    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    // The measured row count feeds back into the navigator so a resize
    // takes effect on this frame's projection.
    let inner_height = block.inner(area).height as usize;
    app.navigator.set_window_height(inner_height.max(1));

    let projection = app.navigator.projection();
    if projection.has_more_above() {
        block = block.title(Line::from(format!("▲ {} above", projection.hidden_above)).right_aligned());
    }
    if projection.has_more_below() {
        block = block
            .title_bottom(Line::from(format!("▼ {} below", projection.hidden_below)).right_aligned());
    }

    let items: Vec<ListItem> = projection
        .rows
        .iter()
        .map(|row| {
            let style = if row.is_selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Cyan)
            };
            ListItem::new(entry_line(row.entry)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(list, area);
}

fn entry_line(entry: &Entry) -> String {
    let icon = if entry.is_directory { "📁" } else { "📄" };
    let name = truncate_string(&entry.name, FILE_NAME_MAX_LEN);
    let size = match (entry.is_directory, entry.size) {
        (false, Some(bytes)) => format_size(bytes),
        _ => String::from("-"),
    };
    let modified = match entry.modified {
        Some(when) => when.format("%Y-%m-%d %H:%M").to_string(),
        None => String::from("-"),
    };
    format!(
        "{icon} {name:<width$} {size:>9}  {modified}",
        width = FILE_NAME_MAX_LEN
    )
}

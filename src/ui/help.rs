use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_help(frame: &mut Frame, area: Rect) {
    let help_text = "
FILE BROWSER - HELP

NAVIGATION:
  ↑ ↓ j k  - Move the selection
  PgUp/PgDn- Jump by one page (one row of context is kept)
  Home/End - Jump to the first/last entry
  r        - Refresh the current directory
  ?        - Show/hide this help
  q, Ctrl+C- Quit

DISPLAY:
  📁 Directories sort first, then 📄 files, A to Z
  ▲ / ▼ border markers count the entries scrolled
    out of view on each side
  A '-' in the size or date column means the entry
    could not be inspected (the name is still shown)

Press '?' or Esc to close this help.
    ";

    let help_block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let paragraph = Paragraph::new(help_text.trim())
        .style(Style::default().fg(Color::White))
        .block(help_block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

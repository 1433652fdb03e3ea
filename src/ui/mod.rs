mod browser;
mod help;

pub use browser::render_browser;
pub use help::render_help;

use std::path::Path;
use std::time::Duration;

// Constants
pub const FILE_NAME_MAX_LEN: usize = 40;
pub const PATH_DISPLAY_MAX_LEN: usize = 48;
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const MANUAL_REFRESH_COOLDOWN: Duration = Duration::from_millis(500);

/// Format a byte count as a human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Truncate string to specified length with ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Shorten a path for titles: home becomes `~`, overlong paths keep their tail
pub fn format_path_display(path: &Path) -> String {
    let mut display = path.display().to_string();
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            if let Ok(rest) = path.strip_prefix(&home) {
                display = if rest.as_os_str().is_empty() {
                    "~".to_string()
                } else {
                    format!("~/{}", rest.display())
                };
            }
        }
    }

    let len = display.chars().count();
    if len > PATH_DISPLAY_MAX_LEN {
        let tail: String = display.chars().skip(len - (PATH_DISPLAY_MAX_LEN - 1)).collect();
        display = format!("…{tail}");
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_scale_through_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn truncation_keeps_short_names_intact() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a-much-longer-name", 10), "a-much-...");
    }

    #[test]
    fn long_paths_keep_their_tail() {
        let long = format!("/var/{}/deep/leaf", "x".repeat(80));
        let shown = format_path_display(Path::new(&long));
        assert!(shown.chars().count() <= PATH_DISPLAY_MAX_LEN);
        assert!(shown.ends_with("/deep/leaf"));
        assert!(shown.starts_with('…'));
    }
}

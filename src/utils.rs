use std::fs;
use std::path::Path;

/// Create an OSC8 hyperlink for terminal output
pub fn osc8_link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Create an OSC8 file:// hyperlink, resolving the path to absolute when possible
pub fn osc8_file_link(path: &Path, text: &str) -> String {
    let abs_path = fs::canonicalize(path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string());
    osc8_link(&format!("file://{}", abs_path), text)
}

//! Shared error utilities

use miette::NamedSource;
use std::path::{Path, PathBuf};

/// Path as shown in diagnostics: relative to the cwd when it lives below it
pub fn display_path(path: &Path) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Create a NamedSource with proper formatting for error display
pub fn create_named_source(path: &Path, content: String) -> NamedSource<String> {
    NamedSource::new(display_path(path).display().to_string(), content)
}

/// Byte offset of a 1-based line and column, clamped to the end of `source`
pub fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        source
            .match_indices('\n')
            .nth(line - 2)
            .map(|(idx, _)| idx + 1)
            .unwrap_or(source.len())
    };
    (line_start + column.saturating_sub(1)).min(source.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_to_offset() {
        let source = "{\n  \"a\": 1,\n  oops\n}";

        assert_eq!(line_col_to_offset(source, 1, 1), 0);
        assert_eq!(line_col_to_offset(source, 3, 3), source.find("oops").unwrap());
        assert_eq!(line_col_to_offset(source, 9, 9), source.len());
    }

    #[test]
    fn test_display_path_strips_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let inside = cwd.join("data").join("events.json");

        assert_eq!(display_path(&inside), Path::new("data/events.json"));
    }

    #[test]
    fn test_display_path_keeps_outside_paths() {
        let outside = Path::new("/definitely/not/below/cwd.json");

        assert_eq!(display_path(outside), outside);
    }
}

//! Terminal styling.
//!
//! - anstream auto-detects color support
//! - color-print's `cformat!` builds styled messages
//!
//! Status messages, prompts, and errors go to stderr. Only primary data
//! (a `config get` value, story details) goes to stdout so it can be piped.

mod constants;
mod format;
mod suggest;

pub use anstream::{eprint, eprintln, print, println};

pub use constants::*;
pub use format::{format_with_gutter, wrap_text_at_width};
pub use suggest::suggest_command;

/// Get terminal width, or `usize::MAX` if detection fails.
///
/// Checks stderr first, then stdout, then the `COLUMNS` environment variable.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) =
        terminal_size::terminal_size_of(std::io::stderr()).or_else(terminal_size::terminal_size)
    {
        return w as usize;
    }

    if let Ok(cols) = std::env::var("COLUMNS")
        && let Ok(width) = cols.parse::<usize>()
    {
        return width;
    }

    usize::MAX
}

/// Visual width of a string, ignoring ANSI escape codes.
pub fn visual_width(s: &str) -> usize {
    use ansi_str::AnsiStr;
    use unicode_width::UnicodeWidthStr;
    s.ansi_strip().width()
}

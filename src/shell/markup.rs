//! Color markup embedded in command results.
//!
//! Results are plain strings with ANSI SGR spans the front-end knows how to
//! render: blue for directories, green for success banners, red for errors.
//! The clear-screen sequence is a sentinel telling the renderer to wipe its
//! scrollback instead of appending text.

/// Sentinel result returned by `clear` (and prefixed to `reset`).
pub const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

const RESET: &str = "\u{1b}[0m";
const BLUE: &str = "\u{1b}[34m";
const GREEN: &str = "\u{1b}[32m";
const RED: &str = "\u{1b}[31m";

pub fn directory(name: &str) -> String {
    format!("{BLUE}{name}{RESET}")
}

pub fn success(text: &str) -> String {
    format!("{GREEN}{text}{RESET}")
}

pub fn error(text: &str) -> String {
    format!("{RED}{text}{RESET}")
}

/// True when a result asks the renderer to clear the screen first.
pub fn clears_screen(result: &str) -> bool {
    result.starts_with(CLEAR_SCREEN)
}

/// Remove every `ESC [ ... <letter>` sequence, leaving the visible text.
///
/// Used for terminals without color support and for log lines.
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_removes_color_spans() {
        let s = format!("{} {}", directory("projects"), error("Error: nope"));
        assert_eq!(strip(&s), "projects Error: nope");
    }

    #[test]
    fn clear_sentinel_is_detected_and_stripped() {
        let reset = format!("{CLEAR_SCREEN}\n{}", success("=== Game Reset ==="));
        assert!(clears_screen(&reset));
        assert!(!clears_screen("ls output"));
        assert_eq!(strip(&reset), "\n=== Game Reset ===");
    }
}

//! Logging utilities for sanitizing player input and command output so logs stay single-line.
//! Strips terminal markup and escapes control characters that otherwise break log readability.

use crate::shell::markup;

/// Escape a string for single-line logging:
/// - ANSI color / clear-screen sequences are dropped
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Truncates very long strings with an ellipsis to cap log noise.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 300;
    let plain = markup::strip(s);
    let mut out = String::with_capacity(plain.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in plain.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_log;
    use crate::shell::markup;

    #[test]
    fn escapes_newlines() {
        assert_eq!(escape_log("Line1\nLine2\r\tEnd"), "Line1\\nLine2\\r\\tEnd");
    }

    #[test]
    fn drops_markup_and_truncates() {
        let colored = format!("{} notes.txt", markup::directory("documents"));
        assert_eq!(escape_log(&colored), "documents notes.txt");
        let long = "x".repeat(400);
        assert!(escape_log(&long).ends_with('…'));
    }
}

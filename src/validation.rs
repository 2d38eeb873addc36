//! Input validation for lines arriving from untrusted front-ends

/// Command line validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Command line is too long (maximum {max} bytes)")]
    TooLong { max: usize },

    #[error("Command line contains control characters")]
    ControlCharacters,
}

/// Check one raw command line before it reaches a session.
///
/// - Rejects lines longer than `max_bytes` (measured before any rewriting)
/// - Strips one trailing `\n` / `\r\n`
/// - Replaces tabs with spaces; any other control character is rejected
///
/// Emptiness is not checked here; the session reports that itself.
pub fn validate_command_line(line: &str, max_bytes: usize) -> Result<String, InputError> {
    if line.len() > max_bytes {
        return Err(InputError::TooLong { max: max_bytes });
    }
    let line = line
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line);

    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\t' => out.push(' '),
            c if c.is_control() => return Err(InputError::ControlCharacters),
            c => out.push(c),
        }
    }
    Ok(out)
}

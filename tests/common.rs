//! Test utilities shared by the integration tests.

use cli_adventures::shell::{markup, Response, Session};

/// Run each line in order and return the last response.
#[allow(dead_code)] // Not every test binary uses every helper.
pub fn run_all(session: &mut Session, lines: &[&str]) -> Response {
    let mut last = session.snapshot();
    for line in lines {
        last = session.process(line);
    }
    last
}

/// Result text with color markup removed and any lesson banner dropped.
#[allow(dead_code)]
pub fn output(response: &Response) -> String {
    let plain = markup::strip(&response.result);
    match plain.strip_prefix("🎉 Challenge completed: ") {
        Some(rest) => rest.split_once('\n').map(|(_, o)| o.to_string()).unwrap_or_default(),
        None => plain,
    }
}

/// Process one line and return its plain output.
#[allow(dead_code)]
pub fn say(session: &mut Session, line: &str) -> String {
    let response = session.process(line);
    output(&response)
}

//! DESCRIPTION section segmentation for rendered manual text.
//!
//! A small line state machine (seeking-heading → optional separator →
//! in-body) rather than one pattern over the whole page, so each edge
//! case is individually testable.

use mancap_core::Description;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingHeading,
    AtSeparator,
    InBody,
}

/// Extracts the DESCRIPTION prose for `command` from rendered manual text.
///
/// The heading is a line whose trimmed content is exactly `DESCRIPTION`.
/// An immediately following line consisting only of dashes is treated as
/// a separator and skipped. The body is everything up to the first blank
/// line, joined and trimmed.
///
/// Returns the "no DESCRIPTION found" absent reason when the heading is
/// missing, when the body is empty, or when the text ends while still
/// inside the body (a section with no trailing blank line before EOF is
/// not matched; this limitation is kept rather than guessed around).
///
/// Callers that know the manual lookup itself failed must use
/// [`Description::no_man_page`] instead of segmenting empty text, so the
/// two absent reasons stay distinguishable.
pub fn extract_description(command: &str, text: &str) -> Description {
    let mut state = State::SeekingHeading;
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        match state {
            State::SeekingHeading => {
                if line.trim() == "DESCRIPTION" {
                    state = State::AtSeparator;
                }
            }
            State::AtSeparator => {
                if is_dash_separator(line) {
                    state = State::InBody;
                    continue;
                }
                state = State::InBody;
                if line.trim().is_empty() {
                    return finish(command, &body);
                }
                body.push(line);
            }
            State::InBody => {
                if line.trim().is_empty() {
                    return finish(command, &body);
                }
                body.push(line);
            }
        }
    }

    // EOF without a terminating blank line: the section is not matched.
    Description::no_section(command)
}

fn finish(command: &str, body: &[&str]) -> Description {
    let text = body.join("\n").trim().to_string();
    if text.is_empty() {
        Description::no_section(command)
    } else {
        Description::Found(text)
    }
}

fn is_dash_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch == '-')
}

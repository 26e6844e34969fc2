//! Option extraction from rendered manual text.
//!
//! Option blocks in manual pages carry no closing marker, so the only
//! reliable terminator for an entry is the start of the next flag line or
//! a blank line — the same way a human skims an option list. The scan is
//! a line state machine (seeking-flag → in-entry) with a single anchored
//! pattern for the flag token itself.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// A flag token: `-x` (one word character) or `--word` with optional
/// `-word` continuations. Dashes are part of the token and preserved.
static FLAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-\w|--\w[\w-]*)$").expect("static regex must compile"));

/// One extracted option: the literal flag spelling and its effect text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Flag token as written in the page (e.g. `-l`, `--sort`).
    pub flag: String,
    /// Trimmed effect text; soft-wrap newlines are kept as ordinary text.
    pub effect: String,
}

/// Scans manual text for flag/effect pairs.
///
/// A flag line is optional indentation, a flag token, then whitespace or
/// end of line; its effect text is the remainder of that line plus any
/// following lines that are neither blank nor flag lines. Entries keep
/// scan order, and flag tokens are unique in the result: a repeated token
/// overwrites the earlier effect text in place (last write wins).
///
/// Absence of matches is not an error — the result is simply empty.
pub fn extract_options(text: &str) -> Vec<OptionEntry> {
    let mut entries: Vec<OptionEntry> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            finish_entry(&mut entries, current.take());
            continue;
        }

        if let Some((flag, rest)) = split_flag_line(line) {
            finish_entry(&mut entries, current.take());
            current = Some((flag.to_string(), vec![rest.to_string()]));
            continue;
        }

        // Continuation of a soft-wrapped effect; prose outside any entry
        // is ignored.
        if let Some((_, body)) = current.as_mut() {
            body.push(line.to_string());
        }
    }
    finish_entry(&mut entries, current.take());

    debug!(options = entries.len(), "Extracted option entries");
    entries
}

/// Splits a flag line into its token and the remainder of the line.
///
/// Returns `None` when the line does not start (after indentation) with a
/// bare flag token followed by whitespace or end of line. Definition
/// spellings like `--flag=VALUE` are deliberately not flag lines.
fn split_flag_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_start();
    let (token, rest) = match trimmed.split_once(|ch: char| ch.is_whitespace()) {
        Some((token, rest)) => (token, rest),
        None => (trimmed, ""),
    };
    if FLAG_TOKEN.is_match(token) {
        Some((token, rest))
    } else {
        None
    }
}

fn finish_entry(entries: &mut Vec<OptionEntry>, current: Option<(String, Vec<String>)>) {
    let Some((flag, body)) = current else {
        return;
    };
    let effect = body.join("\n").trim().to_string();

    if let Some(existing) = entries.iter_mut().find(|entry| entry.flag == flag) {
        existing.effect = effect;
    } else {
        entries.push(OptionEntry { flag, effect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(flag: &str, effect: &str) -> OptionEntry {
        OptionEntry {
            flag: flag.to_string(),
            effect: effect.to_string(),
        }
    }

    #[test]
    fn test_extracts_short_and_long_flags() {
        let text = "OPTIONS\n  -l  use a long listing format\n  --all  do not ignore hidden entries\n\n";
        assert_eq!(
            extract_options(text),
            vec![
                entry("-l", "use a long listing format"),
                entry("--all", "do not ignore hidden entries"),
            ]
        );
    }

    #[test]
    fn test_wrapped_effect_keeps_internal_newline() {
        let text = "  --sort  sort by WORD instead of name: none (-U),\n          size (-S), time (-t)\n\n";
        let entries = extract_options(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].effect,
            "sort by WORD instead of name: none (-U),\n          size (-S), time (-t)"
        );
    }

    #[test]
    fn test_adjacent_flag_lines_both_match() {
        // The consuming-terminator failure mode: the first entry's end
        // must not swallow the next entry's leading dash.
        let text = "  -a  first\n  -b  second\n  -c  third\n\n";
        let entries = extract_options(text);
        let flags: Vec<&str> = entries.iter().map(|e| e.flag.as_str()).collect();
        assert_eq!(flags, vec!["-a", "-b", "-c"]);
    }

    #[test]
    fn test_duplicate_flag_last_write_wins_keeps_position() {
        let text = "  -v  enable\n  -q  quiet mode\n  -v  print version information\n\n";
        assert_eq!(
            extract_options(text),
            vec![
                entry("-v", "print version information"),
                entry("-q", "quiet mode"),
            ]
        );
    }

    #[test]
    fn test_blank_line_terminates_and_scan_continues() {
        let text = "  -a  from the first paragraph\n\nSome prose in between.\n\n  -b  from a later paragraph\n\n";
        assert_eq!(
            extract_options(text),
            vec![
                entry("-a", "from the first paragraph"),
                entry("-b", "from a later paragraph"),
            ]
        );
    }

    #[test]
    fn test_equals_definition_is_not_a_flag_line() {
        let text = "  -w  set output width\n  --width=COLS\n\n";
        let entries = extract_options(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].flag, "-w");
        assert_eq!(entries[0].effect, "set output width\n  --width=COLS");
    }

    #[test]
    fn test_multi_character_short_spelling_is_not_a_flag() {
        let text = "  -ab  not a recognized token\n\n";
        assert!(extract_options(text).is_empty());
    }

    #[test]
    fn test_flag_alone_on_line_gets_following_text() {
        let text = "  --color\n      colorize the output\n\n";
        assert_eq!(
            extract_options(text),
            vec![entry("--color", "colorize the output")]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        assert!(extract_options("").is_empty());
    }
}

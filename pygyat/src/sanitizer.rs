//! Comment and string-literal detection for a single line
//!
//! Lines are scanned once, left to right, with a small state machine that
//! knows whether it is in plain code, a single-quoted string or a
//! double-quoted string. Backslash escapes are honored inside strings. The
//! first `#` seen in plain code starts the trailing comment.
//!
//! Strings are never tracked across lines: a triple-quoted block spanning
//! several lines is treated as code on its inner lines.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    SingleQuoted,
    DoubleQuoted,
}

/// Result of scanning one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineScan {
    /// Byte ranges of string literals, quotes included. An unterminated
    /// literal runs to the end of the line.
    pub literals: Vec<Range<usize>>,
    /// Byte offset of the `#` opening a trailing comment
    pub comment_start: Option<usize>,
}

impl LineScan {
    pub fn in_literal(&self, offset: usize) -> bool {
        self.literals.iter().any(|r| r.contains(&offset))
    }
}

pub fn scan_line(line: &str) -> LineScan {
    let mut scan = LineScan::default();
    let mut state = ScanState::Code;
    let mut literal_start = 0usize;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match state {
            ScanState::Code => match c {
                '#' => {
                    scan.comment_start = Some(i);
                    return scan;
                }
                '\'' => {
                    state = ScanState::SingleQuoted;
                    literal_start = i;
                }
                '"' => {
                    state = ScanState::DoubleQuoted;
                    literal_start = i;
                }
                _ => {}
            },
            ScanState::SingleQuoted | ScanState::DoubleQuoted => {
                let closing = if state == ScanState::SingleQuoted {
                    '\''
                } else {
                    '"'
                };
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == closing {
                    scan.literals.push(literal_start..i + 1);
                    state = ScanState::Code;
                }
            }
        }
    }

    if state != ScanState::Code {
        scan.literals.push(literal_start..line.len());
    }
    scan
}

/// A line split into its code and its trailing comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizedLine<'a> {
    pub code: &'a str,
    /// The comment with the spaces or tabs that led up to it, or `""`
    pub comment: &'a str,
}

/// Split the trailing comment off a line
///
/// The comment keeps the blanks that separated it from the code, so
/// `code + comment` always equals the input.
///
/// # Example
/// ```ignore
/// let line = sanitize_line("chat is this real x twin 1  # check");
/// assert_eq!(line.code, "chat is this real x twin 1");
/// assert_eq!(line.comment, "  # check");
/// ```
pub fn sanitize_line(line: &str) -> SanitizedLine<'_> {
    match scan_line(line).comment_start {
        Some(hash) => {
            let start = line[..hash].trim_end_matches([' ', '\t']).len();
            SanitizedLine {
                code: &line[..start],
                comment: &line[start..],
            }
        }
        None => SanitizedLine {
            code: line,
            comment: "",
        },
    }
}

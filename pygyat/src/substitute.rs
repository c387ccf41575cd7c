//! Token substitution for a single line of code
//!
//! Every table entry is applied in table order, each one over the whole line
//! before the next. An occurrence is replaced only when it is a real token:
//!
//! - word edges are not glued to other word characters (`yapper` keeps its
//!   `yap`); the matcher's `\b` anchors take care of this
//! - operator edges are not glued to other operator characters (`->` keeps its `>`)
//! - it is not touching a quote or a `#`
//! - it is not inside a string literal

use crate::mappings::{Mapping, MappingTable, is_operator_char};
use crate::sanitizer::{LineScan, scan_line};

const GUARD_CHARS: [char; 3] = ['"', '\'', '#'];

/// Replace every dialect token in `code` with its counterpart from `table`
///
/// The line should already have had its trailing comment removed. A line
/// without any token comes back unchanged.
pub fn substitute_line(code: &str, table: &MappingTable) -> String {
    let mut line = code.to_string();
    for mapping in table.iter() {
        if let Some(replaced) = replace_token(&line, mapping) {
            line = replaced;
        }
    }
    line
}

/// Apply one mapping to the whole line. Returns `None` if nothing changed.
fn replace_token(line: &str, mapping: &Mapping) -> Option<String> {
    let mut matches = mapping.matcher().find_iter(line).peekable();
    matches.peek()?;

    let scan = scan_line(line);
    let mut result = String::with_capacity(line.len());
    let mut last = 0usize;
    for m in matches {
        if !is_replaceable(line, m.start(), m.end(), &scan) {
            continue;
        }
        result.push_str(&line[last..m.start()]);
        result.push_str(mapping.replacement());
        last = m.end();
    }

    if last == 0 {
        return None;
    }
    result.push_str(&line[last..]);
    Some(result)
}

fn is_replaceable(line: &str, start: usize, end: usize, scan: &LineScan) -> bool {
    if scan.in_literal(start) {
        return false;
    }

    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    if before.is_some_and(|c| GUARD_CHARS.contains(&c))
        || after.is_some_and(|c| GUARD_CHARS.contains(&c))
    {
        return false;
    }

    let token = &line[start..end];
    let glued_before = token.starts_with(is_operator_char) && before.is_some_and(is_operator_char);
    let glued_after = token.ends_with(is_operator_char) && after.is_some_and(is_operator_char);
    !(glued_before || glued_after)
}

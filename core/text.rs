use crate::diagnostics::SkipReason;
use std::fs;
use std::path::Path;

/// Reads a file as UTF-8 text. Binary (NUL-bearing) or undecodable content
/// is reported as a skip reason.
pub fn read_text(path: &Path) -> Result<String, SkipReason> {
    let bytes = fs::read(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    if bytes.contains(&0) {
        return Err(SkipReason::Binary);
    }
    String::from_utf8(bytes).map_err(|_| SkipReason::Unreadable("invalid UTF-8".to_string()))
}

/// Splits text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Drops whitespace-only lines at both ends. Interior blank lines stay.
pub fn trim_blank_edges<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    let is_blank = |l: &&str| l.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l));
    let end = lines.iter().rposition(|l| !is_blank(l));
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].to_vec(),
        _ => Vec::new(),
    }
}

/// The line without its `\n` or `\r\n` terminator.
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

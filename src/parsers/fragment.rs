//! Heuristic extraction of tree descriptions from arbitrary text lines.

const OPEN: char = '(';
const CLOSE: char = ')';

/// Returns the first whitespace-separated token on `line` that starts with
/// `(` and holds as many `(` as `)`.
///
/// Only the counts are compared; `())(` style nesting errors are left for
/// the NEWICK parser to reject. At most one fragment is taken per line.
pub fn scan_fragment(line: &str) -> Option<&str> {
    line.split_whitespace()
        .filter(|token| token.starts_with(OPEN))
        .find(|token| is_bracket_balanced(token))
}

pub(crate) fn is_bracket_balanced(token: &str) -> bool {
    let opened = token.chars().filter(|&c| c == OPEN).count();
    let closed = token.chars().filter(|&c| c == CLOSE).count();
    opened == closed
}

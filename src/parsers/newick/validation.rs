/// Pre-validates a NEWICK formatted string before parsing.
pub(crate) fn is_valid_newick_structure(s: &str) -> bool {
    let s = s.trim();

    let Some(content) = s.strip_suffix(';') else {
        return false;
    };

    if content.trim().is_empty() {
        return false;
    }

    has_balanced_delimiters(content)
}

#[derive(Debug, Default)]
struct DelimiterDepth {
    parenthesis: i32,
    square_bracket: i32,
    in_single_quotes: bool,
    in_double_quotes: bool,
}

impl DelimiterDepth {
    fn in_quotes(&self) -> bool {
        self.in_single_quotes || self.in_double_quotes
    }

    fn in_comment(&self) -> bool {
        !self.in_quotes() && self.square_bracket > 0
    }

    fn is_balanced(&self) -> bool {
        self.parenthesis == 0 && self.square_bracket == 0 && !self.in_quotes()
    }
}

/// Checks if the string has balanced parentheses, brackets, and quotes.
/// Delimiters inside quoted labels are ignored, and so are quotes and
/// parentheses inside square-bracket comments.
fn has_balanced_delimiters(s: &str) -> bool {
    let mut depth = DelimiterDepth::default();

    for c in s.chars() {
        match c {
            '[' if !depth.in_quotes() => depth.square_bracket += 1,
            ']' if !depth.in_quotes() => depth.square_bracket -= 1,
            _ if depth.in_comment() => {}
            '\'' if !depth.in_double_quotes => {
                depth.in_single_quotes = !depth.in_single_quotes;
            }
            '"' if !depth.in_single_quotes => {
                depth.in_double_quotes = !depth.in_double_quotes;
            }
            _ if depth.in_quotes() => {}
            '(' => depth.parenthesis += 1,
            ')' => depth.parenthesis -= 1,
            _ => {}
        }

        // More closing than opening.
        if depth.parenthesis < 0 || depth.square_bracket < 0 {
            return false;
        }
    }

    depth.is_balanced()
}

pub(crate) mod validation;

use crate::TreeParseError;

use super::super::TreeFloat;
use super::super::phylo::Node;
use super::super::phylo::NodeId;
use super::super::phylo::Tree;
use std::sync::Arc;
use validation::is_valid_newick_structure;

/// Checks if a character is a NEWICK structural delimiter.
fn is_structural_delimiter(character: char) -> bool {
    matches!(character, ';' | '(' | ')' | ',' | ':' | '[' | ']')
}

fn is_quote(character: char) -> bool {
    matches!(character, '\'' | '"')
}

/// Cursor over a single NEWICK tree string.
///
/// Tracks the byte position inside the input; every `next_char` call moves
/// the position past one full character.
#[derive(Debug)]
struct ParserState<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> ParserState<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let character = self.peek_char()?;
        self.position += character.len_utf8();
        Some(character)
    }

    fn unexpected(&self, character: char) -> TreeParseError {
        TreeParseError::UnexpectedCharacter { position: self.position, character }
    }

    /// Skips whitespace and square-bracket comments such as `[&R]` or
    /// `[&posterior=0.98]`. Comments may nest.
    fn skip_ignorable(&mut self) -> Result<(), TreeParseError> {
        while let Some(character) = self.peek_char() {
            if character.is_whitespace() {
                _ = self.next_char();
            } else if character == '[' {
                self.skip_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_comment(&mut self) -> Result<(), TreeParseError> {
        let mut square_bracket_depth: usize = 0;
        while let Some(character) = self.next_char() {
            match character {
                '[' => square_bracket_depth += 1,
                ']' => {
                    square_bracket_depth -= 1;
                    if square_bracket_depth == 0 {
                        return Ok(());
                    }
                }
                _ => (),
            }
        }
        Err(TreeParseError::UnexpectedEnd)
    }

    /// Reads a quoted label. A doubled quote character inside the label
    /// stands for one literal quote.
    fn read_quoted(&mut self, quote: char) -> Result<String, TreeParseError> {
        let mut label = String::new();
        _ = self.next_char();
        loop {
            match self.next_char() {
                Some(c) if c == quote => {
                    if self.peek_char() == Some(quote) {
                        _ = self.next_char();
                        label.push(quote);
                    } else {
                        return Ok(label);
                    }
                }
                Some(c) => label.push(c),
                None => return Err(TreeParseError::UnexpectedEnd),
            }
        }
    }

    fn read_unquoted(&mut self) -> &'a str {
        let input = self.input;
        let start = self.position;
        while let Some(character) = self.peek_char() {
            if character.is_whitespace() || is_structural_delimiter(character) {
                break;
            }
            _ = self.next_char();
        }
        &input[start..self.position]
    }

    fn read_name(&mut self) -> Result<Option<String>, TreeParseError> {
        match self.peek_char() {
            Some(c) if is_quote(c) => self.read_quoted(c).map(Some),
            _ => match self.read_unquoted() {
                "" => Ok(None),
                name => Ok(Some(name.to_string())),
            },
        }
    }

    fn read_branch_length(&mut self) -> Result<TreeFloat, TreeParseError> {
        let raw = self.read_unquoted();
        raw.parse::<TreeFloat>()
            .map_err(|_| TreeParseError::InvalidBranchLength(raw.to_string()))
    }

    /// Parses `name? (":" length)?`.
    fn parse_label(
        &mut self,
    ) -> Result<(Option<String>, Option<TreeFloat>), TreeParseError> {
        self.skip_ignorable()?;
        let name = self.read_name()?;
        self.skip_ignorable()?;
        let mut branch_length = None;
        if self.peek_char() == Some(':') {
            _ = self.next_char();
            self.skip_ignorable()?;
            branch_length = Some(self.read_branch_length()?);
            self.skip_ignorable()?;
        }
        Ok((name, branch_length))
    }

    fn finish_node(
        &mut self,
        node_id: NodeId,
        tree: &mut Tree,
    ) -> Result<(), TreeParseError> {
        let (name, branch_length) = self.parse_label()?;
        if let Some(node) = tree.node_mut(Some(node_id)) {
            node.set_name(name.map(Arc::from));
            node.set_branch_length(branch_length);
        }
        Ok(())
    }

    /// Parses the whole subtree below the first node.
    ///
    /// `open` holds the nodes whose `(` has been read but whose `)` has not,
    /// so nesting depth is bounded by memory rather than by the call stack.
    fn parse_subtree(
        &mut self,
        tree: &mut Tree,
    ) -> Result<NodeId, TreeParseError> {
        let first_node_id = tree.add_node(Node::default(), None)?;
        let mut open: Vec<NodeId> = Vec::new();
        let mut node_id = first_node_id;

        loop {
            self.skip_ignorable()?;
            if self.peek_char() == Some('(') {
                _ = self.next_char();
                open.push(node_id);
                node_id = tree.add_node(Node::default(), Some(node_id))?;
                continue;
            }

            self.finish_node(node_id, tree)?;

            // Close finished groups until another sibling starts.
            loop {
                let Some(&parent_id) = open.last() else {
                    return Ok(first_node_id);
                };
                self.skip_ignorable()?;
                match self.next_char() {
                    Some(',') => {
                        node_id =
                            tree.add_node(Node::default(), Some(parent_id))?;
                        break;
                    }
                    Some(')') => {
                        _ = open.pop();
                        self.finish_node(parent_id, tree)?;
                    }
                    Some(c) => {
                        self.position -= c.len_utf8();
                        return Err(self.unexpected(c));
                    }
                    None => return Err(TreeParseError::UnexpectedEnd),
                }
            }
        }
    }

    fn parse_tree(&mut self) -> Result<Tree, TreeParseError> {
        let mut tree = Tree::default();
        _ = self.parse_subtree(&mut tree)?;
        self.skip_ignorable()?;
        match self.next_char() {
            Some(';') => (),
            Some(c) => {
                self.position -= c.len_utf8();
                return Err(self.unexpected(c));
            }
            None => return Err(TreeParseError::UnexpectedEnd),
        }
        self.skip_ignorable()?;
        if let Some(c) = self.peek_char() {
            return Err(self.unexpected(c));
        }
        _ = tree.validate()?;
        Ok(tree)
    }
}

/// Parses one NEWICK formatted tree string into a [Tree].
///
/// The string must hold exactly one tree terminated by `;`. Square-bracket
/// comments are discarded. Quoted labels keep their content verbatim;
/// unquoted labels are taken as written.
///
/// - `(A,(B,C));`
/// - `((1:0.1,2:0.2):0.05,3:0.3);`
/// - `[&R] ('Homo sapiens',Pan);`
pub fn parse_newick(newick_string: &str) -> Result<Tree, TreeParseError> {
    if !is_valid_newick_structure(newick_string) {
        return Err(TreeParseError::InvalidNewick);
    }
    ParserState::new(newick_string.trim()).parse_tree()
}

/// Converts a [Tree] to a single-line NEWICK string terminated by `;`.
///
/// Returns an empty string for a tree that has not been validated.
pub fn write_newick(tree: &Tree) -> String {
    let Some(first_node_id) = tree.first_node_id() else {
        return String::new();
    };

    let mut newick = String::new();
    // (node, index of the next child to write)
    let mut stack: Vec<(NodeId, usize)> = vec![(first_node_id, 0)];
    while let Some((node_id, next_child)) = stack.pop() {
        let child_ids = tree.child_ids(&node_id);
        if let Some(&child_id) = child_ids.get(next_child) {
            newick.push(if next_child == 0 { '(' } else { ',' });
            stack.push((node_id, next_child + 1));
            stack.push((child_id, 0));
            continue;
        }

        if !child_ids.is_empty() {
            newick.push(')');
        }
        write_label(&node_id, tree, &mut newick);
    }

    newick.push(';');
    newick
}

fn write_label(node_id: &NodeId, tree: &Tree, newick: &mut String) {
    if let Some(name) = tree.name(node_id) {
        newick.push_str(&quote_label(&name));
    }

    if let Some(branch_length) = tree.branch_length(node_id) {
        newick.push(':');
        newick.push_str(&format_branch_length(branch_length));
    }
}

/// Shortest text that reads back as the same value. Very small and very
/// large magnitudes switch to exponent form (`1e-300`, not 300 digits).
fn format_branch_length(branch_length: TreeFloat) -> String {
    let magnitude = branch_length.abs();
    if magnitude != 0.0 && !(1e-5..1e16).contains(&magnitude) {
        format!("{branch_length:e}")
    } else {
        format!("{branch_length}")
    }
}

/// Wraps a label in single quotes when it would not survive unquoted.
fn quote_label(label: &str) -> String {
    let needs_quotes = label.chars().any(|c| {
        c.is_whitespace() || is_structural_delimiter(c) || is_quote(c)
    });
    if needs_quotes {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

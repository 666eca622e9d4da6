// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Statement classification
//!
//! Every non-blank line of a model description is either a declaration
//! (`<command>: <value> ...`) or a connectivity statement made of two or
//! three operands joined by `->`.

use std::borrow::Cow;

/// Comment marker
pub const COMMENT: char = '#';

/// Escaped comment marker, kept as a literal `#`
pub const ESCAPED_COMMENT: &str = "\\#";

/// Declaration separator
pub const DEFINITION_SEPARATOR: char = ':';

/// Connectivity operator
pub const ARROW: &str = "->";

/// A classified source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    /// `<command>: <arguments>`
    Declaration { command: &'a str, arguments: Vec<&'a str> },
    /// `<operand> -> <operand> [-> <operand>]`
    Connectivity { operands: Vec<&'a str> },
}

/// Remove the comment from a line and trim it
///
/// Returns `None` for lines with no content left.
pub fn strip_comment(line: &str) -> Option<Cow<'_, str>> {
    let mut content = String::new();
    let mut rest = line;
    let mut escaped = false;

    loop {
        match rest.find([COMMENT, '\\']) {
            Some(offset) if rest[offset..].starts_with(ESCAPED_COMMENT) => {
                content.push_str(&rest[..offset]);
                content.push(COMMENT);
                rest = &rest[offset + ESCAPED_COMMENT.len()..];
                escaped = true;
            }
            Some(offset) if rest[offset..].starts_with(COMMENT) => {
                content.push_str(&rest[..offset]);
                break;
            }
            Some(offset) => {
                content.push_str(&rest[..=offset]);
                rest = &rest[offset + 1..];
            }
            None => {
                content.push_str(rest);
                break;
            }
        }
    }

    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else if !escaped && trimmed.len() == content.len() && content == line {
        Some(Cow::Borrowed(line))
    } else {
        Some(Cow::Owned(trimmed.to_string()))
    }
}

/// Whether a line has the shape of a declaration
pub fn is_declaration(line: &str) -> bool {
    if line.matches(DEFINITION_SEPARATOR).count() != 1 {
        return false;
    }
    match line.split_once(DEFINITION_SEPARATOR) {
        Some((command, arguments)) => command.split_whitespace().count() == 1 && arguments.split_whitespace().count() >= 1,
        None => false,
    }
}

/// Whether a line has the shape of a connectivity statement
pub fn is_connectivity(line: &str) -> bool {
    let arrows = line.matches(ARROW).count();
    if !(1..=2).contains(&arrows) {
        return false;
    }
    line.split(ARROW).all(|operand| operand.split_whitespace().count() == 1)
}

/// Classify a comment-free, trimmed, non-empty line
///
/// Declarations take precedence when a line matches both shapes. Returns
/// `None` for lines matching neither.
pub fn classify(line: &str) -> Option<Statement<'_>> {
    if is_declaration(line) {
        let (command, arguments) = line.split_once(DEFINITION_SEPARATOR)?;
        Some(Statement::Declaration {
            command: command.trim(),
            arguments: arguments.split_whitespace().collect(),
        })
    } else if is_connectivity(line) {
        Some(Statement::Connectivity {
            operands: line.split(ARROW).map(str::trim).collect(),
        })
    } else {
        None
    }
}

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

//! Parser error types and handling

use super::Position;
use crate::model::ModelError;
use std::fmt;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Main error type for parsing operations
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ParseErrorKind,
    /// Position where the error occurred
    pub position: Position,
    /// Human-readable error message
    pub message: String,
    /// Source line the error was raised on
    pub source_line: Option<String>,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(kind: ParseErrorKind, position: Position, message: String) -> Self {
        Self {
            kind,
            position,
            message,
            source_line: None,
        }
    }

    /// Attach the offending source line
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }

    /// Wrap a model error raised while handling a statement
    pub fn from_model(error: ModelError, position: Position) -> Self {
        let kind = match &error {
            ModelError::AmbiguousElement(_) => ParseErrorKind::AmbiguousElement,
            ModelError::CannotAssignElement(_) => ParseErrorKind::CannotAssignElement,
            ModelError::ImpossibleConnection { .. } | ModelError::ImpossibleModulation { .. } => ParseErrorKind::ImpossibleConnection,
            ModelError::UndeclaredModulatedConnection { .. } => ParseErrorKind::UndeclaredModulatedConnection,
        };
        Self::new(kind, position, error.to_string())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{} at line {}, column {}: {}", self.kind.description(), self.position.line, self.position.column, self.message)
    }

    /// Get detailed error information for debugging
    pub fn debug_message(&self) -> String {
        let mut msg = format!("[{}] {}", self.kind.code(), self.user_message());
        if let Some(line) = &self.source_line {
            msg.push_str(&format!("\n  | {}", line));
        }
        msg
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Categories of parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line is neither a declaration nor a connectivity statement
    #[error("Uninterpretable statement")]
    UninterpretableStatement,

    /// Declaration command other than `te`, `vois` or `inputs`
    #[error("Unknown definition")]
    UnknownDefinition,

    /// `te` value is not a number
    #[error("Invalid echo time")]
    InvalidEchoTime,

    /// Name declared both as a VOI and an input
    #[error("Ambiguous element")]
    AmbiguousElement,

    /// Name not declared (yet) as a VOI or an input
    #[error("Cannot assign element")]
    CannotAssignElement,

    /// Operand natures match no matrix rule
    #[error("Impossible connection")]
    ImpossibleConnection,

    /// Modulated edge without a matching direct edge (strict mode only)
    #[error("Undeclared modulated connection")]
    UndeclaredModulatedConnection,
}

impl ParseErrorKind {
    /// Get a short error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UninterpretableStatement => "E001",
            ParseErrorKind::UnknownDefinition => "E002",
            ParseErrorKind::InvalidEchoTime => "E003",
            ParseErrorKind::AmbiguousElement => "E004",
            ParseErrorKind::CannotAssignElement => "E005",
            ParseErrorKind::ImpossibleConnection => "E006",
            ParseErrorKind::UndeclaredModulatedConnection => "E007",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ParseErrorKind::UninterpretableStatement => "Uninterpretable statement",
            ParseErrorKind::UnknownDefinition => "Unknown definition parameter",
            ParseErrorKind::InvalidEchoTime => "Invalid echo time",
            ParseErrorKind::AmbiguousElement => "Ambiguous element",
            ParseErrorKind::CannotAssignElement => "Cannot assign element",
            ParseErrorKind::ImpossibleConnection => "Impossible connection",
            ParseErrorKind::UndeclaredModulatedConnection => "Undeclared modulated connection",
        }
    }
}

/// Helper functions for creating common errors
impl ParseError {
    /// Create an uninterpretable statement error
    pub fn uninterpretable(position: Position, line: &str) -> Self {
        Self::new(ParseErrorKind::UninterpretableStatement, position, format!("'{}' is neither a definition nor a connectivity statement", line))
    }

    /// Create an unknown definition error
    pub fn unknown_definition(position: Position, command: &str) -> Self {
        Self::new(ParseErrorKind::UnknownDefinition, position, format!("Unknown definition parameter '{}'", command))
    }

    /// Create an invalid echo time error
    pub fn invalid_echo_time(position: Position, value: &str) -> Self {
        Self::new(ParseErrorKind::InvalidEchoTime, position, format!("'{}' is not a valid echo time", value))
    }
}

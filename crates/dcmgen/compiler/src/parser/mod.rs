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

//! Parser for DCM model description files
//!
//! A model description is read line by line in a single pass:
//!
//! - **Comments**: everything after `#` is dropped, blank lines are skipped
//! - **Declarations**: `te: <seconds>`, `vois: <names>`, `inputs: <names>`
//! - **Connectivity**: `X -> Y` (direct) or `M -> X -> Y` (modulatory)
//!
//! Declarations must precede the statements that use them: names are resolved
//! against the lists as they stand on the line where they are used.
//!
//! # Example Usage
//!
//! ```rust
//! use dcmgen_compiler::parser::ModelParser;
//!
//! let source = "vois: V1 V2\ninputs: Stim\nStim -> V1\nV1 -> V2\n";
//! let model = ModelParser::new().parse("example", source).unwrap();
//! assert_eq!(model.connections.len(), 2);
//! ```

pub mod common;
pub mod declaration;
pub mod resolver;
pub mod statement;

pub use common::{ParseError, ParseErrorKind, ParseResult, ParserConfig, Position};
pub use declaration::{Definition, DefinitionCommand};
pub use resolver::ElementResolver;
pub use statement::{Statement, classify, strip_comment};

use crate::model::{Connectivity, Model, ModelError};
use statement::ARROW;
use std::path::Path;
use tracing::{debug, trace};

/// Single-pass parser turning model descriptions into [`Model`]s
#[derive(Debug, Clone, Default)]
pub struct ModelParser {
    config: ParserConfig,
}

impl ModelParser {
    /// Create a parser with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete model description
    ///
    /// Stops at the first error.
    pub fn parse(&self, name: &str, source: &str) -> ParseResult<Model> {
        let mut model = Model::new(name);
        model.te = self.config.default_te;

        for (number, raw) in source.lines().enumerate() {
            let line_number = number + 1;
            let Some(content) = strip_comment(raw) else {
                continue;
            };
            trace!(line = line_number, statement = %content, "parsing statement");
            self.parse_statement(&mut model, line_number, raw, &content)
                .map_err(|err| err.with_source_line(raw.trim()))?;
        }

        debug!(
            model = %model.name,
            vois = model.vois.len(),
            inputs = model.inputs.len(),
            connections = model.connections.len(),
            "parsed model description"
        );
        Ok(model)
    }

    fn parse_statement(&self, model: &mut Model, line_number: usize, raw: &str, content: &str) -> ParseResult<()> {
        let start = statement_start(line_number, raw);

        match classify(content) {
            Some(Statement::Declaration { command, arguments }) => Definition::parse(command, arguments, start)?.apply(model, start),
            Some(Statement::Connectivity { operands }) => {
                let connection = self.parse_connectivity(model, &operands, line_number, raw)?;
                debug!(line = line_number, matrix = %connection.matrix(), edge = %connection, "connection");
                model.add_connection(connection);
                Ok(())
            }
            None => Err(ParseError::uninterpretable(start, content)),
        }
    }

    /// Resolve and classify the operands of a connectivity statement
    ///
    /// With two operands the statement is `frm -> to`. With three, the first
    /// operand modulates the `frm -> to` edge formed by the other two.
    pub fn parse_connectivity(&self, model: &Model, operands: &[&str], line_number: usize, raw: &str) -> ParseResult<Connectivity> {
        let resolver = ElementResolver::new(&model.vois, &model.inputs);
        let positions = operand_positions(line_number, raw);
        let at = |i: usize| positions.get(i).copied().unwrap_or_else(|| statement_start(line_number, raw));

        let mut elements = Vec::with_capacity(operands.len());
        for (i, &operand) in operands.iter().enumerate() {
            elements.push(resolver.resolve(operand).map_err(|err| ParseError::from_model(err, at(i)))?);
        }

        let start = statement_start(line_number, raw);
        match <[_; 2]>::try_from(elements) {
            Ok([frm, to]) => Connectivity::direct(frm, to).map_err(|err| ParseError::from_model(err, start)),
            Err(elements) => {
                let Ok([modulator, frm, to]) = <[_; 3]>::try_from(elements) else {
                    return Err(ParseError::uninterpretable(start, raw.trim()));
                };
                let connection = Connectivity::modulated(modulator, frm, to).map_err(|err| ParseError::from_model(err, start))?;
                if self.config.require_modulated_edges && !model.has_direct_connection(connection.frm().name(), connection.to().name()) {
                    let err = ModelError::UndeclaredModulatedConnection {
                        frm: connection.frm().name().to_string(),
                        to: connection.to().name().to_string(),
                    };
                    return Err(ParseError::from_model(err, start));
                }
                Ok(connection)
            }
        }
    }
}

/// Position of the first non-blank character of a line
fn statement_start(line_number: usize, raw: &str) -> Position {
    Position::new(line_number, raw.chars().take_while(|c| c.is_whitespace()).count() + 1)
}

/// Position of the first character of each `->` separated operand
fn operand_positions(line_number: usize, raw: &str) -> Vec<Position> {
    let mut offset = 0;
    raw.split(ARROW)
        .map(|segment| {
            let lead = segment.len() - segment.trim_start().len();
            let position = Position::at_offset(line_number, raw, offset + lead);
            offset += segment.len() + ARROW.len();
            position
        })
        .collect()
}

/// Model name derived from a description file path (file name without extension)
pub fn model_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| crate::model::DEFAULT_MODEL_NAME.to_string())
}

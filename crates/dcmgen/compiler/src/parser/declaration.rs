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

//! Declaration handling (`te`, `vois`, `inputs`)

use super::common::{ParseError, ParseResult, Position};
use crate::model::Model;
use std::fmt;
use tracing::{debug, warn};

/// Declaration commands understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionCommand {
    /// Scanner echo time
    Te,
    /// Ordered VOI names
    Vois,
    /// Ordered input (condition) names
    Inputs,
}

impl DefinitionCommand {
    /// Look up a command, ignoring case
    pub fn lookup(command: &str) -> Option<Self> {
        match command.to_ascii_lowercase().as_str() {
            "te" => Some(DefinitionCommand::Te),
            "vois" => Some(DefinitionCommand::Vois),
            "inputs" => Some(DefinitionCommand::Inputs),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DefinitionCommand::Te => "te",
            DefinitionCommand::Vois => "vois",
            DefinitionCommand::Inputs => "inputs",
        }
    }
}

impl fmt::Display for DefinitionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed declaration statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition<'a> {
    pub command: DefinitionCommand,
    pub arguments: Vec<&'a str>,
}

impl<'a> Definition<'a> {
    /// Build a definition from a classified declaration
    pub fn parse(command: &str, arguments: Vec<&'a str>, position: Position) -> ParseResult<Self> {
        let command = DefinitionCommand::lookup(command).ok_or_else(|| ParseError::unknown_definition(position, command))?;
        Ok(Self { command, arguments })
    }

    /// Apply this definition to the model being built
    ///
    /// `vois` and `inputs` replace the current lists wholesale.
    pub fn apply(&self, model: &mut Model, position: Position) -> ParseResult<()> {
        match self.command {
            DefinitionCommand::Te => {
                let value = self.arguments.first().copied().unwrap_or_default();
                model.te = parse_echo_time(value).ok_or_else(|| ParseError::invalid_echo_time(position, value))?;
                if self.arguments.len() > 1 {
                    warn!(line = position.line, ignored = ?&self.arguments[1..], "te takes a single value, extra arguments ignored");
                }
                debug!(te = model.te, "echo time set");
            }
            DefinitionCommand::Vois => {
                model.vois = self.arguments.iter().map(|s| s.to_string()).collect();
                debug!(vois = ?model.vois, "VOIs declared");
            }
            DefinitionCommand::Inputs => {
                model.inputs = self.arguments.iter().map(|s| s.to_string()).collect();
                debug!(inputs = ?model.inputs, "inputs declared");
            }
        }
        Ok(())
    }
}

/// Parse a positive, finite echo time in seconds
fn parse_echo_time(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|te| te.is_finite() && *te > 0.0)
}

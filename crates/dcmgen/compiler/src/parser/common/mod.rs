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

//! Common parsing utilities and types

pub mod error;
pub mod position;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use position::Position;

use crate::model::DEFAULT_TE;

/// Configuration for the model parser
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Require the `frm -> to` edge of a three-operand statement to be declared first
    pub require_modulated_edges: bool,
    /// Echo time used when the source has no `te` declaration
    pub default_te: f64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            require_modulated_edges: false,
            default_te: DEFAULT_TE,
        }
    }
}

impl ParserConfig {
    /// Create a new parser configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the declared-edge check for modulatory statements
    pub fn with_required_modulated_edges(mut self, require: bool) -> Self {
        self.require_modulated_edges = require;
        self
    }

    /// Set the fallback echo time
    pub fn with_default_te(mut self, te: f64) -> Self {
        self.default_te = te;
        self
    }
}

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

//! Error types for script generation

use thiserror::Error;

/// Errors that can occur during script generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Not enough inputs in model {model}: at least one input must drive or modulate a connection")]
    InsufficientInputs { model: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type for script generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

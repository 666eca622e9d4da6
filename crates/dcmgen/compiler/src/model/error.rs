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

//! Error types for element resolution and connection classification

use super::element::Element;
use thiserror::Error;

/// Errors raised while building model elements and connections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Ambiguous element '{0}': declared both as a VOI and as an input")]
    AmbiguousElement(String),

    #[error("Cannot assign element '{0}': not declared as a VOI or an input before this statement")]
    CannotAssignElement(String),

    #[error("Impossible connection from {frm} to {to}")]
    ImpossibleConnection { frm: Element, to: Element },

    #[error("Impossible connection from {frm} to {to} modulated by {modulator}")]
    ImpossibleModulation { frm: Element, to: Element, modulator: Element },

    #[error("Modulated connection {frm} -> {to} has not been declared")]
    UndeclaredModulatedConnection { frm: String, to: String },
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

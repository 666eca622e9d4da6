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

//! Element resolution against the current declarations
//!
//! Names are resolved as soon as the statement using them is read, so a name
//! must be declared on an earlier line than any statement referring to it.

use crate::model::{Element, ModelError, ModelResult, Nature};

/// Resolves bare names against declared VOI and input lists
#[derive(Debug, Clone, Copy)]
pub struct ElementResolver<'a> {
    vois: &'a [String],
    inputs: &'a [String],
}

impl<'a> ElementResolver<'a> {
    pub fn new(vois: &'a [String], inputs: &'a [String]) -> Self {
        Self { vois, inputs }
    }

    /// Resolve a name into a typed, 1-based indexed element
    pub fn resolve(&self, name: &str) -> ModelResult<Element> {
        match (position_of(self.vois, name), position_of(self.inputs, name)) {
            (Some(index), None) => Ok(Element::new(name, Nature::Voi, index)),
            (None, Some(index)) => Ok(Element::new(name, Nature::Input, index)),
            (Some(_), Some(_)) => Err(ModelError::AmbiguousElement(name.to_string())),
            (None, None) => Err(ModelError::CannotAssignElement(name.to_string())),
        }
    }
}

/// 1-based position of the first occurrence of `name`
fn position_of(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|candidate| candidate == name).map(|i| i + 1)
}

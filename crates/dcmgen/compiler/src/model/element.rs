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

//! Typed model elements (VOIs and inputs)

use std::fmt;

/// The two kinds of node a connectivity model can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nature {
    /// A region of interest whose time series is extracted from the scan
    Voi,
    /// An experimental condition from the subject's task model
    Input,
}

impl Nature {
    /// Name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Nature::Voi => "VOI",
            Nature::Input => "Input",
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved, indexed model element
///
/// Identity is the full `(name, nature, index)` triple. The index is 1-based
/// and reflects the element's rank in the declaration list of its nature at
/// the time it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    name: String,
    nature: Nature,
    index: usize,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>, nature: Nature, index: usize) -> Self {
        debug_assert!(index > 0, "element indices are 1-based");
        Self { name: name.into(), nature, index }
    }

    /// Create a VOI element
    pub fn voi(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, Nature::Voi, index)
    }

    /// Create an input element
    pub fn input(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, Nature::Input, index)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nature(&self) -> Nature {
        self.nature
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_voi(&self) -> bool {
        self.nature == Nature::Voi
    }

    pub fn is_input(&self) -> bool {
        self.nature == Nature::Input
    }

    /// Same element carrying a different index
    pub fn with_index(&self, index: usize) -> Self {
        Self::new(self.name.clone(), self.nature, index)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<{},{}>", self.name, self.nature, self.index)
    }
}

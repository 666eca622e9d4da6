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

//! Connectivity model aggregate
//!
//! A [`Model`] is accumulated statement by statement by the parser and then
//! finalized once with [`Model::check`], which yields an immutable
//! [`ValidatedModel`] ready for code generation.

pub mod connectivity;
pub mod element;
pub mod error;
pub mod validation;

pub use connectivity::{Connectivity, Matrix};
pub use element::{Element, Nature};
pub use error::{ModelError, ModelResult};
pub use validation::{UsedInput, ValidatedModel};

use std::collections::HashSet;

/// Default scanner echo time, in seconds
pub const DEFAULT_TE: f64 = 0.021;

/// Default model name when none can be derived from the source
pub const DEFAULT_MODEL_NAME: &str = "Model1";

/// A connectivity model as written in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Model name, used for the generated `DCM_<name>.mat` file
    pub name: String,
    /// Declared VOI names; the order fixes VOI indices
    pub vois: Vec<String>,
    /// Declared input names; the order fixes the initial input indices
    pub inputs: Vec<String>,
    /// Scanner echo time in seconds
    pub te: f64,
    /// Connections in source order
    pub connections: Vec<Connectivity>,
}

impl Model {
    /// Create an empty model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vois: Vec::new(),
            inputs: Vec::new(),
            te: DEFAULT_TE,
            connections: Vec::new(),
        }
    }

    /// Append a connection
    pub fn add_connection(&mut self, connection: Connectivity) {
        self.connections.push(connection);
    }

    /// Input elements referenced by any connection
    ///
    /// Duplicates (by identity) are removed and the result is sorted by the
    /// index the inputs were resolved with.
    pub fn inputs_used(&self) -> Vec<Element> {
        let mut seen = HashSet::new();
        let mut used: Vec<Element> = self
            .connections
            .iter()
            .flat_map(|connection| connection.elements())
            .filter(|element| element.is_input())
            .filter(|element| seen.insert((*element).clone()))
            .cloned()
            .collect();
        used.sort_by_key(Element::index);
        used
    }

    /// Whether any connection belongs to the nonlinear `D` matrix
    pub fn is_nonlinear(&self) -> bool {
        self.connections.iter().any(|c| c.matrix() == Matrix::D)
    }

    /// Whether a direct `frm -> to` edge has been declared
    pub fn has_direct_connection(&self, frm: &str, to: &str) -> bool {
        self.connections.iter().any(|c| !c.is_modulatory() && c.links(frm, to))
    }

    /// Finalize the model
    ///
    /// Input indices are renumbered from their position in the declared input
    /// list to their rank among the inputs actually used, since the generated
    /// input time series and matrix dimensions are sized by usage.
    pub fn check(self) -> ValidatedModel {
        validation::validate(self)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Model {
        let mut model = Model::new("sample");
        model.vois = vec!["V1".into(), "V2".into()];
        model.inputs = vec!["I1".into(), "I2".into(), "I3".into()];
        model.add_connection(Connectivity::direct(Element::input("I3", 3), Element::voi("V1", 1)).unwrap());
        model.add_connection(Connectivity::direct(Element::voi("V1", 1), Element::voi("V2", 2)).unwrap());
        model.add_connection(Connectivity::modulated(Element::input("I2", 2), Element::voi("V1", 1), Element::voi("V2", 2)).unwrap());
        model.add_connection(Connectivity::direct(Element::input("I3", 3), Element::voi("V2", 2)).unwrap());
        model
    }

    #[test]
    fn test_default_model() {
        let model = Model::default();
        assert_eq!(model.name, DEFAULT_MODEL_NAME);
        assert_eq!(model.te, DEFAULT_TE);
        assert!(model.connections.is_empty());
    }

    #[test]
    fn test_inputs_used_is_deduplicated_and_sorted() {
        let used = sample_model().inputs_used();
        assert_eq!(used, vec![Element::input("I2", 2), Element::input("I3", 3)]);
    }

    #[test]
    fn test_inputs_used_empty_without_inputs() {
        let mut model = Model::new("vois-only");
        model.add_connection(Connectivity::direct(Element::voi("V1", 1), Element::voi("V2", 2)).unwrap());
        assert!(model.inputs_used().is_empty());
    }

    #[test]
    fn test_is_nonlinear() {
        let mut model = sample_model();
        assert!(!model.is_nonlinear());

        model.add_connection(Connectivity::modulated(Element::voi("V2", 2), Element::voi("V1", 1), Element::voi("V2", 2)).unwrap());
        assert!(model.is_nonlinear());
    }

    #[test]
    fn test_has_direct_connection() {
        let model = sample_model();
        assert!(model.has_direct_connection("V1", "V2"));
        assert!(!model.has_direct_connection("V2", "V1"));
    }
}

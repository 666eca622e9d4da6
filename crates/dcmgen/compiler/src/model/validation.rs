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

//! Model validation and input renumbering

use super::{Connectivity, Element, Matrix, Model};
use std::collections::HashMap;
use tracing::debug;

/// An input referenced by at least one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedInput {
    /// Source name of the input
    pub name: String,
    /// 1-based position in the declared input list (the task condition number)
    pub declared_index: usize,
    /// 1-based rank among the used inputs
    pub index: usize,
}

/// A finalized, read-only model
///
/// Every input element inside [`ValidatedModel::connections`] carries its
/// rank among [`ValidatedModel::used_inputs`], so the input indices form a
/// dense `1..=K` sequence in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedModel {
    name: String,
    vois: Vec<String>,
    inputs: Vec<String>,
    te: f64,
    connections: Vec<Connectivity>,
    used_inputs: Vec<UsedInput>,
}

impl ValidatedModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vois(&self) -> &[String] {
        &self.vois
    }

    /// Declared input names, including unused ones
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn te(&self) -> f64 {
        self.te
    }

    pub fn connections(&self) -> &[Connectivity] {
        &self.connections
    }

    /// Inputs actually referenced, ordered by declaration
    pub fn used_inputs(&self) -> &[UsedInput] {
        &self.used_inputs
    }

    /// Renumbered input elements, ordered by declaration
    pub fn inputs_used(&self) -> Vec<Element> {
        self.used_inputs.iter().map(|input| Element::input(input.name.clone(), input.index)).collect()
    }

    /// Number of VOIs (N)
    pub fn voi_count(&self) -> usize {
        self.vois.len()
    }

    /// Number of used inputs (K)
    pub fn input_count(&self) -> usize {
        self.used_inputs.len()
    }

    pub fn is_nonlinear(&self) -> bool {
        self.connections.iter().any(|c| c.matrix() == Matrix::D)
    }

    /// Connections belonging to one matrix, in source order
    pub fn connections_in(&self, matrix: Matrix) -> impl Iterator<Item = &Connectivity> {
        self.connections.iter().filter(move |c| c.matrix() == matrix)
    }
}

/// Build the validated form of a model
pub(super) fn validate(model: Model) -> ValidatedModel {
    let used = model.inputs_used();
    let ranks: HashMap<Element, usize> = used.iter().enumerate().map(|(rank, element)| (element.clone(), rank + 1)).collect();

    let connections = model
        .connections
        .iter()
        .map(|connection| connection.map_inputs(|element| element.with_index(ranks[element])))
        .collect();

    let used_inputs: Vec<UsedInput> = used
        .iter()
        .map(|element| UsedInput {
            name: element.name().to_string(),
            declared_index: element.index(),
            index: ranks[element],
        })
        .collect();

    debug!(model = %model.name, vois = model.vois.len(), inputs_used = used_inputs.len(), connections = model.connections.len(), "validated model");

    ValidatedModel {
        name: model.name,
        vois: model.vois,
        inputs: model.inputs,
        te: model.te,
        connections,
        used_inputs,
    }
}

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

//! Connectivity edges and their DCM matrix classification
//!
//! A bilinear/nonlinear DCM is described by four matrices:
//!
//! - `A`: intrinsic coupling between regions (`V -> V`)
//! - `B`: input-gated modulation of an intrinsic edge (`I -> V -> V`)
//! - `C`: driving inputs into regions (`I -> V`)
//! - `D`: region-gated modulation of an intrinsic edge (`V -> V -> V`)
//!
//! The category of an edge is a pure function of the natures of its operands.

use super::element::{Element, Nature};
use super::error::{ModelError, ModelResult};
use std::fmt;

/// The DCM matrix an edge belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Matrix {
    A,
    B,
    C,
    D,
}

impl Matrix {
    /// All matrices in emission order
    pub const ALL: [Matrix; 4] = [Matrix::A, Matrix::B, Matrix::C, Matrix::D];

    /// Field name of the matrix inside the `DCM` struct
    pub fn field(&self) -> &'static str {
        match self {
            Matrix::A => "a",
            Matrix::B => "b",
            Matrix::C => "c",
            Matrix::D => "d",
        }
    }

    /// Classify an edge from the natures of its operands
    ///
    /// Returns `None` when no rule of the table matches.
    pub fn classify(frm: Nature, to: Nature, modulator: Option<Nature>) -> Option<Matrix> {
        match (frm, to, modulator) {
            (Nature::Voi, Nature::Voi, None) => Some(Matrix::A),
            (Nature::Input, Nature::Voi, None) => Some(Matrix::C),
            (Nature::Voi, Nature::Voi, Some(Nature::Voi)) => Some(Matrix::D),
            (Nature::Voi, Nature::Voi, Some(Nature::Input)) => Some(Matrix::B),
            _ => None,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// A directed edge between model elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    frm: Element,
    to: Element,
    modulator: Option<Element>,
    matrix: Matrix,
}

impl Connectivity {
    /// Create a direct (two-operand) connection `frm -> to`
    pub fn direct(frm: Element, to: Element) -> ModelResult<Self> {
        match Matrix::classify(frm.nature(), to.nature(), None) {
            Some(matrix) => Ok(Self { frm, to, modulator: None, matrix }),
            None => Err(ModelError::ImpossibleConnection { frm, to }),
        }
    }

    /// Create a modulatory (three-operand) connection `modulator -> frm -> to`
    pub fn modulated(modulator: Element, frm: Element, to: Element) -> ModelResult<Self> {
        match Matrix::classify(frm.nature(), to.nature(), Some(modulator.nature())) {
            Some(matrix) => Ok(Self {
                frm,
                to,
                modulator: Some(modulator),
                matrix,
            }),
            None => Err(ModelError::ImpossibleModulation { frm, to, modulator }),
        }
    }

    pub fn frm(&self) -> &Element {
        &self.frm
    }

    pub fn to(&self) -> &Element {
        &self.to
    }

    pub fn modulator(&self) -> Option<&Element> {
        self.modulator.as_ref()
    }

    pub fn matrix(&self) -> Matrix {
        self.matrix
    }

    pub fn is_modulatory(&self) -> bool {
        self.modulator.is_some()
    }

    /// Elements referenced by this edge, `frm`, `to`, then the modulator
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        [&self.frm, &self.to].into_iter().chain(self.modulator.as_ref())
    }

    /// Whether this edge connects the same endpoints, by name
    pub fn links(&self, frm: &str, to: &str) -> bool {
        self.frm.name() == frm && self.to.name() == to
    }

    /// Copy of this edge with every input element passed through `renumber`
    ///
    /// The matrix category is unaffected since natures never change.
    pub(crate) fn map_inputs(&self, mut renumber: impl FnMut(&Element) -> Element) -> Self {
        let mut map = |element: &Element| if element.is_input() { renumber(element) } else { element.clone() };
        Self {
            frm: map(&self.frm),
            to: map(&self.to),
            modulator: self.modulator.as_ref().map(&mut map),
            matrix: self.matrix,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.modulator {
            Some(modulator) => write!(f, "{} -> {} -> {}", modulator.name(), self.frm.name(), self.to.name()),
            None => write!(f, "{} -> {}", self.frm.name(), self.to.name()),
        }
    }
}

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

//! DCM model-description compiler
//!
//! Compiles the small connectivity DSL used to describe dynamic causal models
//! into SPM/MATLAB specification and estimation scripts.
//!
//! The pipeline is strictly sequential:
//!
//! 1. [`parser::ModelParser`] folds the description line by line into a [`model::Model`]
//! 2. [`model::Model::check`] renumbers the used inputs and yields a [`model::ValidatedModel`]
//! 3. [`codegen::MatlabGenerator`] emits one block per subject
//!
//! ```rust
//! use dcmgen_compiler::{codegen::MatlabGenerator, parser::ModelParser};
//!
//! let source = "vois: V1 V2\ninputs: Stim\nStim -> V1\nV1 -> V2\n";
//! let model = ModelParser::new().parse("forward", source).unwrap().check();
//! let script = MatlabGenerator::new().generate(&model, &["subj01"]).unwrap();
//! assert!(script.render().contains("DCM.a(2,1) = 1;"));
//! ```

pub mod codegen;
pub mod model;
pub mod parser;

pub use codegen::{GeneratedScript, GenerationConfig, GenerationError, MatlabGenerator};
pub use model::{Connectivity, Element, Matrix, Model, Nature, ValidatedModel};
pub use parser::{ModelParser, ParseError, ParseErrorKind, ParserConfig};

/// Parse, validate and generate in one step
///
/// Fails on the first parse or generation error; nothing is produced for any
/// subject in that case.
pub fn compile<S: AsRef<str>>(name: &str, source: &str, subjects: &[S], parser: &ModelParser, generator: &MatlabGenerator) -> Result<GeneratedScript, CompileError> {
    let model = parser.parse(name, source)?.check();
    Ok(generator.generate(&model, subjects)?)
}

/// Any failure of [`compile`]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

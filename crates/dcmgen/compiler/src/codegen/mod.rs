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

//! Code generation module
//!
//! Turns a [`ValidatedModel`](crate::model::ValidatedModel) into SPM/MATLAB
//! code, one block per subject:
//!
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `writer`: Line-oriented MATLAB writing utilities
//! - `matlab_generator`: The per-subject script generator

pub mod config;
pub mod error;
pub mod matlab_generator;
pub mod writer;

// Re-export main types
pub use config::{DcmOptions, GenerationConfig};
pub use error::{GenerationError, GenerationResult};
pub use matlab_generator::{GeneratedScript, MatlabGenerator, SubjectScript};
pub use writer::ScriptWriter;

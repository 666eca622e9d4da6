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

//! SPM/MATLAB script generator
//!
//! Renders one self-contained block per subject that loads the subject's
//! `SPM.mat` and VOI time series, fills in the `DCM` struct for the model
//! and estimates it with `spm_dcm_estimate`.

use super::config::GenerationConfig;
use super::error::{GenerationError, GenerationResult};
use super::writer::{ScriptWriter, fullfile, quote};
use crate::model::{Connectivity, Matrix, ValidatedModel};
use std::fmt;
use tracing::debug;

/// The generated block for one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectScript {
    /// Subject folder name
    pub subject: String,
    /// MATLAB code, ending with a newline
    pub code: String,
}

/// Generated code for a sequence of subjects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Blocks in subject order
    pub blocks: Vec<SubjectScript>,
}

impl GeneratedScript {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenate the blocks, separated by a single blank line
    pub fn render(&self) -> String {
        self.blocks.iter().map(|block| block.code.as_str()).collect::<Vec<_>>().join("\n")
    }
}

impl fmt::Display for GeneratedScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Generates SPM DCM specification scripts from validated models
#[derive(Debug, Clone, Default)]
pub struct MatlabGenerator {
    config: GenerationConfig,
}

impl MatlabGenerator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with a custom configuration
    pub fn with_config(config: GenerationConfig) -> GenerationResult<Self> {
        config.validate().map_err(GenerationError::ConfigurationError)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate one block per subject, in the given order
    ///
    /// The model is checked once, even when `subjects` is empty.
    pub fn generate<S: AsRef<str>>(&self, model: &ValidatedModel, subjects: &[S]) -> GenerationResult<GeneratedScript> {
        ensure_inputs(model)?;
        let blocks = subjects
            .iter()
            .map(|subject| {
                let subject = subject.as_ref();
                SubjectScript {
                    subject: subject.to_string(),
                    code: self.render_subject(model, subject),
                }
            })
            .collect();
        Ok(GeneratedScript { blocks })
    }

    /// Generate the block for a single subject
    pub fn generate_subject(&self, model: &ValidatedModel, subject: &str) -> GenerationResult<String> {
        ensure_inputs(model)?;
        Ok(self.render_subject(model, subject))
    }

    fn render_subject(&self, model: &ValidatedModel, subject: &str) -> String {
        let mut out = ScriptWriter::new();
        self.write_header(&mut out, model, subject);
        self.write_vois(&mut out, model, subject);
        self.write_inputs(&mut out, model);
        self.write_matrices(&mut out, model);
        self.write_options(&mut out, model);
        self.write_estimation(&mut out, model, subject);

        debug!(model = model.name(), subject, lines = out.line_count(), "generated subject script");
        out.into_string()
    }

    fn subject_file(&self, subject: &str, file: &str) -> String {
        fullfile(&[self.config.base_dir.as_str(), subject, self.config.dcm_folder.as_str(), file])
    }

    fn write_header(&self, out: &mut ScriptWriter, model: &ValidatedModel, subject: &str) {
        out.rule();
        out.line(format!("% DCM Model ({}) for Subject {}", model.name(), subject));
        out.rule();
        out.blank();
        out.line("clear DCM;");
        out.line(format!("load({});", self.subject_file(subject, "SPM.mat")));
    }

    fn write_vois(&self, out: &mut ScriptWriter, model: &ValidatedModel, subject: &str) {
        out.blank();
        out.section("The VOIs");
        for (i, voi) in model.vois().iter().enumerate() {
            out.line(format!("load({}, 'xY');", self.subject_file(subject, &format!("VOI_{}_1.mat", voi))));
            out.line(format!("DCM.xY({}) = xY;", i + 1));
            out.blank();
        }

        out.line("DCM.n = length(DCM.xY); % Num of regions");
        out.line("DCM.v = length(DCM.xY(1).u); % Num of time points");
        out.line("DCM.Y.dt  = SPM.xY.RT;");
        out.line("DCM.Y.X0  = DCM.xY(1).X0;");
        out.line("for i = 1:DCM.n");
        out.line("    DCM.Y.y(:,i)  = DCM.xY(i).u;");
        out.line("    DCM.Y.name{i} = DCM.xY(i).name;");
        out.line("end");
        out.blank();
        out.line("DCM.Y.Q    = spm_Ce(ones(1,DCM.n)*DCM.v);");
    }

    /// Input names and time series, addressed by their condition number in `SPM.Sess.U`
    fn write_inputs(&self, out: &mut ScriptWriter, model: &ValidatedModel) {
        let conditions: Vec<usize> = model.used_inputs().iter().map(|input| input.declared_index).collect();
        let onset = self.config.microtime_onset;

        out.line("DCM.U.dt   = SPM.Sess.U(1).dt;");
        let names: Vec<String> = conditions.iter().map(|k| format!("SPM.Sess.U({}).name", k)).collect();
        out.bracketed_list("DCM.U.name", &names);

        out.blank();
        out.section("The Inputs");
        out.blank();
        let series: Vec<String> = conditions.iter().map(|k| format!("SPM.Sess.U({}).u({}:end,1)", k, onset)).collect();
        out.bracketed_list("DCM.U.u   ", &series);
    }

    fn write_matrices(&self, out: &mut ScriptWriter, model: &ValidatedModel) {
        let n = model.voi_count();
        let k = model.input_count();

        out.blank();
        out.section("The Matrices");
        for matrix in Matrix::ALL {
            out.blank();
            let init = match matrix {
                Matrix::A => format!("eye({},{})", n, n),
                Matrix::B => format!("zeros({},{},{})", n, n, k),
                Matrix::C => format!("zeros({},{})", n, k),
                Matrix::D => format!("zeros({},{},{})", n, n, n),
            };
            out.line(format!("DCM.{} = {};", matrix.field(), init));
            for connection in model.connections_in(matrix) {
                out.commented(assignment(connection), connection.to_string());
            }
        }
    }

    fn write_options(&self, out: &mut ScriptWriter, model: &ValidatedModel) {
        let options = &self.config.options;
        let flag = |on: bool| if on { 1 } else { 0 };

        out.blank();
        out.section("Delays, TE and options");
        out.blank();
        out.line(format!("DCM.delays = repmat(SPM.xY.RT,{},1);", model.voi_count()));
        out.line(format!("DCM.TE     = {:.3};", model.te()));
        out.line(format!("DCM.options.nonlinear  = {};", flag(model.is_nonlinear())));
        out.line(format!("DCM.options.two_state  = {};", flag(options.two_state)));
        out.line(format!("DCM.options.stochastic = {};", flag(options.stochastic)));
        out.line(format!("DCM.options.centre     = {};", flag(options.centre)));
        out.line(format!("DCM.options.nograph    = {};", flag(options.nograph)));
    }

    fn write_estimation(&self, out: &mut ScriptWriter, model: &ValidatedModel, subject: &str) {
        let dcm_file = self.subject_file(subject, &format!("DCM_{}.mat", model.name()));

        out.blank();
        out.section("Saving and estimating");
        out.blank();
        out.line(format!("save({});", dcm_file));
        out.line(format!("disp({});", quote(&format!("Estimating model {} for subject {}", model.name(), subject))));
        out.line(format!("spm_dcm_estimate({});", dcm_file));
    }
}

/// `DCM.U` needs at least one condition
fn ensure_inputs(model: &ValidatedModel) -> GenerationResult<()> {
    if model.used_inputs().is_empty() {
        return Err(GenerationError::InsufficientInputs { model: model.name().to_string() });
    }
    Ok(())
}

/// `DCM.<m>(to,frm[,mod]) = 1;`
fn assignment(connection: &Connectivity) -> String {
    let matrix = connection.matrix().field();
    let (to, frm) = (connection.to().index(), connection.frm().index());
    match connection.modulator() {
        Some(modulator) => format!("DCM.{}({},{},{}) = 1;", matrix, to, frm, modulator.index()),
        None => format!("DCM.{}({},{}) = 1;", matrix, to, frm),
    }
}

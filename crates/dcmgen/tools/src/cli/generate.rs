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

//! Model file to MATLAB script pipeline
//!
//! Reads one model description, compiles it once and writes one DCM
//! specification block per subject to stdout or to an output file.

use crate::config::ToolConfig;
use clap::Parser;
use dcmgen_compiler::{GenerationError, MatlabGenerator, ModelParser, ParseError, parser::model_name_from_path};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const MODEL_FORMAT_HELP: &str = "\
MODEL FILE FORMAT:
    One statement per line. Text after '#' is ignored ('\\#' keeps a literal '#').

    Definitions (the keyword is case-insensitive):
        vois: V1 V2 V3        regions, numbered in the order given
        inputs: Stim Attn     experimental inputs, numbered in the order given
        te: 0.04              echo time in seconds (default 0.021)

    Connections (elements must be defined on an earlier line):
        Stim -> V1            driving input          (matrix C)
        V1 -> V2              intrinsic connection   (matrix A)
        Attn -> V1 -> V2      input modulation       (matrix B)
        V3 -> V1 -> V2        nonlinear modulation   (matrix D)

    Each subject block loads <base-dir>/<subject>/<output_dir>/SPM.mat and the
    VOI_<name>_1.mat files next to it, and saves DCM_<model>.mat there.";

/// CLI arguments for script generation
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dcm-generate-models")]
#[command(about = "Generate SPM DCM specification scripts from a model description")]
#[command(version)]
#[command(after_long_help = MODEL_FORMAT_HELP)]
pub struct GenerateArgs {
    /// Model description file
    pub model_file: Option<PathBuf>,

    /// Folder inside each subject folder holding SPM.mat and the VOI files
    pub output_dir: Option<String>,

    /// Subject folder names, in output order
    pub subjects: Vec<String>,

    /// Configuration file (TOML), falls back to $DCMGEN_CONFIG
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing the subject folders [default: current directory]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Reject modulations of connections that were never declared
    #[arg(long)]
    pub strict: bool,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Whether both the model file and the output folder were given
    pub fn is_complete(&self) -> bool {
        self.model_file.is_some() && self.output_dir.is_some()
    }
}

/// Generation pipeline for one model file and a list of subjects
pub struct GenerationPipeline {
    args: GenerateArgs,
    config: ToolConfig,
}

impl GenerationPipeline {
    /// Create a new pipeline; CLI flags take precedence over `config`
    pub fn new(args: GenerateArgs, config: ToolConfig) -> Self {
        Self { args, config }
    }

    /// Run the pipeline, writing to `--output` or stdout
    pub fn execute(&self) -> Result<usize, PipelineError> {
        match &self.args.output {
            Some(path) => {
                let mut buffer = Vec::new();
                let blocks = self.execute_to(&mut buffer)?;
                if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                    fs::create_dir_all(parent).map_err(|source| PipelineError::io(parent, source))?;
                }
                fs::write(path, buffer).map_err(|source| PipelineError::io(path, source))?;
                info!(path = %path.display(), blocks, "script written");
                Ok(blocks)
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.execute_to(&mut handle)
            }
        }
    }

    /// Run the pipeline into `out`, returning the number of subject blocks written
    ///
    /// The whole script is generated before anything is written, so a failing
    /// model leaves `out` untouched.
    pub fn execute_to<W: Write>(&self, out: &mut W) -> Result<usize, PipelineError> {
        let (Some(model_file), Some(output_dir)) = (&self.args.model_file, &self.args.output_dir) else {
            return Err(PipelineError::Config("a model file and an output folder are required".to_string()));
        };

        let source = fs::read_to_string(model_file).map_err(|source| PipelineError::io(model_file, source))?;
        let name = model_name_from_path(model_file);
        info!(model = %name, file = %model_file.display(), "parsing model");

        let parser = ModelParser::with_config(self.parser_config());
        let model = parser
            .parse(&name, &source)
            .map_err(|source| PipelineError::Parse {
                path: model_file.clone(),
                source,
            })?
            .check();
        debug!(
            vois = model.voi_count(),
            inputs = model.input_count(),
            connections = model.connections().len(),
            nonlinear = model.is_nonlinear(),
            "model validated"
        );

        let base_dir = self.base_dir()?;
        let generator = MatlabGenerator::with_config(self.config.generation_config(&base_dir, output_dir))?;
        info!(model = %name, subjects = self.args.subjects.len(), base_dir = %base_dir.display(), "generating scripts");
        let script = generator.generate(&model, &self.args.subjects)?;
        if script.is_empty() {
            warn!(model = %name, "no subjects given, nothing to generate");
            return Ok(0);
        }

        out.write_all(script.render().as_bytes()).map_err(|source| PipelineError::io("<output>", source))?;
        out.flush().map_err(|source| PipelineError::io("<output>", source))?;
        Ok(script.len())
    }

    fn parser_config(&self) -> dcmgen_compiler::ParserConfig {
        let mut config = self.config.parser_config();
        if self.args.strict {
            config = config.with_required_modulated_edges(true);
        }
        config
    }

    fn base_dir(&self) -> Result<PathBuf, PipelineError> {
        match self.args.base_dir.clone().or_else(|| self.config.base_dir.clone()) {
            Some(dir) => Ok(dir),
            None => std::env::current_dir().map_err(|source| PipelineError::io(".", source)),
        }
    }
}

/// Errors raised by the generation pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

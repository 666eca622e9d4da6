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

//! End-to-end tests for the generation pipeline

use clap::Parser;
use dcmgen_compiler::{GenerationError, ParseErrorKind};
use dcmgen_tools::{GenerateArgs, GenerationPipeline, PipelineError, ToolConfig};
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use test_case::test_case;

const ATTENTION_MODEL: &str = "\
# Attention to motion
vois: V1 V5 SPC
inputs: Photic Motion Attention
te: 0.04

Photic -> V1
V1 -> V5
V5 -> SPC
Attention -> V1 -> V5   # modulation of the forward connection
";

fn study() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("attention.dcm");
    fs::write(&model, ATTENTION_MODEL).unwrap();
    (dir, model)
}

fn run(argv: &[&str], config: ToolConfig) -> Result<String, PipelineError> {
    let args = GenerateArgs::try_parse_from(std::iter::once("dcm-generate-models").chain(argv.iter().copied())).unwrap();
    let mut out = Vec::new();
    GenerationPipeline::new(args, config).execute_to(&mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_attention_model_end_to_end() {
    let (_dir, model) = study();
    let model = model.to_str().unwrap();
    let script = run(&[model, "DCM", "sub-01", "sub-02", "--base-dir", "/data/attention"], ToolConfig::default()).unwrap();

    assert!(script.starts_with("% ------"));
    assert_eq!(script.matches("clear DCM;").count(), 2);
    assert!(script.find("Subject sub-01").unwrap() < script.find("Subject sub-02").unwrap());

    // Motion is never referenced, so Attention becomes input 2
    assert!(script.contains("DCM.U.name = [SPM.Sess.U(1).name ...\n              SPM.Sess.U(3).name];"));
    assert!(script.contains("DCM.b = zeros(3,3,2);\nDCM.b(2,1,2) = 1; % Attention -> V1 -> V5\n"));
    assert!(script.contains("DCM.c = zeros(3,2);\nDCM.c(1,1) = 1; % Photic -> V1\n"));
    assert!(script.contains("DCM.a(2,1) = 1; % V1 -> V5\nDCM.a(3,2) = 1; % V5 -> SPC\n"));
    assert!(script.contains("DCM.TE     = 0.040;"));
    assert!(script.contains("load(fullfile('/data/attention', 'sub-02', 'DCM', 'VOI_SPC_1.mat'), 'xY');"));
    assert!(script.contains("save(fullfile('/data/attention', 'sub-01', 'DCM', 'DCM_attention.mat'));"));
}

#[test_case("vois: V1\nlabels: X\n", ParseErrorKind::UnknownDefinition ; "unknown definition")]
#[test_case("vois: V1\nV1 V1\n", ParseErrorKind::UninterpretableStatement ; "uninterpretable statement")]
#[test_case("vois: V1\ninputs: V1\nV1 -> V1\n", ParseErrorKind::AmbiguousElement ; "ambiguous element")]
#[test_case("vois: V1\ninputs: I1\nV1 -> I1\n", ParseErrorKind::ImpossibleConnection ; "impossible connection")]
#[test_case("vois: V1\nV1 -> V2\n", ParseErrorKind::CannotAssignElement ; "undeclared element")]
#[test_case("te: soon\n", ParseErrorKind::InvalidEchoTime ; "invalid echo time")]
fn test_invalid_models_report_their_error(source: &str, expected: ParseErrorKind) {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("bad.dcm");
    fs::write(&model, source).unwrap();

    let result = run(&[model.to_str().unwrap(), "DCM", "s01", "--base-dir", "/data"], ToolConfig::default());
    match result {
        Err(PipelineError::Parse { source, .. }) => assert_eq!(source.kind, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

#[test]
fn test_model_without_used_inputs_is_rejected() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("intrinsic.dcm");
    fs::write(&model, "vois: V1 V2\ninputs: I1\nV1 -> V2\n").unwrap();

    let result = run(&[model.to_str().unwrap(), "DCM", "s01", "--base-dir", "/data"], ToolConfig::default());
    assert!(matches!(result, Err(PipelineError::Generation(GenerationError::InsufficientInputs { model })) if model == "intrinsic"));
}

#[test]
fn test_config_file_settings() {
    let (dir, model) = study();
    let config_path = dir.path().join("dcmgen.toml");
    fs::write(&config_path, "base_dir = \"/from/config\"\nmicrotime_onset = 17\n[options]\ncentre = true\n").unwrap();
    let config = ToolConfig::resolve_config(Some(config_path), None).unwrap();

    let script = run(&[model.to_str().unwrap(), "DCM", "s01"], config.clone()).unwrap();
    assert!(script.contains("load(fullfile('/from/config', 's01', 'DCM', 'SPM.mat'));"));
    assert!(script.contains("SPM.Sess.U(1).u(17:end,1)"));
    assert!(script.contains("DCM.options.centre     = 1;"));

    let script = run(&[model.to_str().unwrap(), "DCM", "s01", "--base-dir", "/from/cli"], config).unwrap();
    assert!(script.contains("load(fullfile('/from/cli', 's01', 'DCM', 'SPM.mat'));"));
}

#[test]
fn test_incomplete_arguments() {
    let args = GenerateArgs::try_parse_from(["dcm-generate-models"]).unwrap();
    assert!(!args.is_complete());

    let err = GenerationPipeline::new(args, ToolConfig::default()).execute_to(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn test_output_is_deterministic() {
    let (_dir, model) = study();
    let argv = [model.to_str().unwrap(), "DCM", "s01", "s02", "--base-dir", "/data"];

    assert_eq!(run(&argv, ToolConfig::default()).unwrap(), run(&argv, ToolConfig::default()).unwrap());
}

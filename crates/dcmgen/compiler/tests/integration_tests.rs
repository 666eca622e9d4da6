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

//! Integration tests for the complete model compilation pipeline
//!
//! These tests verify the end-to-end behaviour from a model description to
//! the generated per-subject SPM scripts.

use dcmgen_compiler::{
    CompileError, GenerationConfig, Matrix, MatlabGenerator, ModelParser, ParseErrorKind, compile,
    codegen::GenerationError,
    model::{Element, Nature},
};
use proptest::prelude::*;
use std::collections::BTreeSet;

const FORWARD_MODEL: &str = "\
# Forward model with a modulated connection
te: 0.025
vois: V1 V2
inputs: I1

I1 -> V1        # driving input
V1 -> V2        # intrinsic
I1 -> V1 -> V2  # modulation
";

fn generator() -> MatlabGenerator {
    MatlabGenerator::with_config(GenerationConfig::new("/data/study", "DCM")).expect("valid configuration")
}

#[test]
fn test_forward_model_classification() {
    let model = ModelParser::new().parse("forward", FORWARD_MODEL).expect("model should parse").check();

    let matrices: Vec<Matrix> = model.connections().iter().map(|c| c.matrix()).collect();
    assert_eq!(matrices, vec![Matrix::C, Matrix::A, Matrix::B]);
    assert!(!model.is_nonlinear());
    assert_eq!(model.inputs_used(), vec![Element::input("I1", 1)]);
    assert_eq!(model.te(), 0.025);
}

#[test]
fn test_unused_leading_input_is_renumbered() {
    let source = "inputs: I1 I2\nvois: V1\nI2 -> V1\n";
    let model = ModelParser::new().parse("m", source).unwrap().check();

    assert_eq!(model.inputs_used(), vec![Element::input("I2", 1)]);
    assert_eq!(model.connections()[0].frm(), &Element::input("I2", 1));
    assert_eq!(model.used_inputs()[0].declared_index, 2);

    let code = generator().generate_subject(&model, "s01").unwrap();
    assert!(code.contains("DCM.U.name = [SPM.Sess.U(2).name];"));
    assert!(code.contains("DCM.c = zeros(1,1);\nDCM.c(1,1) = 1; % I2 -> V1\n"));
}

#[test]
fn test_voi_modulation_makes_model_nonlinear() {
    let source = "vois: V1 V2 V3\ninputs: I1\nI1 -> V1\nV1 -> V2\nV3 -> V1 -> V2\n";
    let model = ModelParser::new().parse("nl", source).unwrap().check();

    assert_eq!(model.connections()[2].matrix(), Matrix::D);
    assert_eq!(model.connections()[2].modulator().map(|m| m.nature()), Some(Nature::Voi));
    assert!(model.is_nonlinear());

    let code = generator().generate_subject(&model, "s01").unwrap();
    assert!(code.contains("DCM.d = zeros(3,3,3);\nDCM.d(2,1,3) = 1; % V3 -> V1 -> V2\n"));
    assert!(code.contains("DCM.options.nonlinear  = 1;"));
}

#[test]
fn test_undeclared_name_produces_no_output() {
    let source = "vois: V1 V2\ninputs: I1\nI1 -> V1\nV1 -> V3\n";
    let result = compile("broken", source, &["s01", "s02"], &ModelParser::new(), &generator());

    match result {
        Err(CompileError::Parse(err)) => {
            assert_eq!(err.kind, ParseErrorKind::CannotAssignElement);
            assert_eq!(err.position.line, 4);
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_model_without_inputs_cannot_be_generated() {
    let result = compile("vois_only", "vois: V1 V2\nV1 -> V2\n", &["s01"], &ModelParser::new(), &generator());
    assert_eq!(result, Err(CompileError::Generation(GenerationError::InsufficientInputs { model: "vois_only".into() })));
}

#[test]
fn test_one_block_per_subject() {
    let subjects = ["s01", "s02", "s03", "s04"];
    let script = compile("forward", FORWARD_MODEL, &subjects, &ModelParser::new(), &generator()).unwrap();
    let rendered = script.render();

    assert_eq!(script.len(), subjects.len());
    for (block, subject) in script.blocks.iter().zip(subjects) {
        assert_eq!(block.subject, subject);
        assert!(block.code.contains(&format!("% DCM Model (forward) for Subject {}\n", subject)));
        assert!(block.code.contains(&format!("'/data/study', '{}', 'DCM'", subject)));
        assert!(!block.code.contains(&format!("'{}'", subjects.iter().find(|s| **s != subject).unwrap())));
    }

    let separators = rendered.matches("spm_dcm_estimate").count();
    assert_eq!(separators, subjects.len());
    assert_eq!(rendered.matches("DCM_forward.mat'));\n\n% ------").count(), subjects.len() - 1);
    assert!(rendered.ends_with(".mat'));\n"));
}

#[test]
fn test_single_subject_has_no_separator() {
    let script = compile("forward", FORWARD_MODEL, &["only"], &ModelParser::new(), &generator()).unwrap();
    let rendered = script.render();
    assert_eq!(rendered, script.blocks[0].code);
    assert!(!rendered.ends_with("\n\n"));
}

#[test]
fn test_generation_is_deterministic() {
    let first = compile("forward", FORWARD_MODEL, &["s01", "s02"], &ModelParser::new(), &generator()).unwrap();
    let second = compile("forward", FORWARD_MODEL, &["s01", "s02"], &ModelParser::new(), &generator()).unwrap();
    assert_eq!(first, second);
}

/// A random but well-formed statement over `vois` VOIs and `inputs` inputs
fn statement(vois: usize, inputs: usize) -> impl Strategy<Value = (u8, String)> {
    (0u8..4, 1..=vois, 1..=vois, 1..=inputs, 1..=vois).prop_map(|(kind, a, b, i, m)| {
        let line = match kind {
            0 => format!("V{} -> V{}", a, b),
            1 => format!("I{} -> V{}", i, b),
            2 => format!("I{} -> V{} -> V{}", i, a, b),
            _ => format!("V{} -> V{} -> V{}", m, a, b),
        };
        (kind, line)
    })
}

fn random_model() -> impl Strategy<Value = (usize, usize, Vec<(u8, String)>)> {
    (1usize..5, 1usize..7).prop_flat_map(|(vois, inputs)| (Just(vois), Just(inputs), prop::collection::vec(statement(vois, inputs), 1..12)))
}

fn render_source(vois: usize, inputs: usize, statements: &[(u8, String)]) -> String {
    let voi_names: Vec<String> = (1..=vois).map(|i| format!("V{}", i)).collect();
    let input_names: Vec<String> = (1..=inputs).map(|i| format!("I{}", i)).collect();
    let mut source = format!("vois: {}\ninputs: {}\n", voi_names.join(" "), input_names.join(" "));
    for (_, line) in statements {
        source.push_str(line);
        source.push('\n');
    }
    source
}

proptest! {
    #[test]
    fn prop_used_inputs_are_densely_renumbered((vois, inputs, statements) in random_model()) {
        let source = render_source(vois, inputs, &statements);
        let model = ModelParser::new().parse("prop", &source).unwrap().check();

        let k = model.input_count();
        let indices: BTreeSet<usize> = model
            .connections()
            .iter()
            .flat_map(|c| c.elements())
            .filter(|e| e.is_input())
            .map(|e| e.index())
            .collect();
        prop_assert_eq!(indices, (1..=k).collect::<BTreeSet<_>>());

        // Renumbering preserves declaration order
        let declared: Vec<usize> = model.used_inputs().iter().map(|u| u.declared_index).collect();
        prop_assert!(declared.windows(2).all(|w| w[0] < w[1]));
        for (rank, used) in model.used_inputs().iter().enumerate() {
            prop_assert_eq!(used.index, rank + 1);
            prop_assert_eq!(format!("I{}", used.declared_index), used.name.clone());
        }
    }

    #[test]
    fn prop_classification_follows_statement_shape((vois, inputs, statements) in random_model()) {
        let source = render_source(vois, inputs, &statements);
        let model = ModelParser::new().parse("prop", &source).unwrap();

        prop_assert_eq!(model.connections.len(), statements.len());
        for (connection, (kind, _)) in model.connections.iter().zip(&statements) {
            let expected = match kind {
                0 => Matrix::A,
                1 => Matrix::C,
                2 => Matrix::B,
                _ => Matrix::D,
            };
            prop_assert_eq!(connection.matrix(), expected);
        }
        prop_assert_eq!(model.is_nonlinear(), statements.iter().any(|(kind, _)| *kind == 3));
    }

    #[test]
    fn prop_parsing_is_deterministic((vois, inputs, statements) in random_model()) {
        let source = render_source(vois, inputs, &statements);
        let parser = ModelParser::new();
        prop_assert_eq!(parser.parse("prop", &source).unwrap(), parser.parse("prop", &source).unwrap());
    }
}

use isa::inst::{Arg, Instruction};
use isa::segment::{DataSegment, InstructionSegment, ObjectCode, Segment, StringSegment};
use isa::table;

use qsasm::assemble;
use qsasm::diag::{DiagKind, Severity};

fn lines(source: &[&str]) -> Vec<String> {
    source.iter().map(|s| s.to_string()).collect()
}

#[test]
fn basic_script() {
    let assembly = assemble(
        &lines(&[
            "0:",
            "    set_episode 0",
            "    bb_map_designate 1, 2, 3, 4",
            "    set_floor_handler 0, 150",
            "    ret",
            "150:",
            "    set_mainwarp 1",
            "    ret",
        ]),
        false,
    );

    assert!(assembly.diagnostics.is_empty());

    let expected = ObjectCode::new(vec![
        Segment::Instructions(InstructionSegment {
            labels: vec![0],
            instructions: vec![
                Instruction::new(&table::OP_SET_EPISODE, vec![Arg::int(0, 4)]),
                Instruction::new(
                    &table::OP_BB_MAP_DESIGNATE,
                    vec![
                        Arg::int(1, 1),
                        Arg::int(2, 2),
                        Arg::int(3, 1),
                        Arg::int(4, 1),
                    ],
                ),
                // The call-style line desugars to one push per stack
                // parameter followed by the bare opcode.
                Instruction::new(&table::OP_ARG_PUSHL, vec![Arg::int(0, 4)]),
                Instruction::new(&table::OP_ARG_PUSHW, vec![Arg::int(150, 2)]),
                Instruction::new(&table::OP_SET_FLOOR_HANDLER, vec![]),
                Instruction::new(&table::OP_RET, vec![]),
            ],
        }),
        Segment::Instructions(InstructionSegment {
            labels: vec![150],
            instructions: vec![
                Instruction::new(&table::OP_ARG_PUSHL, vec![Arg::int(1, 4)]),
                Instruction::new(&table::OP_SET_MAINWARP, vec![]),
                Instruction::new(&table::OP_RET, vec![]),
            ],
        }),
    ]);

    assert_eq!(assembly.object_code, expected);
}

#[test]
fn register_arguments_in_call_form_push_the_register() {
    let assembly = assemble(&lines(&["0:", "    se r10"]), false);

    assert!(assembly.diagnostics.is_empty());

    let segment = match &assembly.object_code.segments[0] {
        Segment::Instructions(seg) => seg,
        _ => panic!("expected instructions segment"),
    };

    assert_eq!(
        segment.instructions[0],
        Instruction::new(&table::OP_ARG_PUSHR, vec![Arg::int(10, 1)]),
    );
    assert_eq!(
        segment.instructions[1],
        Instruction::new(&table::OP_SE, vec![]),
    );
}

#[test]
fn wrong_arity_reports_one_error_and_emits_nothing() {
    let assembly = assemble(&lines(&["0:", "    leti r5"]), false);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::Arity {
            expected: 2,
            actual: 1
        }
    );
    assert_eq!(assembly.diagnostics[0].severity, Severity::Error);
    assert_eq!(assembly.diagnostics[0].line_no, 2);

    let segment = match &assembly.object_code.segments[0] {
        Segment::Instructions(seg) => seg,
        _ => panic!("expected instructions segment"),
    };
    assert!(segment.instructions.is_empty());
}

#[test]
fn pop_opcodes_accept_both_calling_conventions() {
    // Call form.
    let call = assemble(&lines(&["0:", "    exit 0"]), false);
    assert!(call.diagnostics.is_empty());

    // Bare form, arguments pushed explicitly.
    let bare = assemble(
        &lines(&["0:", "    arg_pushl 0", "    exit"]),
        false,
    );
    assert!(bare.diagnostics.is_empty());

    assert_eq!(call.object_code, bare.object_code);

    // Any other count is an arity error.
    let wrong = assemble(&lines(&["0:", "    exit 0, 1"]), false);
    assert_eq!(wrong.diagnostics.len(), 1);
    assert_eq!(
        wrong.diagnostics[0].kind,
        DiagKind::Arity {
            expected: 1,
            actual: 2
        }
    );
}

#[test]
fn manual_stack_rejects_call_form() {
    let assembly = assemble(&lines(&["0:", "    exit 0"]), true);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::Arity {
            expected: 0,
            actual: 1
        }
    );
}

#[test]
fn varargs_require_at_least_the_declared_count() {
    let ok = assemble(&lines(&["0:", "    switch_jmp r1, 0"]), false);
    assert!(ok.diagnostics.is_empty());

    let wrong = assemble(&lines(&["0:", "    switch_jmp r1"]), false);
    assert_eq!(wrong.diagnostics.len(), 1);
    assert_eq!(
        wrong.diagnostics[0].kind,
        DiagKind::AtLeastArity {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn duplicate_label_reports_once_and_first_definition_wins() {
    let assembly = assemble(
        &lines(&["0:", "    ret", "0:", "    nop", "    ret"]),
        false,
    );

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(assembly.diagnostics[0].kind, DiagKind::DuplicateLabel(0));
    assert_eq!(assembly.diagnostics[0].line_no, 3);

    // The first segment keeps the label, the second one stays unlabelled.
    assert_eq!(assembly.object_code.segments[0].labels(), &[0]);
    assert_eq!(assembly.object_code.segments[1].labels(), &[] as &[u16]);
}

#[test]
fn label_groups_attach_to_one_segment() {
    let assembly = assemble(&lines(&["0:", "1:", "    ret"]), false);

    assert!(assembly.diagnostics.is_empty());
    assert_eq!(assembly.object_code.segments.len(), 1);
    assert_eq!(assembly.object_code.segments[0].labels(), &[0, 1]);
}

#[test]
fn unknown_mnemonic_is_reported_and_skipped() {
    let assembly = assemble(&lines(&["0:", "    frobnicate 1", "    ret"]), false);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::UnknownInstruction("frobnicate".to_string())
    );

    // The rest of the document still assembles.
    let segment = match &assembly.object_code.segments[0] {
        Segment::Instructions(seg) => seg,
        _ => panic!("expected instructions segment"),
    };
    assert_eq!(segment.instructions, vec![Instruction::new(&table::OP_RET, vec![])]);
}

#[test]
fn unknown_mnemonics_with_hex_codes_assemble() {
    let assembly = assemble(&lines(&["0:", "    unknown_e7", "    ret"]), false);

    assert!(assembly.diagnostics.is_empty());

    let segment = match &assembly.object_code.segments[0] {
        Segment::Instructions(seg) => seg,
        _ => panic!("expected instructions segment"),
    };
    assert_eq!(segment.instructions[0].opcode.code, 0xE7);
}

#[test]
fn data_and_string_sections() {
    let assembly = assemble(
        &lines(&[
            ".code",
            "",
            "0:",
            "    ret",
            "",
            ".data",
            "",
            "100:",
            "    0x01 0x02 255",
            "",
            ".string",
            "",
            "101:",
            "    \"hello\\nworld\"",
        ]),
        false,
    );

    assert!(assembly.diagnostics.is_empty());

    assert_eq!(
        assembly.object_code.segments[1],
        Segment::Data(DataSegment {
            labels: vec![100],
            bytes: vec![1, 2, 255],
        })
    );
    assert_eq!(
        assembly.object_code.segments[2],
        Segment::String(StringSegment {
            labels: vec![101],
            value: "hello\nworld".to_string(),
        })
    );
}

#[test]
fn data_bytes_out_of_range_are_reported() {
    let assembly = assemble(&lines(&[".data", "0:", "    256"]), false);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::IntAboveMax { bits: 8, max: 255 }
    );
}

#[test]
fn register_out_of_range_is_reported() {
    let assembly = assemble(&lines(&["0:", "    leti r300, 0"]), false);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(assembly.diagnostics[0].kind, DiagKind::InvalidRegister);
}

#[test]
fn immediate_out_of_range_is_reported() {
    let assembly = assemble(&lines(&["0:", "    letb r0, 256"]), false);

    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::IntAboveMax { bits: 8, max: 255 }
    );

    let assembly = assemble(&lines(&["0:", "    letb r0, -129"]), false);

    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::IntBelowMin { bits: 8, min: -128 }
    );
}

#[test]
fn type_mismatch_emits_no_instruction() {
    let assembly = assemble(&lines(&["0:", "    jmp r1"]), false);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::ExpectedType("an instruction label")
    );

    let segment = match &assembly.object_code.segments[0] {
        Segment::Instructions(seg) => seg,
        _ => panic!("expected instructions segment"),
    };
    assert!(segment.instructions.is_empty());
}

#[test]
fn malformed_line_does_not_stop_label_collection() {
    let assembly = assemble(
        &lines(&["0: garbage@ident", "    ret", "1:", "    jmp 0"]),
        false,
    );

    // The label still resolves even though the instruction was bad.
    assert_eq!(assembly.object_code.segments[0].labels(), &[0]);
    assert_eq!(assembly.diagnostics.len(), 1);
}

#[test]
fn repeated_section_marker_warns() {
    let assembly = assemble(&lines(&[".code", ".code", "0:", "    ret"]), false);

    assert_eq!(assembly.diagnostics.len(), 1);
    assert_eq!(assembly.diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        assembly.diagnostics[0].kind,
        DiagKind::UselessSectionMarker
    );
}

#[test]
fn float_arguments() {
    let assembly = assemble(&lines(&["0:", "    fleti r10, 1.5"]), false);

    assert!(assembly.diagnostics.is_empty());

    let segment = match &assembly.object_code.segments[0] {
        Segment::Instructions(seg) => seg,
        _ => panic!("expected instructions segment"),
    };
    assert_eq!(
        segment.instructions[0],
        Instruction::new(&table::OP_FLETI, vec![Arg::int(10, 1), Arg::float(1.5)]),
    );
}

//! Disassembling assembled code and assembling it again must reproduce the
//! exact same object code, in both stack-sugar and manual-stack modes.

use qsasm::{assemble, disassemble};

fn lines(source: &[&str]) -> Vec<String> {
    source.iter().map(|s| s.to_string()).collect()
}

fn assert_round_trips(source: &[&str], manual_stack: bool) {
    let first = assemble(&lines(source), manual_stack);
    assert!(
        first.diagnostics.is_empty(),
        "source did not assemble cleanly: {:?}",
        first.diagnostics
    );

    let text = disassemble(&first.object_code, manual_stack);
    let second = assemble(&text, manual_stack);

    assert!(
        second.diagnostics.is_empty(),
        "disassembly did not reassemble cleanly: {:?}\n{}",
        second.diagnostics,
        text.join("\n")
    );
    assert_eq!(
        first.object_code,
        second.object_code,
        "object code changed across the round trip:\n{}",
        text.join("\n")
    );
}

#[test]
fn instructions_round_trip() {
    let source = [
        "0:",
        "    leti r5, 1337",
        "    leti r6, -1",
        "    set r7",
        "    let r8, r5",
        "    fleti r10, 1.5",
        "    jmp_> r5, r6, 1",
        "    jmp_on 1, r1, r2, r3",
        "    switch_jmp r5, 1, 2",
        "    ret",
        "1:",
        "    nop",
        "    ret",
        "2:",
        "    ret",
    ];

    assert_round_trips(&source, false);
    assert_round_trips(&source, true);
}

#[test]
fn call_style_lines_round_trip() {
    let source = [
        "0:",
        "    set_floor_handler 0, 150",
        "    window_msg \"so it goes\"",
        "    winend",
        "    message 3, \"line one\\nline two\"",
        "    se r9",
        "    read_global_flag 7, r20",
        "    ret",
        "150:",
        "    ret",
    ];

    assert_round_trips(&source, false);
}

#[test]
fn explicit_pushes_round_trip_in_manual_mode() {
    let source = [
        "0:",
        "    arg_pushl 0",
        "    arg_pushw 150",
        "    set_floor_handler",
        "    arg_pushs \"hello\"",
        "    window_msg",
        "    ret",
        "150:",
        "    ret",
    ];

    assert_round_trips(&source, true);
}

#[test]
fn va_list_regions_round_trip() {
    // Pushes between va_start and va_end stay explicit even with stack
    // sugar enabled.
    let source = [
        "0:",
        "    va_start",
        "    arg_pushl 42",
        "    arg_pushr r3",
        "    va_call 1",
        "    va_end",
        "    ret",
        "1:",
        "    ret",
    ];

    assert_round_trips(&source, false);
    assert_round_trips(&source, true);
}

#[test]
fn unconsumed_pushes_round_trip() {
    let source = ["0:", "    arg_pushl 7", "    ret"];

    assert_round_trips(&source, false);
}

#[test]
fn data_and_string_segments_round_trip() {
    let source = [
        ".code",
        "",
        "0:",
        "    leto r0, 1",
        "    ret",
        "",
        ".data",
        "",
        "1:",
        "    0x00 0x01 0x7f 0xff 0x10 0x20 0x30 0x40",
        "    0x50 0x60 0x70 0x80 0x90 0xa0 0xb0 0xc0",
        "    0xd0",
        "",
        ".string",
        "",
        "2:",
        "    \"quoted \\\"text\\\"\\nwith\\tescapes\\\\\"",
    ];

    assert_round_trips(&source, false);
}

#[test]
fn unknown_opcode_mnemonics_round_trip() {
    let source = ["0:", "    unknown_e7", "    unknown_f8ff", "    ret"];

    assert_round_trips(&source, false);
}

#[test]
fn label_groups_round_trip() {
    let source = ["0:", "5:", "17:", "    nop", "    ret"];

    assert_round_trips(&source, false);
}

#[test]
fn two_byte_opcodes_round_trip() {
    let source = [
        "0:",
        "    set_episode 0",
        "    bb_map_designate 1, 2, 3, 4",
        "    get_coord_of_player r10, r20",
        "    map_designate_ex r30",
        "    fadd r40, r41",
        "    ret",
    ];

    assert_round_trips(&source, false);
}

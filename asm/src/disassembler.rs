//! Object code back to text. Exact inverse of the assembler: with stack
//! sugar enabled, arg_push instructions whose values are consumed by a later
//! stack-popping instruction are folded back into call-style lines.

use isa::inst::{Arg, Value};
use isa::opcode::Stack;
use isa::param::{Kind, Param};
use isa::segment::{InstructionSegment, ObjectCode, Segment};
use isa::table;

const INDENT: &str = "    ";

/// Renders object code as assembly lines. With `manual_stack`, push
/// instructions print verbatim and call-style sugar is not reconstructed.
pub fn disassemble(object_code: &ObjectCode, manual_stack: bool) -> Vec<String> {
    let mut lines = Vec::new();
    // Values pushed since the last stack boundary, oldest first, each tagged
    // with the kind of the push parameter it came from.
    let mut stack: Vec<(Arg, Kind)> = Vec::new();
    let mut section = None;

    for segment in &object_code.segments {
        let marker = match segment {
            Segment::Instructions(_) => ".code",
            Segment::Data(_) => ".data",
            Segment::String(_) => ".string",
        };

        if section != Some(marker) {
            section = Some(marker);

            if !lines.is_empty() {
                lines.push(String::new());
            }

            lines.push(marker.to_string());
            lines.push(String::new());
        }

        for label in segment.labels() {
            lines.push(format!("{label}:"));
        }

        match segment {
            Segment::Instructions(seg) => {
                disassemble_instructions(seg, manual_stack, &mut stack, &mut lines)
            }

            Segment::Data(seg) => {
                let mut line = String::from(INDENT);

                for (i, byte) in seg.bytes.iter().enumerate() {
                    line.push_str(&format!("0x{byte:02x}"));

                    if i == seg.bytes.len() - 1 {
                        lines.push(std::mem::take(&mut line));
                    } else if i % 16 == 15 {
                        lines.push(std::mem::replace(&mut line, String::from(INDENT)));
                    } else {
                        line.push(' ');
                    }
                }
            }

            Segment::String(seg) => {
                lines.push(format!("{INDENT}{}", quote(&seg.value)));
            }
        }
    }

    // Ensure a newline at the end.
    lines.push(String::new());

    lines
}

fn disassemble_instructions(
    segment: &InstructionSegment,
    manual_stack: bool,
    stack: &mut Vec<(Arg, Kind)>,
    lines: &mut Vec<String>,
) {
    let mut in_va_list = false;

    for (i, instruction) in segment.instructions.iter().enumerate() {
        let opcode = instruction.opcode;

        if opcode.code == table::OP_VA_START.code {
            in_va_list = true;
        } else if opcode.code == table::OP_VA_END.code {
            in_va_list = false;
        }

        let inline = !manual_stack
            && !in_va_list
            && opcode.stack == Some(Stack::Push)
            && consumed_by_later_pop(segment, i);

        if inline {
            let kind = opcode.params.first().map_or(Kind::DWord, |p| p.kind);
            for arg in &instruction.args {
                stack.push((arg.clone(), kind));
            }
            continue;
        }

        let mut line = String::from(INDENT);
        line.push_str(opcode.mnemonic);

        if opcode.stack == Some(Stack::Pop) {
            if !manual_stack {
                // The pop consumes the oldest entries, in declared push
                // order.
                let count = opcode.params.len().min(stack.len());
                let args: Vec<(Arg, Kind)> = stack.drain(..count).collect();
                append_args(&mut line, opcode.params, &args, true);
            }
        } else {
            let args = typed_args(opcode.params, &instruction.args);
            append_args(&mut line, opcode.params, &args, false);
        }

        if opcode.stack != Some(Stack::Push) {
            stack.clear();
        }

        lines.push(line);
    }
}

/// Whether the values of the push instruction at `index` are consumed by a
/// following stack-popping instruction, so they can be shown inline.
fn consumed_by_later_pop(segment: &InstructionSegment, index: usize) -> bool {
    let mut pushed = 0;

    for instruction in &segment.instructions[index..] {
        match instruction.opcode.stack {
            Some(Stack::Push) => pushed += 1,

            Some(Stack::Pop) => {
                let mut param_count = 0;
                let mut varargs = false;

                for param in instruction.opcode.params {
                    if param.is_varargs() {
                        varargs = true;
                    } else {
                        param_count += 1;
                    }
                }

                return pushed <= param_count || varargs;
            }

            None => return false,
        }
    }

    false
}

/// Pairs each argument with the kind of the parameter it belongs to, the
/// last parameter covering any variadic tail.
fn typed_args(params: &[Param], args: &[Arg]) -> Vec<(Arg, Kind)> {
    let mut out = Vec::with_capacity(args.len());

    for (i, arg) in args.iter().enumerate() {
        let kind = params
            .get(i)
            .or(params.last())
            .map_or(Kind::DWord, |p| p.kind);
        out.push((arg.clone(), kind));
    }

    out
}

fn append_args(line: &mut String, params: &[Param], args: &[(Arg, Kind)], stack: bool) {
    let mut i = 0;

    while i < params.len() && i < args.len() {
        let param_kind = params[i].kind;

        line.push_str(if i == 0 { " " } else { ", " });

        if let Some((arg, arg_kind)) = args.get(i) {
            // A single register argument prints as a register no matter what
            // the consuming parameter expects; variadic tails are driven by
            // the parameter kind below.
            if matches!(arg_kind, Kind::RegRef | Kind::RegTupRef(_)) && !param_kind.is_varargs() {
                push_register(line, arg);
            } else {
                match param_kind {
                    // Floats travel over the stack as raw bits.
                    Kind::Float if stack => {
                        if let Value::Int(bits) = arg.value {
                            line.push_str(&f32::from_bits(bits as u32).to_string());
                        } else {
                            push_value(line, arg);
                        }
                    }

                    Kind::ILabelVar => {
                        for (j, (arg, _)) in args.iter().enumerate().skip(i) {
                            if j > i {
                                line.push_str(", ");
                            }
                            push_value(line, arg);
                        }
                        break;
                    }

                    Kind::RegRefVar => {
                        for (j, (arg, _)) in args.iter().enumerate().skip(i) {
                            if j > i {
                                line.push_str(", ");
                            }
                            push_register(line, arg);
                        }
                        break;
                    }

                    Kind::RegRef | Kind::RegTupRef(_) => push_register(line, arg),

                    Kind::String => {
                        if let Value::Str(value) = &arg.value {
                            line.push_str(&quote(value));
                        } else {
                            push_value(line, arg);
                        }
                    }

                    _ => push_value(line, arg),
                }
            }
        }

        i += 1;
    }
}

fn push_register(line: &mut String, arg: &Arg) {
    line.push('r');
    push_value(line, arg);
}

fn push_value(line: &mut String, arg: &Arg) {
    match &arg.value {
        Value::Int(v) => line.push_str(&v.to_string()),
        Value::Float(v) => line.push_str(&v.to_string()),
        Value::Str(v) => line.push_str(&quote(v)),
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');

    for char in value.chars() {
        match char {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(char),
        }
    }

    out.push('"');
    out
}

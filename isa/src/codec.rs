//! Binary codec for the bytecode region. Instructions encode little-endian
//! with 2-byte opcodes written high byte first; the label table maps every
//! label to its byte offset. Container framing (compression, headers) is the
//! caller's concern.

use crate::inst::{Arg, Instruction, Value};
use crate::opcode::{opcode_for_code, Opcode, Stack};
use crate::param::Kind;
use crate::segment::{ObjectCode, Segment};

/// Longest string argument we will read before assuming the data is corrupt.
const MAX_STRING_ARG_BYTES: usize = 4096;

/// Non-fatal finding while decoding, tagged with the byte offset it occurred
/// at.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeWarning {
    pub offset: usize,
    pub message: String,
}

/// Encodes object code to raw bytecode plus the label offset table. Slots for
/// undefined labels hold -1.
pub fn encode(object_code: &ObjectCode) -> (Vec<u8>, Vec<i32>) {
    let mut out = Vec::new();

    let largest_label = object_code
        .segments
        .iter()
        .flat_map(|s| s.labels().iter().copied())
        .max();
    let mut label_offsets = vec![-1; largest_label.map_or(0, |l| l as usize + 1)];

    for segment in &object_code.segments {
        for label in segment.labels() {
            label_offsets[*label as usize] = out.len() as i32;
        }

        match segment {
            Segment::Instructions(seg) => {
                for instruction in &seg.instructions {
                    encode_instruction(&mut out, instruction);
                }
            }

            Segment::Data(seg) => out.extend_from_slice(&seg.bytes),

            Segment::String(seg) => {
                let size = seg.byte_size();
                let start = out.len();

                for unit in seg.value.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }

                out.resize(start + size, 0);
            }
        }
    }

    (out, label_offsets)
}

fn encode_instruction(out: &mut Vec<u8>, instruction: &Instruction) {
    let opcode = instruction.opcode;

    if opcode.size() == 2 {
        out.push((opcode.code >> 8) as u8);
    }

    out.push(opcode.code as u8);

    if opcode.stack == Some(Stack::Pop) {
        return;
    }

    for (i, param) in opcode.params.iter().enumerate() {
        let args = instruction.param_args(i);

        let arg = match args.first() {
            Some(arg) => arg,
            None => continue,
        };

        match param.kind {
            Kind::Byte | Kind::RegRef | Kind::RegTupRef(_) => {
                out.push(int_value(arg) as u8);
            }

            Kind::Word | Kind::ILabel | Kind::DLabel | Kind::SLabel => {
                out.extend_from_slice(&(int_value(arg) as u16).to_le_bytes());
            }

            Kind::DWord => out.extend_from_slice(&int_value(arg).to_le_bytes()),

            Kind::Float => {
                let value = match &arg.value {
                    Value::Float(f) => *f,
                    Value::Int(v) => *v as f32,
                    Value::Str(_) => 0.0,
                };
                out.extend_from_slice(&value.to_le_bytes());
            }

            Kind::ILabelVar => {
                out.push(args.len() as u8);
                for arg in args {
                    out.extend_from_slice(&(int_value(arg) as u16).to_le_bytes());
                }
            }

            Kind::RegRefVar => {
                out.push(args.len() as u8);
                for arg in args {
                    out.push(int_value(arg) as u8);
                }
            }

            Kind::String => {
                let value = arg.value.as_str().unwrap_or("");
                for unit in value.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out.extend_from_slice(&[0, 0]);
            }

            Kind::Pointer => unreachable!("pointers have no inline encoding"),
        }
    }
}

fn int_value(arg: &Arg) -> i32 {
    match &arg.value {
        Value::Int(v) => *v,
        Value::Float(f) => f.to_bits() as i32,
        Value::Str(_) => 0,
    }
}

/// Decodes one instructions segment. In lenient mode an uncatalogued opcode
/// or truncated argument data produces a placeholder instruction plus a
/// warning instead of an error, so slightly unusual real-world bytecode stays
/// editable.
pub fn decode_instructions(
    bytes: &[u8],
    lenient: bool,
) -> Result<(Vec<Instruction>, Vec<DecodeWarning>), String> {
    let mut cursor = Cursor { bytes, pos: 0 };
    let mut instructions = Vec::new();
    let mut warnings = Vec::new();

    while !cursor.at_end() {
        let opcode_offset = cursor.pos;
        let first = cursor.u8().unwrap();

        let code = if matches!(first, 0xF8 | 0xF9) {
            match cursor.u8() {
                Some(second) => ((first as u16) << 8) | second as u16,
                None => {
                    let message = format!("Truncated opcode {:#04x}.", first);
                    if lenient {
                        warnings.push(DecodeWarning {
                            offset: opcode_offset,
                            message,
                        });
                        break;
                    }
                    return Err(message);
                }
            }
        } else {
            first as u16
        };

        let opcode = opcode_for_code(code);

        if !opcode.known {
            warnings.push(DecodeWarning {
                offset: opcode_offset,
                message: format!("Unknown opcode {:#04x}.", code),
            });
        }

        match decode_args(&mut cursor, opcode) {
            Some(args) => instructions.push(Instruction::new(opcode, args)),
            None => {
                let message = format!(
                    "Truncated arguments for {} at offset {}.",
                    opcode.mnemonic, opcode_offset
                );
                if lenient {
                    warnings.push(DecodeWarning {
                        offset: opcode_offset,
                        message,
                    });
                    instructions.push(Instruction::new(opcode, Vec::new()));
                    break;
                }
                return Err(message);
            }
        }
    }

    Ok((instructions, warnings))
}

fn decode_args(cursor: &mut Cursor, opcode: &'static Opcode) -> Option<Vec<Arg>> {
    let mut args = Vec::new();

    if opcode.stack == Some(Stack::Pop) {
        return Some(args);
    }

    for param in opcode.params {
        match param.kind {
            Kind::Byte => args.push(Arg::int(cursor.u8()? as i32, 1)),

            Kind::Word | Kind::ILabel | Kind::DLabel | Kind::SLabel => {
                args.push(Arg::int(cursor.u16()? as i32, 2));
            }

            Kind::DWord => args.push(Arg::int(cursor.i32()?, 4)),

            Kind::Float => args.push(Arg::float(f32::from_le_bytes(
                cursor.i32()?.to_le_bytes(),
            ))),

            Kind::ILabelVar => {
                let count = cursor.u8()?;
                for _ in 0..count {
                    args.push(Arg::int(cursor.u16()? as i32, 2));
                }
            }

            Kind::RegRefVar => {
                let count = cursor.u8()?;
                for _ in 0..count {
                    args.push(Arg::int(cursor.u8()? as i32, 1));
                }
            }

            Kind::RegRef | Kind::RegTupRef(_) => args.push(Arg::int(cursor.u8()? as i32, 1)),

            Kind::String => {
                let mut units = Vec::new();
                let limit = cursor.pos + MAX_STRING_ARG_BYTES;

                loop {
                    if cursor.pos >= limit {
                        return None;
                    }
                    match cursor.u16()? {
                        0 => break,
                        unit => units.push(unit),
                    }
                }

                args.push(Arg::str(String::from_utf16_lossy(&units)));
            }

            Kind::Pointer => unreachable!("pointers have no inline encoding"),
        }
    }

    Some(args)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn u8(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    fn u16(&mut self) -> Option<u16> {
        let bytes = self.bytes.get(self.pos..self.pos + 2)?;
        self.pos += 2;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn i32(&mut self) -> Option<i32> {
        let bytes = self.bytes.get(self.pos..self.pos + 4)?;
        self.pos += 4;
        Some(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{DataSegment, InstructionSegment, StringSegment};
    use crate::table;

    #[test]
    fn encode_instructions_and_label_offsets() {
        let object_code = ObjectCode::new(vec![Segment::Instructions(InstructionSegment {
            labels: vec![0],
            instructions: vec![
                Instruction::new(&table::OP_LETI, vec![Arg::int(5, 1), Arg::int(7, 4)]),
                Instruction::new(&table::OP_RET, vec![]),
            ],
        })]);

        let (bytes, label_offsets) = encode(&object_code);

        assert_eq!(bytes, vec![0x09, 5, 7, 0, 0, 0, 0x01]);
        assert_eq!(label_offsets, vec![0]);
    }

    #[test]
    fn encode_two_byte_opcode_high_byte_first() {
        let object_code = ObjectCode::new(vec![Segment::Instructions(InstructionSegment {
            labels: vec![1],
            instructions: vec![Instruction::new(
                &table::OP_SET_EPISODE,
                vec![Arg::int(2, 4)],
            )],
        })]);

        let (bytes, label_offsets) = encode(&object_code);

        assert_eq!(bytes, vec![0xF8, 0xBC, 2, 0, 0, 0]);
        assert_eq!(label_offsets, vec![-1, 0]);
    }

    #[test]
    fn string_segments_pad_to_multiple_of_four() {
        let object_code = ObjectCode::new(vec![
            Segment::String(StringSegment {
                labels: vec![0],
                value: "ab".to_string(),
            }),
            Segment::Data(DataSegment {
                labels: vec![1],
                bytes: vec![0xDE, 0xAD],
            }),
        ]);

        let (bytes, label_offsets) = encode(&object_code);

        // "ab" + NUL is 3 UTF-16 units, padded to 8 bytes.
        assert_eq!(&bytes[..8], &[b'a', 0, b'b', 0, 0, 0, 0, 0]);
        assert_eq!(label_offsets, vec![0, 8]);
    }

    #[test]
    fn decode_is_the_inverse_of_encode() {
        let instructions = vec![
            Instruction::new(&table::OP_LETI, vec![Arg::int(5, 1), Arg::int(-1, 4)]),
            Instruction::new(
                &table::OP_SWITCH_JMP,
                vec![Arg::int(3, 1), Arg::int(100, 2), Arg::int(101, 2)],
            ),
            Instruction::new(&table::OP_ARG_PUSHS, vec![Arg::str("hi")]),
            Instruction::new(&table::OP_SET_EPISODE, vec![Arg::int(1, 4)]),
            Instruction::new(&table::OP_RET, vec![]),
        ];
        let object_code = ObjectCode::new(vec![Segment::Instructions(InstructionSegment {
            labels: vec![0],
            instructions: instructions.clone(),
        })]);

        let (bytes, _) = encode(&object_code);
        let (decoded, warnings) = decode_instructions(&bytes, false).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(decoded, instructions);
    }

    #[test]
    fn lenient_decode_tolerates_unknown_opcodes() {
        let (decoded, warnings) = decode_instructions(&[0xE7, 0x01], true).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].opcode.mnemonic, "unknown_e7");
        assert!(decoded[0].args.is_empty());
        assert_eq!(decoded[1].opcode.code, 0x01);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].offset, 0);
    }

    #[test]
    fn truncated_arguments_error_when_strict() {
        // leti wants 5 argument bytes.
        let bytes = [0x09, 0x05];

        assert!(decode_instructions(&bytes, false).is_err());

        let (decoded, warnings) = decode_instructions(&bytes, true).unwrap();
        assert_eq!(decoded.len(), 1);
        assert!(decoded[0].args.is_empty());
        assert_eq!(warnings.len(), 1);
    }
}

use serde::Serialize;

use crate::inst::Instruction;

/// Contiguous chunk of compiled output. A segment starts at an instruction,
/// data block or string named by one or more labels and ends right before the
/// next labelled location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Instructions(InstructionSegment),
    Data(DataSegment),
    String(StringSegment),
}

impl Segment {
    pub fn labels(&self) -> &[u16] {
        match self {
            Segment::Instructions(s) => &s.labels,
            Segment::Data(s) => &s.labels,
            Segment::String(s) => &s.labels,
        }
    }

    pub fn labels_mut(&mut self) -> &mut Vec<u16> {
        match self {
            Segment::Instructions(s) => &mut s.labels,
            Segment::Data(s) => &mut s.labels,
            Segment::String(s) => &mut s.labels,
        }
    }

    /// Encoded byte size of the segment.
    pub fn byte_size(&self) -> usize {
        match self {
            Segment::Instructions(s) => s.instructions.iter().map(Instruction::size).sum(),
            Segment::Data(s) => s.bytes.len(),
            Segment::String(s) => s.byte_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InstructionSegment {
    pub labels: Vec<u16>,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataSegment {
    pub labels: Vec<u16>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StringSegment {
    pub labels: Vec<u16>,
    pub value: String,
}

impl StringSegment {
    /// UTF-16 with a NUL terminator, padded to a multiple of 4 bytes.
    pub fn byte_size(&self) -> usize {
        let units = self.value.encode_utf16().count() + 1;
        4 * (units + 1) / 2
    }
}

/// The segments produced by one assembler run, in program order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ObjectCode {
    pub segments: Vec<Segment>,
}

impl ObjectCode {
    pub fn new(segments: Vec<Segment>) -> Self {
        ObjectCode { segments }
    }

    pub fn instruction_segments(&self) -> impl Iterator<Item = &InstructionSegment> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Instructions(s) => Some(s),
            _ => None,
        })
    }
}

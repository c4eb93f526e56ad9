use serde::Serialize;

use crate::opcode::{Opcode, Stack};
use crate::param::Kind;

/// Concrete argument value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i32),
    Float(f32),
    Str(String),
}

impl Value {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// Instruction argument with its encoded byte size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arg {
    pub value: Value,
    pub size: u16,
}

impl Arg {
    pub fn int(value: i32, size: u16) -> Self {
        Arg {
            value: Value::Int(value),
            size,
        }
    }

    pub fn float(value: f32) -> Self {
        Arg {
            value: Value::Float(value),
            size: 4,
        }
    }

    pub fn str(value: impl Into<String>) -> Self {
        let value = value.into();
        let size = 2 * value.encode_utf16().count() + 2;
        Arg {
            value: Value::Str(value),
            size: size as u16,
        }
    }
}

/// Opcode invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    pub opcode: &'static Opcode,
    /// Immediate arguments. Empty for stack-popping opcodes, which take their
    /// parameters from the argument stack at run time.
    pub args: Vec<Arg>,
}

impl Instruction {
    pub fn new(opcode: &'static Opcode, args: Vec<Arg>) -> Self {
        Instruction { opcode, args }
    }

    /// The immediate arguments belonging to the parameter at `index`. A
    /// variable-arity parameter is always last and swallows all remaining
    /// arguments.
    pub fn param_args(&self, index: usize) -> &[Arg] {
        let params = self.opcode.params;

        if index >= params.len() {
            return &[];
        }

        if params[index].is_varargs() {
            self.args.get(index..).unwrap_or(&[])
        } else {
            self.args.get(index..=index).unwrap_or(&[])
        }
    }

    /// Total encoded byte size of the arguments.
    pub fn arg_size(&self) -> usize {
        if self.opcode.stack == Some(Stack::Pop) {
            return 0;
        }

        let mut size = 0;

        for (i, param) in self.opcode.params.iter().enumerate() {
            size += match param.kind {
                Kind::Byte | Kind::RegRef | Kind::RegTupRef(_) => 1,
                Kind::Word | Kind::ILabel | Kind::DLabel | Kind::SLabel => 2,
                Kind::DWord | Kind::Float => 4,
                // Count byte plus one word per label.
                Kind::ILabelVar => 1 + 2 * self.param_args(i).len(),
                // Count byte plus one byte per register.
                Kind::RegRefVar => 1 + self.param_args(i).len(),
                Kind::String => self
                    .param_args(i)
                    .first()
                    .map_or(0, |arg| arg.size as usize),
                Kind::Pointer => unreachable!("pointers have no inline encoding"),
            };
        }

        size
    }

    /// Byte size of the entire instruction.
    pub fn size(&self) -> usize {
        self.opcode.size() + self.arg_size()
    }
}

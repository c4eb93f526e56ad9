use serde::Serialize;
use strum::{Display, EnumString};

/// Operand kind. `RegTupRef` is the only parameterized variant: it names a
/// fixed ordered tuple of typed sub-registers that is treated as one value
/// (e.g. an X/Y/Z triple) and identified by its first register.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Kind {
    /// 8-Bit integer.
    Byte,
    /// 16-Bit integer.
    Word,
    /// 32-Bit integer.
    DWord,
    /// 32-Bit floating point number.
    Float,
    /// Reference to an instruction segment.
    ILabel,
    /// Reference to a data segment.
    DLabel,
    /// Reference to a string segment.
    SLabel,
    /// String of arbitrary size.
    String,
    /// Arbitrary amount of instruction labels.
    ILabelVar,
    /// Reference to one or more consecutive registers of any type.
    RegRef,
    /// Reference to a fixed tuple of consecutive registers of specific types.
    RegTupRef(&'static [Param]),
    /// Arbitrary amount of register references.
    RegRefVar,
    /// Raw memory pointer.
    Pointer,
}

impl Kind {
    /// Whether this kind takes a variable number of arguments.
    pub fn is_varargs(self) -> bool {
        matches!(self, Kind::ILabelVar | Kind::RegRefVar)
    }

    /// Whether arguments of this kind name registers.
    pub fn is_reg_ref(self) -> bool {
        matches!(self, Kind::RegRef | Kind::RegTupRef(_) | Kind::RegRefVar)
    }

    /// Whether arguments of this kind name labels.
    pub fn is_label(self) -> bool {
        matches!(
            self,
            Kind::ILabel | Kind::DLabel | Kind::SLabel | Kind::ILabelVar
        )
    }
}

/// The way an instruction accesses a referenced register. Descriptive only,
/// never enforced at assembly or run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Param {
    pub kind: Kind,
    pub doc: Option<&'static str>,
    /// Only set when `kind` references registers.
    pub access: Option<Access>,
}

impl Param {
    pub const fn new(kind: Kind) -> Self {
        Param {
            kind,
            doc: None,
            access: None,
        }
    }

    pub fn is_varargs(&self) -> bool {
        self.kind.is_varargs()
    }
}

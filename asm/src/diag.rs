use color_print::cprintln;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Everything the assembler and lexer can complain about. The `Display`
/// rendering is the user-facing description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagKind {
    #[error("Malformed number.")]
    InvalidNumber,

    #[error("Unterminated string.")]
    UnterminatedString,

    #[error("Invalid identifier.")]
    InvalidIdent,

    #[error("Invalid section type.")]
    InvalidSection,

    #[error("Invalid label.")]
    InvalidLabel,

    #[error("Duplicate label {0}.")]
    DuplicateLabel(u16),

    #[error("Unknown instruction \"{0}\".")]
    UnknownInstruction(String),

    #[error("Expected {expected} argument(s), got {actual}.")]
    Arity { expected: usize, actual: usize },

    #[error("Expected at least {expected} argument(s), got {actual}.")]
    AtLeastArity { expected: usize, actual: usize },

    #[error("Expected {0}.")]
    ExpectedType(&'static str),

    #[error("{bits}-Bit integer can't be less than {min}.")]
    IntBelowMin { bits: u8, min: i64 },

    #[error("{bits}-Bit integer can't be greater than {max}.")]
    IntAboveMax { bits: u8, max: i64 },

    #[error("Invalid register reference, expected r0-r255.")]
    InvalidRegister,

    #[error("Unexpected token.")]
    UnexpectedToken,

    #[error("Expected an argument.")]
    ExpectedArgument,

    #[error("Expected a comma.")]
    ExpectedComma,

    #[error("Expected an opcode mnemonic.")]
    ExpectedMnemonic,

    #[error("Expected an unsigned 8-bit integer.")]
    ExpectedBytes,

    #[error("Expected a string.")]
    ExpectedString,

    #[error("Unnecessary section marker.")]
    UselessSectionMarker,
}

/// Position-tagged diagnostic, the shape the editor renders inline markers
/// from. Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(rename = "line")]
    pub line_no: u32,
    pub col: u32,
    #[serde(rename = "length")]
    pub len: u32,
    #[serde(rename = "description", serialize_with = "kind_as_description")]
    pub kind: DiagKind,
}

fn kind_as_description<S: Serializer>(kind: &DiagKind, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(kind)
}

impl Diagnostic {
    pub fn error(line_no: u32, col: u32, len: u32, kind: DiagKind) -> Self {
        Diagnostic {
            severity: Severity::Error,
            line_no,
            col,
            len,
            kind,
        }
    }

    pub fn warning(line_no: u32, col: u32, len: u32, kind: DiagKind) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            line_no,
            col,
            len,
            kind,
        }
    }

    /// Print with file location and line content, `line_no` being the
    /// position within the named file.
    pub fn print(&self, file: &str, line_no: usize, line: &str) {
        match self.severity {
            Severity::Error => cprintln!("<red,bold>error</>: {}", self.kind),
            Severity::Warning => cprintln!("<yellow,bold>warning</>: {}", self.kind),
        }

        cprintln!("     <blue>--></> <underline>{}:{}:{}</>", file, line_no, self.col);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line_no, line);
        cprintln!("      <blue>|</>");
    }
}

//! Text to object code. One pass over the lines, collecting diagnostics
//! instead of failing: a malformed line never prevents the rest of the
//! document from assembling.

use indexmap::IndexMap;

use isa::inst::{Arg, Instruction, Value};
use isa::opcode::{opcode_for_mnemonic, Opcode, Stack};
use isa::param::Kind;
use isa::segment::{
    DataSegment, InstructionSegment, ObjectCode, Segment, StringSegment,
};
use isa::table;

use crate::diag::{DiagKind, Diagnostic};
use crate::lexer::{tokenize_line, Token, TokenKind};

/// Result of one assembler run: best-effort object code plus the ordered
/// diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub object_code: ObjectCode,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == crate::diag::Severity::Error)
    }
}

/// Assembles the given lines. With `manual_stack`, call-style lines for
/// stack-popping opcodes are rejected and arg_push instructions must be
/// written out explicitly, so already-compiled code round-trips exactly.
pub fn assemble(lines: &[String], manual_stack: bool) -> Assembly {
    Assembler {
        manual_stack,
        line_no: 0,
        segments: Vec::new(),
        current: None,
        labels: IndexMap::new(),
        section: Section::Instructions,
        first_section_marker: true,
        prev_line_label_only: false,
        diagnostics: Vec::new(),
    }
    .run(lines)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Instructions,
    Data,
    String,
}

struct Assembler {
    manual_stack: bool,
    line_no: u32,
    segments: Vec<Segment>,
    /// Index of the segment new content is appended to.
    current: Option<usize>,
    /// First definition position per label. First definition wins.
    labels: IndexMap<u16, (u32, u32)>,
    section: Section,
    first_section_marker: bool,
    /// Whether the previous line defined a label and nothing else. Label
    /// groups attach to a single segment.
    prev_line_label_only: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Assembler {
    fn run(mut self, lines: &[String]) -> Assembly {
        for (idx, line) in lines.iter().enumerate() {
            self.line_no = idx as u32 + 1;
            let tokens = tokenize_line(line);
            let mut label_only = false;

            if let Some(first) = tokens.first() {
                match &first.kind {
                    TokenKind::Ident(_) => {
                        if self.section == Section::Instructions {
                            self.parse_instruction(&tokens, 0);
                        } else {
                            self.error(first, DiagKind::UnexpectedToken);
                        }
                    }

                    TokenKind::Label(_) => label_only = self.parse_label(&tokens),

                    TokenKind::CodeSection => self.parse_section(&tokens, Section::Instructions),
                    TokenKind::DataSection => self.parse_section(&tokens, Section::Data),
                    TokenKind::StrSection => self.parse_section(&tokens, Section::String),

                    TokenKind::Int(_) => {
                        if self.section == Section::Data {
                            self.parse_bytes(&tokens, 0);
                        } else {
                            self.error(first, DiagKind::UnexpectedToken);
                        }
                    }

                    TokenKind::Str(_) => {
                        if self.section == Section::String {
                            self.parse_string(&tokens, 0);
                        } else {
                            self.error(first, DiagKind::UnexpectedToken);
                        }
                    }

                    TokenKind::InvalidSection => self.error(first, DiagKind::InvalidSection),
                    TokenKind::InvalidIdent(_) => self.error(first, DiagKind::InvalidIdent),
                    TokenKind::InvalidNumber => self.error(first, DiagKind::InvalidNumber),
                    TokenKind::UnterminatedStr(_) => {
                        self.error(first, DiagKind::UnterminatedString)
                    }

                    _ => self.error(first, DiagKind::UnexpectedToken),
                }
            }

            self.prev_line_label_only = label_only;
        }

        Assembly {
            object_code: ObjectCode::new(self.segments),
            diagnostics: self.diagnostics,
        }
    }

    // ------------------------------------------------------------------------
    // Diagnostics

    fn error(&mut self, token: &Token, kind: DiagKind) {
        self.error_at(token.col, token.len, kind);
    }

    fn error_at(&mut self, col: u32, len: u32, kind: DiagKind) {
        self.diagnostics
            .push(Diagnostic::error(self.line_no, col, len, kind));
    }

    fn warning(&mut self, token: &Token, kind: DiagKind) {
        self.diagnostics
            .push(Diagnostic::warning(self.line_no, token.col, token.len, kind));
    }

    // ------------------------------------------------------------------------
    // Segment bookkeeping

    fn new_segment(&mut self, labels: Vec<u16>) {
        let segment = match self.section {
            Section::Instructions => Segment::Instructions(InstructionSegment {
                labels,
                ..Default::default()
            }),
            Section::Data => Segment::Data(DataSegment {
                labels,
                ..Default::default()
            }),
            Section::String => Segment::String(StringSegment {
                labels,
                ..Default::default()
            }),
        };

        self.segments.push(segment);
        self.current = Some(self.segments.len() - 1);
    }

    fn add_instruction(&mut self, instruction: Instruction) {
        if !matches!(
            self.current.map(|i| &self.segments[i]),
            Some(Segment::Instructions(_))
        ) {
            self.new_segment(Vec::new());
        }

        match &mut self.segments[self.current.unwrap()] {
            Segment::Instructions(seg) => seg.instructions.push(instruction),
            _ => unreachable!(),
        }
    }

    fn add_bytes(&mut self, bytes: &[u8]) {
        if !matches!(
            self.current.map(|i| &self.segments[i]),
            Some(Segment::Data(_))
        ) {
            self.new_segment(Vec::new());
        }

        match &mut self.segments[self.current.unwrap()] {
            Segment::Data(seg) => seg.bytes.extend_from_slice(bytes),
            _ => unreachable!(),
        }
    }

    fn add_string(&mut self, value: &str) {
        if !matches!(
            self.current.map(|i| &self.segments[i]),
            Some(Segment::String(_))
        ) {
            self.new_segment(Vec::new());
        }

        match &mut self.segments[self.current.unwrap()] {
            Segment::String(seg) => seg.value.push_str(value),
            _ => unreachable!(),
        }
    }

    // ------------------------------------------------------------------------
    // Line parsers

    /// Returns true when the line defined a label and nothing else.
    fn parse_label(&mut self, tokens: &[Token]) -> bool {
        let token = &tokens[0];
        let value = match token.kind {
            TokenKind::Label(v) => v,
            _ => unreachable!(),
        };

        let mut handled = false;

        if !(0..=0xFFFF).contains(&value) {
            self.error(token, DiagKind::InvalidLabel);
        } else {
            let label = value as u16;

            if self.labels.contains_key(&label) {
                // First definition wins; the content still gets its own
                // segment so it doesn't merge into the first definition's.
                self.error(token, DiagKind::DuplicateLabel(label));

                if !self.prev_line_label_only {
                    self.new_segment(Vec::new());
                }

                handled = true;
            } else {
                self.labels.insert(label, (self.line_no, token.col));

                let attach_to_last = self.prev_line_label_only && !self.segments.is_empty();

                if attach_to_last {
                    self.segments.last_mut().unwrap().labels_mut().push(label);
                } else {
                    self.new_segment(vec![label]);
                }

                handled = true;
            }
        }

        match tokens.get(1) {
            None => handled,

            Some(next) => {
                match self.section {
                    Section::Instructions => {
                        if matches!(next.kind, TokenKind::Ident(_)) {
                            self.parse_instruction(tokens, 1);
                        } else {
                            self.error(next, DiagKind::ExpectedMnemonic);
                        }
                    }

                    Section::Data => {
                        if matches!(next.kind, TokenKind::Int(_)) {
                            self.parse_bytes(tokens, 1);
                        } else {
                            self.error(next, DiagKind::ExpectedBytes);
                        }
                    }

                    Section::String => {
                        if matches!(next.kind, TokenKind::Str(_)) {
                            self.parse_string(tokens, 1);
                        } else {
                            self.error(next, DiagKind::ExpectedString);
                        }
                    }
                }

                false
            }
        }
    }

    fn parse_section(&mut self, tokens: &[Token], section: Section) {
        if self.section == section && !self.first_section_marker {
            self.warning(&tokens[0], DiagKind::UselessSectionMarker);
        }

        self.section = section;
        self.first_section_marker = false;
        // Content after a marker starts a fresh segment.
        self.current = None;

        if let Some(extra) = tokens.get(1) {
            self.error(extra, DiagKind::UnexpectedToken);
        }
    }

    fn parse_bytes(&mut self, tokens: &[Token], start: usize) {
        let mut bytes = Vec::new();
        let mut rest = &tokens[start..];

        while let Some((token, tail)) = rest.split_first() {
            match token.kind {
                TokenKind::Int(value) => {
                    if value < 0 {
                        self.error(token, DiagKind::IntBelowMin { bits: 8, min: 0 });
                    } else if value > 255 {
                        self.error(token, DiagKind::IntAboveMax { bits: 8, max: 255 });
                    }

                    bytes.push(value as u8);
                }
                _ => {
                    self.error(token, DiagKind::ExpectedBytes);
                    break;
                }
            }

            rest = tail;
        }

        self.add_bytes(&bytes);
    }

    fn parse_string(&mut self, tokens: &[Token], start: usize) {
        let token = &tokens[start];
        let value = match &token.kind {
            TokenKind::Str(v) => v.clone(),
            _ => unreachable!(),
        };

        self.add_string(&value);

        if let Some(extra) = tokens.get(start + 1) {
            self.error(extra, DiagKind::UnexpectedToken);
        }
    }

    fn parse_instruction(&mut self, tokens: &[Token], start: usize) {
        let mnemonic_token = &tokens[start];
        let mnemonic = match &mnemonic_token.kind {
            TokenKind::Ident(v) => v,
            _ => unreachable!(),
        };

        let opcode = match opcode_for_mnemonic(mnemonic) {
            Some(opcode) => opcode,
            None => {
                self.error(
                    mnemonic_token,
                    DiagKind::UnknownInstruction(mnemonic.clone()),
                );
                return;
            }
        };

        let arg_tokens = &tokens[start + 1..];
        let arg_count = arg_tokens
            .iter()
            .filter(|t| t.kind != TokenKind::ArgSeparator)
            .count();

        let error_len = arg_tokens
            .last()
            .map(|t| t.col + t.len - mnemonic_token.col)
            .unwrap_or(mnemonic_token.len);

        let is_pop = opcode.stack == Some(Stack::Pop);
        // A stack-popping opcode encodes no inline arguments; its bare form
        // takes none. The call form supplies one argument per stack
        // parameter and desugars to push instructions.
        let direct_count = if is_pop { 0 } else { opcode.params.len() };
        let call_form = is_pop && !self.manual_stack && arg_count == opcode.params.len();

        if opcode.is_varargs() {
            if arg_count < opcode.params.len() {
                self.error_at(
                    mnemonic_token.col,
                    error_len,
                    DiagKind::AtLeastArity {
                        expected: opcode.params.len(),
                        actual: arg_count,
                    },
                );
                return;
            }
        } else if arg_count != direct_count && !call_form {
            let expected = if is_pop && !self.manual_stack {
                opcode.params.len()
            } else {
                direct_count
            };
            self.error_at(
                mnemonic_token.col,
                error_len,
                DiagKind::Arity {
                    expected,
                    actual: arg_count,
                },
            );
            return;
        }

        if is_pop && !call_form {
            // Bare form; arguments were pushed explicitly.
            self.add_instruction(Instruction::new(opcode, Vec::new()));
            return;
        }

        let args = match self.parse_args(opcode, arg_tokens, is_pop) {
            Some(args) => args,
            None => return,
        };

        if is_pop {
            for parsed in &args {
                self.push_stack_arg(opcode, parsed);
            }
            self.add_instruction(Instruction::new(opcode, Vec::new()));
        } else {
            self.add_instruction(Instruction::new(
                opcode,
                args.into_iter().map(|a| a.arg).collect(),
            ));
        }
    }

    /// Synthesizes the push instruction for one call-form argument. The push
    /// variant is chosen from the parameter's declared kind; register tokens
    /// push the register itself.
    fn push_stack_arg(&mut self, opcode: &'static Opcode, parsed: &ParsedArg) {
        let param = &opcode.params[parsed.param_index];

        let (push_opcode, arg) = if parsed.is_register {
            if matches!(param.kind, Kind::RegTupRef(_)) {
                (&table::OP_ARG_PUSHB, parsed.arg.clone())
            } else {
                (&table::OP_ARG_PUSHR, parsed.arg.clone())
            }
        } else {
            match param.kind {
                Kind::Byte | Kind::RegRef | Kind::RegTupRef(_) => {
                    (&table::OP_ARG_PUSHB, parsed.arg.clone())
                }

                Kind::Word | Kind::ILabel | Kind::DLabel | Kind::SLabel => {
                    (&table::OP_ARG_PUSHW, parsed.arg.clone())
                }

                Kind::DWord => (&table::OP_ARG_PUSHL, parsed.arg.clone()),

                // Floats are pushed as their raw bits.
                Kind::Float => {
                    let bits = match parsed.arg.value {
                        Value::Float(f) => f.to_bits() as i32,
                        Value::Int(v) => (v as f32).to_bits() as i32,
                        Value::Str(_) => unreachable!(),
                    };
                    (&table::OP_ARG_PUSHL, Arg::int(bits, 4))
                }

                Kind::String => (&table::OP_ARG_PUSHS, parsed.arg.clone()),

                Kind::ILabelVar | Kind::RegRefVar | Kind::Pointer => {
                    unreachable!("parameter kind has no stack encoding")
                }
            }
        };

        self.add_instruction(Instruction::new(push_opcode, vec![arg]));
    }

    /// Parses the argument tokens against the opcode's parameters. Returns
    /// None when an argument was too malformed to translate.
    fn parse_args(
        &mut self,
        opcode: &'static Opcode,
        tokens: &[Token],
        stack: bool,
    ) -> Option<Vec<ParsedArg>> {
        let mut args = Vec::new();
        let mut semi_valid = true;
        let mut should_be_arg = true;
        let mut param_index = 0;

        for (i, token) in tokens.iter().enumerate() {
            let param = match opcode.params.get(param_index) {
                Some(param) => param,
                None => break,
            };

            if token.kind == TokenKind::ArgSeparator {
                if should_be_arg {
                    self.error(token, DiagKind::ExpectedArgument);
                } else if !param.is_varargs() {
                    param_index += 1;
                }

                should_be_arg = true;
                continue;
            }

            if !should_be_arg {
                let prev = &tokens[i - 1];
                let col = prev.col + prev.len;
                self.error_at(col, token.col - col, DiagKind::ExpectedComma);
            }

            should_be_arg = false;

            let mut type_match = true;
            let mut is_register = false;

            let arg = match &token.kind {
                TokenKind::Int(value) => match param.kind {
                    Kind::Byte => self.parse_int(token, *value, 1),
                    Kind::Word
                    | Kind::ILabel
                    | Kind::DLabel
                    | Kind::SLabel
                    | Kind::ILabelVar => self.parse_int(token, *value, 2),
                    Kind::DWord => Some(Arg::int(*value, 4)),
                    Kind::Float => Some(Arg::float(*value as f32)),
                    _ => {
                        type_match = false;
                        None
                    }
                },

                TokenKind::Float(value) => {
                    type_match = param.kind == Kind::Float;
                    if type_match {
                        Some(Arg::float(*value))
                    } else {
                        None
                    }
                }

                TokenKind::Register(value) => {
                    type_match = stack || param.kind.is_reg_ref();
                    is_register = true;

                    if *value > 255 {
                        self.error(token, DiagKind::InvalidRegister);
                        None
                    } else {
                        Some(Arg::int(*value, 1))
                    }
                }

                TokenKind::Str(value) => {
                    type_match = param.kind == Kind::String;
                    if type_match {
                        Some(Arg::str(value.clone()))
                    } else {
                        None
                    }
                }

                _ => {
                    type_match = false;
                    None
                }
            };

            if let Some(arg) = arg {
                if type_match {
                    args.push(ParsedArg {
                        arg,
                        param_index,
                        is_register,
                    });
                }
            }

            if !type_match {
                semi_valid = false;
                self.error(token, DiagKind::ExpectedType(expected_type(param.kind)));
            }
        }

        if semi_valid {
            Some(args)
        } else {
            None
        }
    }

    fn parse_int(&mut self, token: &Token, value: i32, size: u16) -> Option<Arg> {
        let bits = 8 * size as u8;
        // Minimum of the signed and maximum of the unsigned version of this
        // integer type.
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << bits) - 1;

        if (value as i64) < min {
            self.error(token, DiagKind::IntBelowMin { bits, min });
            None
        } else if (value as i64) > max {
            self.error(token, DiagKind::IntAboveMax { bits, max });
            None
        } else {
            Some(Arg::int(value, size))
        }
    }
}

struct ParsedArg {
    arg: Arg,
    param_index: usize,
    is_register: bool,
}

fn expected_type(kind: Kind) -> &'static str {
    match kind {
        Kind::Byte => "an 8-bit integer",
        Kind::Word => "a 16-bit integer",
        Kind::DWord => "a 32-bit integer",
        Kind::Float => "a float",
        Kind::ILabel | Kind::ILabelVar => "an instruction label",
        Kind::DLabel => "a data label",
        Kind::SLabel => "a string label",
        Kind::String => "a string",
        Kind::RegRef | Kind::RegTupRef(_) | Kind::RegRefVar => "a register reference",
        Kind::Pointer => "a pointer",
    }
}

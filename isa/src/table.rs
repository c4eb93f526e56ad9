//! The opcode catalog. Codes, parameter shapes and stack behavior mirror the
//! script engine's fixed encoding: a one-byte page plus the two-byte F8 and
//! F9 pages. Codes missing from this table are handled by placeholder lookup
//! in [`crate::opcode`].

use crate::opcode::{Opcode, Stack};
use crate::param::{Access, Kind, Param};

const fn p(kind: Kind) -> Param {
    Param {
        kind,
        doc: None,
        access: None,
    }
}

const fn pd(kind: Kind, doc: &'static str) -> Param {
    Param {
        kind,
        doc: Some(doc),
        access: None,
    }
}

/// Member of a register tuple.
const fn sub(kind: Kind, access: Access) -> Param {
    Param {
        kind,
        doc: None,
        access: Some(access),
    }
}

const fn subd(kind: Kind, access: Access, doc: &'static str) -> Param {
    Param {
        kind,
        doc: Some(doc),
        access: Some(access),
    }
}

const fn rtup(registers: &'static [Param]) -> Param {
    p(Kind::RegTupRef(registers))
}

const fn rvar(access: Access) -> Param {
    Param {
        kind: Kind::RegRefVar,
        doc: None,
        access: Some(access),
    }
}

const fn reg(access: Access) -> Param {
    Param {
        kind: Kind::RegRef,
        doc: None,
        access: Some(access),
    }
}

/// Single dword register, read.
const RD: &[Param] = &[sub(Kind::DWord, Access::Read)];
/// Single dword register, written.
const WD: &[Param] = &[sub(Kind::DWord, Access::Write)];
const RWD: &[Param] = &[sub(Kind::DWord, Access::ReadWrite)];
const WB: &[Param] = &[sub(Kind::Byte, Access::Write)];
const WW: &[Param] = &[sub(Kind::Word, Access::Write)];
const WPTR: &[Param] = &[sub(Kind::Pointer, Access::Write)];
const RF: &[Param] = &[sub(Kind::Float, Access::Read)];
const WF: &[Param] = &[sub(Kind::Float, Access::Write)];

// ----------------------------------------------------------------------------
// Page 0x00: control flow, registers, arithmetic, the argument stack.

pub static OP_NOP: Opcode = Opcode::new(0x00, "nop", Some("No operation, does nothing."), &[], None);
pub static OP_RET: Opcode = Opcode::new(0x01, "ret", Some("Returns control to the caller."), &[], None);
pub static OP_SYNC: Opcode = Opcode::new(
    0x02,
    "sync",
    Some("Yields control for the rest of the current frame."),
    &[],
    None,
);
pub static OP_EXIT: Opcode = Opcode::new(0x03, "exit", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_THREAD: Opcode = Opcode::new(
    0x04,
    "thread",
    Some("Starts a new thread. Thread execution will start at the given label."),
    &[p(Kind::ILabel)],
    None,
);
pub static OP_VA_START: Opcode = Opcode::new(
    0x05,
    "va_start",
    Some("Initializes a variable argument list. Make sure to call va_end after va_start and va_call."),
    &[],
    None,
);
pub static OP_VA_END: Opcode = Opcode::new(
    0x06,
    "va_end",
    Some("Restores the registers overwritten by arg_push* instructions. Called after va_call."),
    &[],
    None,
);
pub static OP_VA_CALL: Opcode = Opcode::new(
    0x07,
    "va_call",
    Some("Calls the variable argument function at the given label."),
    &[p(Kind::ILabel)],
    None,
);
pub static OP_LET: Opcode = Opcode::new(
    0x08,
    "let",
    Some("Sets the first register's value to the second one's value."),
    &[rtup(WD), rtup(RD)],
    None,
);
pub static OP_LETI: Opcode = Opcode::new(
    0x09,
    "leti",
    Some("Sets a register to the given value."),
    &[rtup(WD), p(Kind::DWord)],
    None,
);
pub static OP_LETB: Opcode = Opcode::new(
    0x0A,
    "letb",
    Some("Sets a register to the given value."),
    &[rtup(WB), p(Kind::Byte)],
    None,
);
pub static OP_LETW: Opcode = Opcode::new(
    0x0B,
    "letw",
    Some("Sets a register to the given value."),
    &[rtup(WW), p(Kind::Word)],
    None,
);
pub static OP_LETA: Opcode = Opcode::new(
    0x0C,
    "leta",
    Some("Sets the first register to the memory address of the second register."),
    &[rtup(WPTR), rtup(RD)],
    None,
);
pub static OP_LETO: Opcode = Opcode::new(
    0x0D,
    "leto",
    Some("Sets a register to the memory address of the given label."),
    &[rtup(WPTR), p(Kind::ILabel)],
    None,
);
pub static OP_SET: Opcode =
    Opcode::new(0x10, "set", Some("Sets a register to 1."), &[rtup(WD)], None);
pub static OP_CLEAR: Opcode =
    Opcode::new(0x11, "clear", Some("Sets a register to 0."), &[rtup(WD)], None);
pub static OP_REV: Opcode = Opcode::new(
    0x12,
    "rev",
    Some("Sets a register to 1 if its current value is 0, otherwise sets it to 0."),
    &[rtup(RWD)],
    None,
);
pub static OP_GSET: Opcode = Opcode::new(0x13, "gset", None, &[p(Kind::Word)], None);
pub static OP_GCLEAR: Opcode = Opcode::new(0x14, "gclear", None, &[p(Kind::Word)], None);
pub static OP_GREV: Opcode = Opcode::new(0x15, "grev", None, &[p(Kind::Word)], None);
pub static OP_GLET: Opcode = Opcode::new(0x16, "glet", None, &[p(Kind::Word)], None);
pub static OP_GGET: Opcode = Opcode::new(
    0x17,
    "gget",
    Some("Sets a register to the value of the given flag."),
    &[p(Kind::Word), rtup(WW)],
    None,
);
pub static OP_ADD: Opcode = Opcode::new(0x18, "add", None, &[rtup(WD), rtup(RD)], None);
pub static OP_ADDI: Opcode = Opcode::new(0x19, "addi", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_SUB: Opcode = Opcode::new(0x1A, "sub", None, &[rtup(WD), rtup(RD)], None);
pub static OP_SUBI: Opcode = Opcode::new(0x1B, "subi", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_MUL: Opcode = Opcode::new(0x1C, "mul", None, &[rtup(WD), rtup(RD)], None);
pub static OP_MULI: Opcode = Opcode::new(0x1D, "muli", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_DIV: Opcode = Opcode::new(0x1E, "div", None, &[rtup(WD), rtup(RD)], None);
pub static OP_DIVI: Opcode = Opcode::new(0x1F, "divi", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_AND: Opcode = Opcode::new(0x20, "and", None, &[rtup(WD), rtup(RD)], None);
pub static OP_ANDI: Opcode = Opcode::new(0x21, "andi", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_OR: Opcode = Opcode::new(0x22, "or", None, &[rtup(WD), rtup(RD)], None);
pub static OP_ORI: Opcode = Opcode::new(0x23, "ori", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_XOR: Opcode = Opcode::new(0x24, "xor", None, &[rtup(WD), rtup(RD)], None);
pub static OP_XORI: Opcode = Opcode::new(0x25, "xori", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_MOD: Opcode = Opcode::new(0x26, "mod", None, &[rtup(WD), rtup(RD)], None);
pub static OP_MODI: Opcode = Opcode::new(0x27, "modi", None, &[rtup(WD), p(Kind::DWord)], None);
pub static OP_JMP: Opcode = Opcode::new(0x28, "jmp", None, &[p(Kind::ILabel)], None);
pub static OP_CALL: Opcode = Opcode::new(0x29, "call", None, &[p(Kind::ILabel)], None);
pub static OP_JMP_ON: Opcode = Opcode::new(
    0x2A,
    "jmp_on",
    Some("Jumps if all given registers are non-zero."),
    &[p(Kind::ILabel), rvar(Access::Read)],
    None,
);
pub static OP_JMP_OFF: Opcode = Opcode::new(
    0x2B,
    "jmp_off",
    Some("Jumps if all given registers are zero."),
    &[p(Kind::ILabel), rvar(Access::Read)],
    None,
);
pub static OP_JMP_E: Opcode =
    Opcode::new(0x2C, "jmp_=", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_JMPI_E: Opcode =
    Opcode::new(0x2D, "jmpi_=", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_JMP_NE: Opcode =
    Opcode::new(0x2E, "jmp_!=", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_JMPI_NE: Opcode =
    Opcode::new(0x2F, "jmpi_!=", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_UJMP_G: Opcode =
    Opcode::new(0x30, "ujmp_>", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_UJMPI_G: Opcode =
    Opcode::new(0x31, "ujmpi_>", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_JMP_G: Opcode =
    Opcode::new(0x32, "jmp_>", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_JMPI_G: Opcode =
    Opcode::new(0x33, "jmpi_>", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_UJMP_L: Opcode =
    Opcode::new(0x34, "ujmp_<", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_UJMPI_L: Opcode =
    Opcode::new(0x35, "ujmpi_<", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_JMP_L: Opcode =
    Opcode::new(0x36, "jmp_<", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_JMPI_L: Opcode =
    Opcode::new(0x37, "jmpi_<", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_UJMP_GE: Opcode =
    Opcode::new(0x38, "ujmp_>=", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_UJMPI_GE: Opcode =
    Opcode::new(0x39, "ujmpi_>=", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_JMP_GE: Opcode =
    Opcode::new(0x3A, "jmp_>=", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_JMPI_GE: Opcode =
    Opcode::new(0x3B, "jmpi_>=", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_UJMP_LE: Opcode =
    Opcode::new(0x3C, "ujmp_<=", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_UJMPI_LE: Opcode =
    Opcode::new(0x3D, "ujmpi_<=", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_JMP_LE: Opcode =
    Opcode::new(0x3E, "jmp_<=", None, &[rtup(RD), rtup(RD), p(Kind::ILabel)], None);
pub static OP_JMPI_LE: Opcode =
    Opcode::new(0x3F, "jmpi_<=", None, &[rtup(RD), p(Kind::DWord), p(Kind::ILabel)], None);
pub static OP_SWITCH_JMP: Opcode =
    Opcode::new(0x40, "switch_jmp", None, &[rtup(RD), p(Kind::ILabelVar)], None);
pub static OP_SWITCH_CALL: Opcode =
    Opcode::new(0x41, "switch_call", None, &[rtup(RD), p(Kind::ILabelVar)], None);
pub static OP_STACK_PUSH: Opcode = Opcode::new(0x42, "stack_push", None, &[rtup(RD)], None);
pub static OP_STACK_POP: Opcode = Opcode::new(0x43, "stack_pop", None, &[rtup(WD)], None);
pub static OP_STACK_PUSHM: Opcode = Opcode::new(
    0x44,
    "stack_pushm",
    Some("Pushes the values of an arbitrary amount of registers onto the stack."),
    &[reg(Access::Read), p(Kind::DWord)],
    None,
);
pub static OP_STACK_POPM: Opcode = Opcode::new(
    0x45,
    "stack_popm",
    Some("Pops an arbitrary amount of values from the stack and writes them to registers."),
    &[reg(Access::Write), p(Kind::DWord)],
    None,
);
pub static OP_ARG_PUSHR: Opcode = Opcode::new(
    0x48,
    "arg_pushr",
    Some("Pushes the value of the given register onto the stack."),
    &[rtup(RD)],
    Some(Stack::Push),
);
pub static OP_ARG_PUSHL: Opcode = Opcode::new(
    0x49,
    "arg_pushl",
    Some("Pushes the given value onto the stack."),
    &[p(Kind::DWord)],
    Some(Stack::Push),
);
pub static OP_ARG_PUSHB: Opcode = Opcode::new(
    0x4A,
    "arg_pushb",
    Some("Pushes the given value onto the stack."),
    &[p(Kind::Byte)],
    Some(Stack::Push),
);
pub static OP_ARG_PUSHW: Opcode = Opcode::new(
    0x4B,
    "arg_pushw",
    Some("Pushes the given value onto the stack."),
    &[p(Kind::Word)],
    Some(Stack::Push),
);
pub static OP_ARG_PUSHA: Opcode = Opcode::new(
    0x4C,
    "arg_pusha",
    Some("Pushes the memory address of the given register onto the stack."),
    &[rtup(RD)],
    Some(Stack::Push),
);
pub static OP_ARG_PUSHO: Opcode = Opcode::new(
    0x4D,
    "arg_pusho",
    Some("Pushes the memory address of the given label onto the stack."),
    &[p(Kind::ILabel)],
    Some(Stack::Push),
);
pub static OP_ARG_PUSHS: Opcode = Opcode::new(
    0x4E,
    "arg_pushs",
    Some("Pushes the given value onto the stack."),
    &[p(Kind::String)],
    Some(Stack::Push),
);

// ----------------------------------------------------------------------------
// Page 0x00: messages, windows, handlers.

pub static OP_MESSAGE: Opcode = Opcode::new(
    0x50,
    "message",
    None,
    &[p(Kind::DWord), p(Kind::String)],
    Some(Stack::Pop),
);
pub static OP_LIST: Opcode = Opcode::new(
    0x51,
    "list",
    Some("Displays a list of items and writes the index selected by the player to the given register. List items are separated by newlines."),
    &[rtup(WB), p(Kind::String)],
    Some(Stack::Pop),
);
pub static OP_FADEIN: Opcode = Opcode::new(0x52, "fadein", None, &[], None);
pub static OP_FADEOUT: Opcode = Opcode::new(0x53, "fadeout", None, &[], None);
pub static OP_SE: Opcode = Opcode::new(0x54, "se", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_BGM: Opcode = Opcode::new(0x55, "bgm", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_ENABLE: Opcode =
    Opcode::new(0x58, "enable", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_DISABLE: Opcode =
    Opcode::new(0x59, "disable", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_WINDOW_MSG: Opcode =
    Opcode::new(0x5A, "window_msg", None, &[p(Kind::String)], Some(Stack::Pop));
pub static OP_ADD_MSG: Opcode =
    Opcode::new(0x5B, "add_msg", None, &[p(Kind::String)], Some(Stack::Pop));
pub static OP_MESEND: Opcode = Opcode::new(0x5C, "mesend", None, &[], None);
pub static OP_GETTIME: Opcode = Opcode::new(0x5D, "gettime", None, &[rtup(WD)], None);
pub static OP_WINEND: Opcode = Opcode::new(0x5E, "winend", None, &[], None);
pub static OP_SWITCH_ON: Opcode =
    Opcode::new(0x90, "switch_on", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_SWITCH_OFF: Opcode =
    Opcode::new(0x91, "switch_off", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_PLAYBGM_EPI: Opcode =
    Opcode::new(0x92, "playbgm_epi", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_SET_MAINWARP: Opcode =
    Opcode::new(0x93, "set_mainwarp", None, &[p(Kind::DWord)], Some(Stack::Pop));
pub static OP_SET_OBJ_PARAM: Opcode = Opcode::new(
    0x94,
    "set_obj_param",
    Some("Creates a targetable object."),
    &[
        rtup(&[
            subd(Kind::DWord, Access::Read, "X coordinate."),
            subd(Kind::DWord, Access::Read, "Y coordinate."),
            subd(Kind::DWord, Access::Read, "Z coordinate."),
            subd(Kind::DWord, Access::Read, "Collision radius."),
            subd(Kind::ILabel, Access::Read, "Function label."),
            subd(Kind::DWord, Access::Read, "Vertical position of the cursor."),
        ]),
        pd(Kind::RegTupRef(WD), "Object handle."),
    ],
    None,
);
pub static OP_SET_FLOOR_HANDLER: Opcode = Opcode::new(
    0x95,
    "set_floor_handler",
    None,
    &[
        pd(Kind::DWord, "Floor number."),
        pd(Kind::ILabel, "Handler function label."),
    ],
    Some(Stack::Pop),
);
pub static OP_CLR_FLOOR_HANDLER: Opcode = Opcode::new(
    0x96,
    "clr_floor_handler",
    None,
    &[pd(Kind::DWord, "Floor number.")],
    Some(Stack::Pop),
);

// ----------------------------------------------------------------------------
// Page 0xF8.

pub static OP_SET_CHAT_CALLBACK: Opcode = Opcode::new(
    0xF801,
    "set_chat_callback",
    None,
    &[rtup(RD), p(Kind::String)],
    Some(Stack::Pop),
);
pub static OP_GET_DIFFICULTY_LEVEL2: Opcode = Opcode::new(
    0xF808,
    "get_difficulty_level2",
    Some("Sets the given register to the current difficulty."),
    &[rtup(WD)],
    None,
);
pub static OP_GET_NUMBER_OF_PLAYER1: Opcode = Opcode::new(
    0xF809,
    "get_number_of_player1",
    Some("Sets the given register to the current number of players."),
    &[rtup(WD)],
    None,
);
pub static OP_GET_COORD_OF_PLAYER: Opcode = Opcode::new(
    0xF80A,
    "get_coord_of_player",
    Some("Retrieves a player's position."),
    &[
        rtup(&[
            subd(Kind::DWord, Access::Write, "X coordinate."),
            subd(Kind::DWord, Access::Write, "Y coordinate."),
            subd(Kind::DWord, Access::Write, "Z coordinate."),
        ]),
        rtup(&[subd(Kind::DWord, Access::Read, "Player slot.")]),
    ],
    None,
);
pub static OP_ENABLE_MAP: Opcode = Opcode::new(0xF80B, "enable_map", None, &[], None);
pub static OP_DISABLE_MAP: Opcode = Opcode::new(0xF80C, "disable_map", None, &[], None);
pub static OP_MAP_DESIGNATE_EX: Opcode = Opcode::new(
    0xF80D,
    "map_designate_ex",
    None,
    &[rtup(&[
        sub(Kind::DWord, Access::Read),
        sub(Kind::DWord, Access::Read),
        sub(Kind::DWord, Access::Read),
        sub(Kind::DWord, Access::Read),
        sub(Kind::DWord, Access::Read),
    ])],
    None,
);
pub static OP_SET_EPISODE: Opcode = Opcode::new(0xF8BC, "set_episode", None, &[p(Kind::DWord)], None);

// ----------------------------------------------------------------------------
// Page 0xF9.

pub static OP_FLET: Opcode = Opcode::new(0xF903, "flet", None, &[rtup(WF), rtup(RF)], None);
pub static OP_FLETI: Opcode = Opcode::new(0xF904, "fleti", None, &[rtup(WF), p(Kind::Float)], None);
pub static OP_FADD: Opcode = Opcode::new(0xF908, "fadd", None, &[rtup(WF), rtup(RF)], None);
pub static OP_FADDI: Opcode = Opcode::new(0xF909, "faddi", None, &[rtup(WF), p(Kind::Float)], None);
pub static OP_FSUB: Opcode = Opcode::new(0xF90A, "fsub", None, &[rtup(WF), rtup(RF)], None);
pub static OP_FSUBI: Opcode = Opcode::new(0xF90B, "fsubi", None, &[rtup(WF), p(Kind::Float)], None);
pub static OP_FMUL: Opcode = Opcode::new(0xF90C, "fmul", None, &[rtup(WF), rtup(RF)], None);
pub static OP_FMULI: Opcode = Opcode::new(0xF90D, "fmuli", None, &[rtup(WF), p(Kind::Float)], None);
pub static OP_FDIV: Opcode = Opcode::new(0xF90E, "fdiv", None, &[rtup(WF), rtup(RF)], None);
pub static OP_FDIVI: Opcode = Opcode::new(0xF90F, "fdivi", None, &[rtup(WF), p(Kind::Float)], None);
pub static OP_READ_GLOBAL_FLAG: Opcode = Opcode::new(
    0xF925,
    "read_global_flag",
    None,
    &[p(Kind::DWord), rtup(WD)],
    Some(Stack::Pop),
);
pub static OP_WRITE_GLOBAL_FLAG: Opcode = Opcode::new(
    0xF926,
    "write_global_flag",
    None,
    &[p(Kind::DWord), p(Kind::DWord)],
    Some(Stack::Pop),
);
pub static OP_BB_MAP_DESIGNATE: Opcode = Opcode::new(
    0xF951,
    "bb_map_designate",
    None,
    &[p(Kind::Byte), p(Kind::Word), p(Kind::Byte), p(Kind::Byte)],
    None,
);
pub static OP_BB_GET_NUMBER_IN_PACK: Opcode =
    Opcode::new(0xF952, "bb_get_number_in_pack", None, &[rtup(WD)], None);

/// Every catalogued opcode.
pub static OPCODES: &[&Opcode] = &[
    &OP_NOP,
    &OP_RET,
    &OP_SYNC,
    &OP_EXIT,
    &OP_THREAD,
    &OP_VA_START,
    &OP_VA_END,
    &OP_VA_CALL,
    &OP_LET,
    &OP_LETI,
    &OP_LETB,
    &OP_LETW,
    &OP_LETA,
    &OP_LETO,
    &OP_SET,
    &OP_CLEAR,
    &OP_REV,
    &OP_GSET,
    &OP_GCLEAR,
    &OP_GREV,
    &OP_GLET,
    &OP_GGET,
    &OP_ADD,
    &OP_ADDI,
    &OP_SUB,
    &OP_SUBI,
    &OP_MUL,
    &OP_MULI,
    &OP_DIV,
    &OP_DIVI,
    &OP_AND,
    &OP_ANDI,
    &OP_OR,
    &OP_ORI,
    &OP_XOR,
    &OP_XORI,
    &OP_MOD,
    &OP_MODI,
    &OP_JMP,
    &OP_CALL,
    &OP_JMP_ON,
    &OP_JMP_OFF,
    &OP_JMP_E,
    &OP_JMPI_E,
    &OP_JMP_NE,
    &OP_JMPI_NE,
    &OP_UJMP_G,
    &OP_UJMPI_G,
    &OP_JMP_G,
    &OP_JMPI_G,
    &OP_UJMP_L,
    &OP_UJMPI_L,
    &OP_JMP_L,
    &OP_JMPI_L,
    &OP_UJMP_GE,
    &OP_UJMPI_GE,
    &OP_JMP_GE,
    &OP_JMPI_GE,
    &OP_UJMP_LE,
    &OP_UJMPI_LE,
    &OP_JMP_LE,
    &OP_JMPI_LE,
    &OP_SWITCH_JMP,
    &OP_SWITCH_CALL,
    &OP_STACK_PUSH,
    &OP_STACK_POP,
    &OP_STACK_PUSHM,
    &OP_STACK_POPM,
    &OP_ARG_PUSHR,
    &OP_ARG_PUSHL,
    &OP_ARG_PUSHB,
    &OP_ARG_PUSHW,
    &OP_ARG_PUSHA,
    &OP_ARG_PUSHO,
    &OP_ARG_PUSHS,
    &OP_MESSAGE,
    &OP_LIST,
    &OP_FADEIN,
    &OP_FADEOUT,
    &OP_SE,
    &OP_BGM,
    &OP_ENABLE,
    &OP_DISABLE,
    &OP_WINDOW_MSG,
    &OP_ADD_MSG,
    &OP_MESEND,
    &OP_GETTIME,
    &OP_WINEND,
    &OP_SWITCH_ON,
    &OP_SWITCH_OFF,
    &OP_PLAYBGM_EPI,
    &OP_SET_MAINWARP,
    &OP_SET_OBJ_PARAM,
    &OP_SET_FLOOR_HANDLER,
    &OP_CLR_FLOOR_HANDLER,
    &OP_SET_CHAT_CALLBACK,
    &OP_GET_DIFFICULTY_LEVEL2,
    &OP_GET_NUMBER_OF_PLAYER1,
    &OP_GET_COORD_OF_PLAYER,
    &OP_ENABLE_MAP,
    &OP_DISABLE_MAP,
    &OP_MAP_DESIGNATE_EX,
    &OP_SET_EPISODE,
    &OP_FLET,
    &OP_FLETI,
    &OP_FADD,
    &OP_FADDI,
    &OP_FSUB,
    &OP_FSUBI,
    &OP_FMUL,
    &OP_FMULI,
    &OP_FDIV,
    &OP_FDIVI,
    &OP_READ_GLOBAL_FLAG,
    &OP_WRITE_GLOBAL_FLAG,
    &OP_BB_MAP_DESIGNATE,
    &OP_BB_GET_NUMBER_IN_PACK,
];

use std::collections::HashMap;
use std::sync::Mutex;

use bimap::BiMap;
use once_cell::sync::Lazy;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use strum::{Display, EnumString};

use crate::param::Param;
use crate::table::OPCODES;

/// How an instruction interacts with the implicit argument stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
pub enum Stack {
    /// Pushes its argument onto the stack.
    Push,
    /// Takes its parameters from the stack instead of inline arguments.
    Pop,
}

/// One instruction definition of the script VM.
///
/// Don't construct these directly; use the `OP_*` statics in [`crate::table`]
/// or the lookup functions below. There is exactly one `Opcode` per code and
/// the catalog is immutable once built.
#[derive(Debug)]
pub struct Opcode {
    /// 1- Or 2-byte big-endian representation as used in bytecode.
    pub code: u16,
    /// Textual representation as used in assembly.
    pub mnemonic: &'static str,
    pub doc: Option<&'static str>,
    /// Parameters passed inline or via the stack, depending on `stack`.
    pub params: &'static [Param],
    pub stack: Option<Stack>,
    /// Whether the workings of this opcode are documented. False for
    /// placeholder opcodes synthesized for uncatalogued codes.
    pub known: bool,
}

impl Opcode {
    pub const fn new(
        code: u16,
        mnemonic: &'static str,
        doc: Option<&'static str>,
        params: &'static [Param],
        stack: Option<Stack>,
    ) -> Self {
        Opcode {
            code,
            mnemonic,
            doc,
            params,
            stack,
            known: true,
        }
    }

    /// Byte size of the opcode itself, either 1 or 2.
    pub fn size(&self) -> usize {
        if self.code < 0x100 {
            1
        } else {
            2
        }
    }

    /// Whether the last parameter takes a variable number of arguments.
    pub fn is_varargs(&self) -> bool {
        self.params.last().map_or(false, Param::is_varargs)
    }
}

impl PartialEq for Opcode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Opcode {}

impl Serialize for Opcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Opcode", 2)?;
        s.serialize_field("code", &self.code)?;
        s.serialize_field("mnemonic", self.mnemonic)?;
        s.end()
    }
}

static BY_CODE: Lazy<HashMap<u16, &'static Opcode>> =
    Lazy::new(|| OPCODES.iter().map(|op| (op.code, *op)).collect());

static MNEMONIC_TO_CODE: Lazy<BiMap<&'static str, u16>> = Lazy::new(|| {
    let mut map = BiMap::new();
    for op in OPCODES {
        map.insert(op.mnemonic, op.code);
    }
    map
});

/// Placeholder opcodes interned per process, so repeated lookups of the same
/// uncatalogued code return the same `&'static Opcode`.
static PLACEHOLDERS: Lazy<Mutex<HashMap<u16, &'static Opcode>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Looks up an opcode by numeric code. Never fails: uncatalogued codes yield
/// a parameterless `unknown_<hex>` placeholder, so undocumented real-world
/// bytecode stays representable.
pub fn opcode_for_code(code: u16) -> &'static Opcode {
    if let Some(&op) = BY_CODE.get(&code) {
        return op;
    }


    let mut placeholders = PLACEHOLDERS.lock().unwrap();
    *placeholders.entry(code).or_insert_with(|| {
        Box::leak(Box::new(Opcode {
            code,
            mnemonic: Box::leak(format!("unknown_{:02x}", code).into_boxed_str()),
            doc: None,
            params: &[],
            stack: None,
            known: false,
        }))
    })
}

/// Looks up an opcode by mnemonic. `unknown_<hex>` mnemonics resolve through
/// [`opcode_for_code`], everything else through the catalog.
pub fn opcode_for_mnemonic(mnemonic: &str) -> Option<&'static Opcode> {
    if let Some(code) = MNEMONIC_TO_CODE.get_by_left(mnemonic) {
        return Some(opcode_for_code(*code));
    }

    let hex = mnemonic.strip_prefix("unknown_")?;

    if !(hex.len() == 2 || hex.len() == 4)
        || !hex.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return None;
    }

    let code = u16::from_str_radix(hex, 16).ok()?;

    if code > 0xFF && !matches!(code >> 8, 0xF8 | 0xF9) {
        return None;
    }

    Some(opcode_for_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_and_mnemonics_are_unique() {
        let mut codes = HashSet::new();
        let mut mnemonics = HashSet::new();

        for op in OPCODES {
            assert!(codes.insert(op.code), "duplicate code {:#04x}", op.code);
            assert!(mnemonics.insert(op.mnemonic), "duplicate {}", op.mnemonic);
            assert!(
                op.code < 0x100 || matches!(op.code >> 8, 0xF8 | 0xF9),
                "{} is outside the three code pages",
                op.mnemonic
            );
        }
    }

    #[test]
    fn lookup_by_code() {
        assert_eq!(opcode_for_code(0x01).mnemonic, "ret");
        assert_eq!(opcode_for_code(0xF8BC).mnemonic, "set_episode");
    }

    #[test]
    fn uncatalogued_code_yields_interned_placeholder() {
        let op = opcode_for_code(0xE7);
        assert_eq!(op.mnemonic, "unknown_e7");
        assert!(!op.known);
        assert!(op.params.is_empty());
        assert!(std::ptr::eq(op, opcode_for_code(0xE7)));
    }

    #[test]
    fn lookup_by_mnemonic() {
        assert_eq!(opcode_for_mnemonic("jmp").unwrap().code, 0x28);
        assert_eq!(opcode_for_mnemonic("jmp_>=").unwrap().code, 0x3A);
        assert!(opcode_for_mnemonic("frobnicate").is_none());
    }

    #[test]
    fn unknown_mnemonics_resolve_to_their_code() {
        assert_eq!(opcode_for_mnemonic("unknown_e7").unwrap().code, 0xE7);
        assert_eq!(opcode_for_mnemonic("unknown_f8ff").unwrap().code, 0xF8FF);
        assert!(opcode_for_mnemonic("unknown_").is_none());
        assert!(opcode_for_mnemonic("unknown_xyz").is_none());
        // Only the F8/F9 pages exist beyond the one-byte codes.
        assert!(opcode_for_mnemonic("unknown_abcd").is_none());
    }

    #[test]
    fn opcode_sizes() {
        assert_eq!(opcode_for_code(0x28).size(), 1);
        assert_eq!(opcode_for_code(0xF951).size(), 2);
    }
}

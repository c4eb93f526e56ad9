//! Wire contract between the editor and the worker. Only owned, copyable
//! data crosses the boundary; the field and tag names below are the
//! protocol.

use serde::{Deserialize, Serialize};

use isa::segment::Segment;
use qsasm::diag::Diagnostic;

/// Messages from the editor to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Replaces the entire line buffer.
    #[serde(rename = "new_assembly_input")]
    NewAssemblyInput { assembly: Vec<String> },

    /// Applies incremental range edits to the line buffer.
    #[serde(rename = "assembly_change_input")]
    AssemblyChangeInput { changes: Vec<EditRange> },
}

/// One range edit. Lines and columns are 1-based; the range end is
/// exclusive of `text`'s insertion point, like an editor selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRange {
    pub start_line: u32,
    pub end_line: u32,
    pub start_col: u32,
    pub end_col: u32,
    pub text: String,
}

/// Messages from the worker back to the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Result of one assembly pass over the current buffer.
    #[serde(rename = "new_object_code_output")]
    NewObjectCodeOutput {
        object_code: Vec<Segment>,
        errors: Vec<Diagnostic>,
    },
}

//! Control-flow graph over instruction segments, for static analysis such as
//! reachability checks. Register value-range analysis can be layered on top
//! of the block structure exposed here.

use std::collections::HashMap;

use isa::inst::{Instruction, Value};
use isa::segment::InstructionSegment;
use isa::table;

/// The way control flow leaves a basic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchType {
    /// Only the last block of a segment can simply run off the end.
    None,
    Return,
    /// Unconditional jump.
    Jump,
    /// Conditional or switch jump, possibly fanning out to several labels.
    ConditionalJump,
    /// Call, fanning out to one or more callees.
    Call,
}

/// Maximal straight-line instruction run: control only enters at the start
/// and only leaves at the end. Block contents are fixed at construction;
/// `from`/`to` hold block indices and are populated during edge linking.
#[derive(Debug)]
pub struct BasicBlock<'a> {
    pub segment: &'a InstructionSegment,
    /// Index of the first instruction of this block within the segment.
    pub start: usize,
    /// Index right after the last instruction of this block.
    pub end: usize,
    pub branch_type: BranchType,
    /// Jump targets or callees, depending on `branch_type`.
    pub branch_labels: Vec<u16>,
    /// Indices of the blocks that branch to this block.
    pub from: Vec<usize>,
    /// Indices of the blocks this block branches to.
    pub to: Vec<usize>,
}

impl<'a> BasicBlock<'a> {
    pub fn instructions(&self) -> &'a [Instruction] {
        &self.segment.instructions[self.start..self.end]
    }
}

#[derive(Debug)]
pub struct ControlFlowGraph<'a> {
    pub blocks: Vec<BasicBlock<'a>>,
    label_to_block: HashMap<u16, usize>,
}

impl<'a> ControlFlowGraph<'a> {
    pub fn create(segments: impl IntoIterator<Item = &'a InstructionSegment>) -> Self {
        let mut cfg = ControlFlowGraph {
            blocks: Vec::new(),
            label_to_block: HashMap::new(),
        };

        for segment in segments {
            cfg.create_basic_blocks(segment);
        }

        cfg.link_blocks();
        cfg
    }

    /// The block starting at the given label, if the label is defined.
    pub fn block_for_label(&self, label: u16) -> Option<&BasicBlock<'a>> {
        self.label_to_block.get(&label).map(|&i| &self.blocks[i])
    }

    fn create_basic_blocks(&mut self, segment: &'a InstructionSegment) {
        let len = segment.instructions.len();
        let mut start = 0;
        let mut first_block = true;

        for i in 0..len {
            let instruction = &segment.instructions[i];

            let (branch_type, branch_labels) = match classify(instruction) {
                Some(classified) => classified,
                None => {
                    if i == len - 1 {
                        // Trailing straight-line run of the segment.
                        (BranchType::None, Vec::new())
                    } else {
                        continue;
                    }
                }
            };

            let index = self.blocks.len();
            self.blocks.push(BasicBlock {
                segment,
                start,
                end: i + 1,
                branch_type,
                branch_labels,
                from: Vec::new(),
                to: Vec::new(),
            });

            if first_block {
                // All of the segment's labels name its first instruction.
                for label in &segment.labels {
                    self.label_to_block.insert(*label, index);
                }

                first_block = false;
            }

            start = i + 1;
        }
    }

    fn link_blocks(&mut self) {
        // Pairs of calling block and the block callees should return to.
        let mut callers = Vec::new();

        for i in 0..self.blocks.len() {
            let next = if i + 1 < self.blocks.len() {
                Some(i + 1)
            } else {
                None
            };

            match self.blocks[i].branch_type {
                BranchType::Return => {}

                BranchType::Call => {
                    if let Some(next) = next {
                        callers.push((i, next));
                    }
                }

                BranchType::None | BranchType::ConditionalJump => {
                    // Implicit fall-through to the next block in program
                    // order.
                    if let Some(next) = next {
                        self.link(i, next);
                    }
                }

                BranchType::Jump => {}
            }

            for j in 0..self.blocks[i].branch_labels.len() {
                let label = self.blocks[i].branch_labels[j];
                if let Some(&target) = self.label_to_block.get(&label) {
                    self.link(i, target);
                }
            }
        }

        for (caller, ret) in callers {
            self.link_returning_blocks(caller, ret);
        }
    }

    /// Links every return block reachable from the caller's callees to the
    /// block the caller should return to. Models call/return rather than
    /// inlining: a subroutine called from several sites accumulates one
    /// return edge per call site.
    fn link_returning_blocks(&mut self, caller: usize, ret: usize) {
        for j in 0..self.blocks[caller].branch_labels.len() {
            let label = self.blocks[caller].branch_labels[j];

            if let Some(&callee) = self.label_to_block.get(&label) {
                if self.blocks[callee].branch_type == BranchType::Return {
                    self.link(callee, ret);
                } else {
                    let mut encountered = vec![false; self.blocks.len()];
                    self.link_returning_blocks_recurse(&mut encountered, ret, callee);
                }
            }
        }
    }

    fn link_returning_blocks_recurse(
        &mut self,
        encountered: &mut Vec<bool>,
        ret: usize,
        block: usize,
    ) {
        if encountered[block] {
            return;
        }
        encountered[block] = true;

        for j in 0..self.blocks[block].to.len() {
            let to = self.blocks[block].to[j];

            if self.blocks[to].branch_type == BranchType::Return {
                self.link(to, ret);
            } else {
                self.link_returning_blocks_recurse(encountered, ret, to);
            }
        }
    }

    fn link(&mut self, from: usize, to: usize) {
        if !self.blocks[from].to.contains(&to) {
            self.blocks[from].to.push(to);
            self.blocks[to].from.push(from);
        }
    }
}

/// Branch classification for a control-transferring instruction, or None for
/// straight-line instructions.
fn classify(instruction: &Instruction) -> Option<(BranchType, Vec<u16>)> {
    let code = instruction.opcode.code;

    Some(match code {
        _ if code == table::OP_RET.code => (BranchType::Return, Vec::new()),

        _ if code == table::OP_JMP.code => (BranchType::Jump, label_args(instruction, 0)),

        _ if code == table::OP_JMP_ON.code || code == table::OP_JMP_OFF.code => {
            (BranchType::ConditionalJump, label_args(instruction, 0))
        }

        // The relational jumps take their target as third argument.
        _ if (table::OP_JMP_E.code..=table::OP_JMPI_LE.code).contains(&code) => {
            (BranchType::ConditionalJump, label_args(instruction, 2))
        }

        _ if code == table::OP_SWITCH_JMP.code => {
            (BranchType::ConditionalJump, label_args_from(instruction, 1))
        }

        _ if code == table::OP_CALL.code || code == table::OP_VA_CALL.code => {
            (BranchType::Call, label_args(instruction, 0))
        }

        _ if code == table::OP_SWITCH_CALL.code => {
            (BranchType::Call, label_args_from(instruction, 1))
        }

        _ => return None,
    })
}

fn label_args(instruction: &Instruction, index: usize) -> Vec<u16> {
    instruction
        .args
        .get(index)
        .and_then(as_label)
        .into_iter()
        .collect()
}

fn label_args_from(instruction: &Instruction, index: usize) -> Vec<u16> {
    instruction
        .args
        .iter()
        .skip(index)
        .filter_map(as_label)
        .collect()
}

fn as_label(arg: &isa::inst::Arg) -> Option<u16> {
    match arg.value {
        Value::Int(v) if (0..=0xFFFF).contains(&v) => Some(v as u16),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use isa::segment::ObjectCode;

    fn build(source: &[&str]) -> ObjectCode {
        let lines: Vec<String> = source.iter().map(|s| s.to_string()).collect();
        let assembly = assemble(&lines, false);
        assert!(
            assembly.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            assembly.diagnostics
        );
        assembly.object_code
    }

    #[test]
    fn single_return_block() {
        let object_code = build(&["0:", "    ret"]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 1);
        assert_eq!(cfg.blocks[0].branch_type, BranchType::Return);
        assert!(cfg.blocks[0].from.is_empty());
        assert!(cfg.blocks[0].to.is_empty());
    }

    #[test]
    fn unconditional_jump_links_to_target() {
        let object_code = build(&["0:", "    jmp 1", "1:", "    ret"]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 2);
        assert_eq!(cfg.blocks[0].branch_type, BranchType::Jump);
        assert_eq!(cfg.blocks[0].to, vec![1]);
        assert_eq!(cfg.blocks[1].from, vec![0]);
        assert!(cfg.blocks[1].to.is_empty());
    }

    #[test]
    fn same_line_labels_start_their_own_segment() {
        let object_code = build(&["0: jmp 1", "1: ret"]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 2);
        assert_eq!(cfg.blocks[0].to, vec![1]);
    }

    #[test]
    fn call_links_through_callee_return() {
        let object_code = build(&["0:", "    call 1", "    ret", "1:", "    ret"]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(cfg.blocks[0].branch_type, BranchType::Call);
        assert_eq!(cfg.blocks[1].branch_type, BranchType::Return);
        assert_eq!(cfg.blocks[2].branch_type, BranchType::Return);

        // The call block links to the callee's entry; the callee's return
        // block links back to the instruction following the call.
        assert_eq!(cfg.blocks[0].to, vec![2]);
        assert_eq!(cfg.blocks[2].to, vec![1]);
        assert_eq!(cfg.blocks[1].from, vec![2]);
    }

    #[test]
    fn callee_returns_link_to_every_call_site() {
        let object_code = build(&[
            "0:",
            "    call 5",
            "    call 5",
            "    ret",
            "5:",
            "    ret",
        ]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 4);
        // One synthetic return edge per call site.
        assert_eq!(cfg.blocks[3].to, vec![1, 2]);
    }

    #[test]
    fn conditional_jump_has_label_and_fall_through_edges() {
        let object_code = build(&[
            "0:",
            "    jmp_> r1, r2, 1",
            "    nop",
            "1:",
            "    nop",
            "    ret",
        ]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(cfg.blocks[0].branch_type, BranchType::ConditionalJump);
        // Fall-through edge to the next block plus the explicit label edge.
        assert_eq!(cfg.blocks[0].to, vec![1, 2]);
        assert_eq!(cfg.blocks[1].branch_type, BranchType::None);
        assert_eq!(cfg.blocks[1].to, vec![2]);
    }

    #[test]
    fn switch_jmp_fans_out() {
        let object_code = build(&[
            "0:",
            "    switch_jmp r1, 1, 2",
            "1:",
            "    ret",
            "2:",
            "    ret",
        ]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.blocks.len(), 3);
        assert_eq!(cfg.blocks[0].branch_labels, vec![1, 2]);
        // Fall-through first, then the label edges in declared order.
        assert_eq!(cfg.blocks[0].to, vec![1, 2]);
        assert_eq!(cfg.blocks[2].from, vec![0]);
    }

    #[test]
    fn block_for_label_finds_segment_entry() {
        let object_code = build(&["0:", "    nop", "    ret", "1:", "    ret"]);
        let cfg = ControlFlowGraph::create(object_code.instruction_segments());

        assert_eq!(cfg.block_for_label(0).unwrap().start, 0);
        assert_eq!(cfg.block_for_label(1).unwrap().segment.labels, vec![1]);
        assert!(cfg.block_for_label(9).is_none());
    }
}

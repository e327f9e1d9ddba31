use crate::error::*;
use crate::ir::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The location of one instruction in a control flow graph.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Site {
    block: usize,
    instruction: usize,
}

impl Site {
    pub fn new(block: usize, instruction: usize) -> Site {
        Site { block, instruction }
    }

    pub fn block(&self) -> usize {
        self.block
    }

    pub fn instruction(&self) -> usize {
        self.instruction
    }

    /// Resolve this site to the instruction it names.
    pub fn apply<'c>(&self, control_flow_graph: &'c ControlFlowGraph) -> Result<&'c Instruction> {
        control_flow_graph
            .block(self.block)?
            .instruction(self.instruction)
            .ok_or_else(|| {
                ErrorKind::MalformedControlFlowGraph(format!("no instruction at {}", self)).into()
            })
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}:{:02X}", self.block, self.instruction)
    }
}

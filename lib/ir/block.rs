use crate::ir::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Block {
    index: usize,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    instructions: Vec<Instruction>,
}

impl Block {
    pub fn new(index: usize, label: Option<String>) -> Block {
        Block {
            index,
            label,
            instructions: Vec::new(),
        }
    }

    /// Find the next instruction index, which is one more than the greatest
    /// existing index, or 0 for an empty block.
    fn next_index(&self) -> usize {
        self.instructions()
            .iter()
            .map(|instruction| instruction.index() + 1)
            .max()
            .unwrap_or(0)
    }
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    /// The name this block is reported under: its label, or its index when
    /// it has none.
    pub fn identifier(&self) -> String {
        match self.label() {
            Some(label) => label.to_string(),
            None => format!("0x{:02x}", self.index()),
        }
    }
    pub fn instruction(&self, index: usize) -> Option<&Instruction> {
        self.instructions()
            .iter()
            .find(|instruction| instruction.index() == index)
    }
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Append an operation to the end of the block, returning the index of
    /// the new instruction.
    pub fn append(&mut self, operation: Operation) -> usize {
        let index = self.next_index();
        self.instructions.push(Instruction::new(index, operation));
        index
    }
    pub fn write<D: Into<Operand>, S: Into<Operand>>(&mut self, dst: D, src: S) -> usize {
        self.append(Operation::write(dst, src))
    }
    pub fn declare(&mut self, dst: Scalar) -> usize {
        self.append(Operation::declare(dst))
    }
    pub fn unsupported<S: Into<String>>(&mut self, opcode: S) -> usize {
        self.append(Operation::unsupported(opcode))
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.label() {
            Some(label) => writeln!(f, "[ Block 0x{:02x} {} ]", self.index(), label)?,
            None => writeln!(f, "[ Block 0x{:02x} ]", self.index())?,
        }
        for instruction in self.instructions() {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

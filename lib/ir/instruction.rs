use crate::ir::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Instruction {
    index: usize,
    operation: Operation,
    #[serde(default)]
    comment: Option<String>,
}

impl Instruction {
    pub fn new(index: usize, operation: Operation) -> Instruction {
        Instruction {
            index,
            operation,
            comment: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let comment = self
            .comment()
            .map(|comment| format!(" // {}", comment))
            .unwrap_or_default();

        write!(f, "{:02X} {}{}", self.index(), self.operation(), comment)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A control flow edge from the block `head` to the block `tail`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Edge {
    head: usize,
    tail: usize,
    #[serde(default)]
    comment: Option<String>,
}

impl Edge {
    pub fn new(head: usize, tail: usize) -> Edge {
        Edge {
            head,
            tail,
            comment: None,
        }
    }

    pub fn head(&self) -> usize {
        self.head
    }
    pub fn tail(&self) -> usize {
        self.tail
    }
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(0x{:x} -> 0x{:x})", self.head(), self.tail())
    }
}

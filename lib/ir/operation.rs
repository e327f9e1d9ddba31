use crate::ir::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Operation {
    /// Write `src` to the storage location `dst`.
    Write { dst: Operand, src: Operand },
    /// Bring `dst` into existence without a value.
    Declare { dst: Scalar },
    /// An instruction the ingestion layer could not reduce to a write or a
    /// declaration.
    Unsupported { opcode: String },
}

impl Operation {
    pub fn write<D, S>(dst: D, src: S) -> Operation
    where
        D: Into<Operand>,
        S: Into<Operand>,
    {
        Operation::Write {
            dst: dst.into(),
            src: src.into(),
        }
    }

    pub fn declare(dst: Scalar) -> Operation {
        Operation::Declare { dst }
    }

    pub fn unsupported<S: Into<String>>(opcode: S) -> Operation {
        Operation::Unsupported {
            opcode: opcode.into(),
        }
    }

    /// The location this operation writes a value to, if it is a write.
    pub fn variable_written(&self) -> Option<&Operand> {
        match self {
            Operation::Write { dst, .. } => Some(dst),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Write { dst, src } => write!(f, "{} = {}", dst, src),
            Operation::Declare { dst } => write!(f, "declare {}", dst),
            Operation::Unsupported { opcode } => write!(f, "{}", opcode),
        }
    }
}

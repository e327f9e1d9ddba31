use crate::ir::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Either side of a write: a named variable, or a literal integer.
///
/// A write target may itself be a constant, in which case it is compared and
/// displayed by its value.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Operand {
    Scalar(Scalar),
    Constant(Constant),
}

impl From<Scalar> for Operand {
    fn from(scalar: Scalar) -> Operand {
        Operand::Scalar(scalar)
    }
}

impl From<Constant> for Operand {
    fn from(constant: Constant) -> Operand {
        Operand::Constant(constant)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Scalar(scalar) => scalar.fmt(f),
            Operand::Constant(constant) => constant.fmt(f),
        }
    }
}

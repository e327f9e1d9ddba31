//! The control flow graph model consumed by the analysis.
//!
//! Instructions are reduced to the two events reaching definitions cares
//! about: a write of a value to a variable, and the declaration of a variable
//! without a value. Anything else an ingestion layer could not classify is
//! carried as [`Operation::Unsupported`] and rejected (or skipped) at the
//! analysis boundary.

mod block;
mod constant;
mod control_flow_graph;
mod edge;
mod instruction;
mod location;
mod operand;
mod operation;
mod scalar;

pub use self::block::Block;
pub use self::constant::Constant;
pub use self::control_flow_graph::ControlFlowGraph;
pub use self::edge::Edge;
pub use self::instruction::Instruction;
pub use self::location::Site;
pub use self::operand::Operand;
pub use self::operation::Operation;
pub use self::scalar::Scalar;

pub fn scalar<S: Into<String>>(name: S) -> Scalar {
    Scalar::new(name)
}

pub fn const_(value: i64) -> Constant {
    Constant::new(value)
}

//! Reaching definitions, from per-block GEN/KILL sets to a rendered report.

pub mod fixed_point;

mod block_sets;
mod catalog;
mod definition;
mod definition_set;
mod reaching_definitions;
mod report;

pub use self::block_sets::{build_gen, build_kill, BlockSets};
pub use self::catalog::{DefinitionCatalog, DefinitionId};
pub use self::definition::Definition;
pub use self::definition_set::DefinitionSet;
pub use self::reaching_definitions::{reaching_definitions, ReachingDefinitions};
pub use self::report::{BlockReport, Report};

//! Reaching definitions over a basic-block control flow graph.
//!
//! A host hands over an already-built [`ir::ControlFlowGraph`] whose
//! instructions are either writes or declarations. [`analyze`] computes, for
//! every block, the set of definitions which may reach the end of that block,
//! and renders them as a canonical [`analysis::Report`].
//!
//! ```
//! use raptor_rd::ir;
//!
//! let mut cfg = ir::ControlFlowGraph::new();
//! let entry = cfg.insert_block(Some("entry"));
//! cfg.block_mut(entry).unwrap().write(ir::scalar("x"), ir::const_(1));
//! let exit = cfg.insert_block(Some("exit"));
//! cfg.insert_edge(ir::Edge::new(entry, exit)).unwrap();
//!
//! let report = raptor_rd::analyze(&cfg).unwrap();
//! assert_eq!(report.to_string(), "entry: (x=1)\nexit: (x=1)\n");
//! ```

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

pub mod analysis;
pub mod config;
pub mod ir;

pub use crate::config::{AnalysisConfig, UnsupportedPolicy};

pub mod error {
    error_chain! {
        types {
            Error, ErrorKind, ResultExt, Result;
        }

        errors {
            UnsupportedInstructionKind(block: usize, instruction: usize, opcode: String) {
                description("An instruction was neither a write nor a declaration")
                display("Unsupported instruction \"{}\" at block 0x{:x}, instruction 0x{:x}",
                    opcode, block, instruction)
            }
            MalformedControlFlowGraph(m: String) {
                description("The control flow graph is malformed")
                display("Malformed control flow graph: {}", m)
            }
            FixedPointDiverged(passes: usize) {
                description("The fixed point did not converge")
                display("Fixed point did not converge after {} passes", passes)
            }
        }
    }
}

/// Compute reaching definitions for `control_flow_graph` with the default
/// configuration and render every block's OUT set.
pub fn analyze(control_flow_graph: &ir::ControlFlowGraph) -> error::Result<analysis::Report> {
    analyze_with(control_flow_graph, &AnalysisConfig::default())
}

/// Compute reaching definitions for `control_flow_graph` and render every
/// block's OUT set.
pub fn analyze_with(
    control_flow_graph: &ir::ControlFlowGraph,
    config: &AnalysisConfig,
) -> error::Result<analysis::Report> {
    let reaching_definitions = analysis::reaching_definitions(control_flow_graph, config)?;
    analysis::Report::out_sets(control_flow_graph, &reaching_definitions)
}

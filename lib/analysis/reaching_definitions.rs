use crate::analysis::fixed_point::Solver;
use crate::analysis::{BlockSets, DefinitionCatalog};
use crate::config::AnalysisConfig;
use crate::error::*;
use crate::ir;
use std::collections::HashMap;

/// Compute reaching definitions for the given control flow graph.
pub fn reaching_definitions(
    control_flow_graph: &ir::ControlFlowGraph,
    config: &AnalysisConfig,
) -> Result<ReachingDefinitions> {
    Solver::new(control_flow_graph, config)?.solve()
}

/// The converged result of a reaching definitions run.
#[derive(Clone, Debug)]
pub struct ReachingDefinitions {
    catalog: DefinitionCatalog,
    states: HashMap<usize, BlockSets>,
    passes: usize,
}

impl ReachingDefinitions {
    pub(crate) fn new(
        catalog: DefinitionCatalog,
        states: HashMap<usize, BlockSets>,
        passes: usize,
    ) -> ReachingDefinitions {
        ReachingDefinitions {
            catalog,
            states,
            passes,
        }
    }

    /// Every definition in the procedure.
    pub fn catalog(&self) -> &DefinitionCatalog {
        &self.catalog
    }

    pub fn block_sets(&self, index: usize) -> Result<&BlockSets> {
        self.states.get(&index).ok_or_else(|| {
            ErrorKind::MalformedControlFlowGraph(format!("no block 0x{:x}", index)).into()
        })
    }

    /// Number of passes the solver needed, including the final pass which
    /// changed nothing.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

//! A round-robin fixed-point solver for reaching definitions.
//!
//! Every block starts with `OUT = GEN` and an empty IN. A pass then visits
//! every block except the entry, in program order, and applies
//!
//! ```text
//! IN[B]  = ∪ OUT[P] for every predecessor P of B
//! OUT[B] = (IN[B] - KILL[B]) ∪ GEN[B]
//! ```
//!
//! Updates are visible to the blocks visited later in the same pass. Passes
//! repeat until one changes no OUT set. The entry block is never visited, so
//! its OUT stays equal to its GEN.

use crate::analysis::{
    build_gen, build_kill, BlockSets, DefinitionCatalog, DefinitionSet, ReachingDefinitions,
};
use crate::config::AnalysisConfig;
use crate::error::*;
use crate::ir;
use std::collections::HashMap;

pub struct Solver<'f> {
    control_flow_graph: &'f ir::ControlFlowGraph,
    catalog: DefinitionCatalog,
    states: HashMap<usize, BlockSets>,
    /// Non-entry blocks in program order, with their predecessors.
    schedule: Vec<(usize, Vec<usize>)>,
    passes: usize,
    max_passes: Option<usize>,
}

impl<'f> Solver<'f> {
    /// Build GEN and KILL for every block of `control_flow_graph` and set up
    /// the initial state.
    pub fn new(
        control_flow_graph: &'f ir::ControlFlowGraph,
        config: &AnalysisConfig,
    ) -> Result<Solver<'f>> {
        control_flow_graph.validate()?;

        let mut catalog = DefinitionCatalog::new();
        let mut gens = Vec::new();
        for block in control_flow_graph.blocks() {
            gens.push(build_gen(block, &mut catalog, config)?);
        }

        let mut states = HashMap::new();
        for (block, gen) in control_flow_graph.blocks().zip(gens) {
            let kill = build_kill(block, &gen, &catalog, config)?;
            states.insert(block.index(), BlockSets::new(gen, kill));
        }

        let mut schedule = Vec::new();
        for block in control_flow_graph.blocks().skip(1) {
            let predecessors = control_flow_graph.predecessors(block.index())?;
            schedule.push((block.index(), predecessors));
        }

        debug!(
            "reaching definitions over {} blocks, {} definitions",
            control_flow_graph.num_blocks(),
            catalog.len()
        );

        Ok(Solver {
            control_flow_graph,
            catalog,
            states,
            schedule,
            passes: 0,
            max_passes: config.max_passes(),
        })
    }

    pub fn control_flow_graph(&self) -> &'f ir::ControlFlowGraph {
        self.control_flow_graph
    }

    pub fn catalog(&self) -> &DefinitionCatalog {
        &self.catalog
    }

    /// The current sets of the block with the given index.
    pub fn block_sets(&self, index: usize) -> Result<&BlockSets> {
        self.states.get(&index).ok_or_else(|| {
            ErrorKind::MalformedControlFlowGraph(format!("no block 0x{:x}", index)).into()
        })
    }

    /// Number of passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Run one pass over every non-entry block. Returns true if any block's
    /// OUT set changed.
    pub fn pass(&mut self) -> Result<bool> {
        let mut changed = false;

        for (index, predecessors) in &self.schedule {
            let mut in_set = DefinitionSet::new();
            for predecessor in predecessors {
                in_set.extend(self.block_sets(*predecessor)?.out_set().iter());
            }

            let states = self.states.get_mut(index).ok_or_else(|| {
                Error::from(ErrorKind::MalformedControlFlowGraph(format!(
                    "no block 0x{:x}",
                    index
                )))
            })?;

            let out_set = in_set.difference(&states.kill).join(&states.gen);
            if out_set != states.out_set {
                trace!(
                    "block 0x{:x} OUT {} -> {} definitions",
                    index,
                    states.out_set.len(),
                    out_set.len()
                );
                changed = true;
            }
            states.in_set = in_set;
            states.out_set = out_set;
        }

        self.passes += 1;
        debug!("pass {} changed: {}", self.passes, changed);
        Ok(changed)
    }

    /// Run passes until one changes nothing.
    ///
    /// With a pass cap, fails once pass number `max_passes` still changes an
    /// OUT set. A pass that changes nothing always ends the run, so a graph
    /// that is already stable converges under any cap.
    pub fn solve(mut self) -> Result<ReachingDefinitions> {
        while self.pass()? {
            if let Some(max_passes) = self.max_passes {
                if self.passes >= max_passes {
                    return Err(ErrorKind::FixedPointDiverged(self.passes).into());
                }
            }
        }

        debug!("reaching definitions converged after {} passes", self.passes);

        Ok(ReachingDefinitions::new(
            self.catalog,
            self.states,
            self.passes,
        ))
    }
}

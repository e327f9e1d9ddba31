use crate::analysis::{BlockSets, DefinitionSet, ReachingDefinitions};
use crate::error::*;
use crate::ir;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The rendered definitions of one block.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BlockReport {
    index: usize,
    identifier: String,
    definitions: Vec<String>,
}

impl BlockReport {
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    /// Rendered definitions, deduplicated and sorted.
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }
}

impl fmt::Display for BlockReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.identifier)?;
        for definition in &self.definitions {
            write!(f, " {}", definition)?;
        }
        Ok(())
    }
}

/// A canonical listing of one set per block, in program order.
///
/// Definitions are compared by their rendered text here, so two definitions
/// from different sites which render the same are listed once.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Report {
    blocks: Vec<BlockReport>,
}

impl Report {
    /// Render the OUT set of every block.
    pub fn out_sets(
        control_flow_graph: &ir::ControlFlowGraph,
        reaching_definitions: &ReachingDefinitions,
    ) -> Result<Report> {
        Report::render(control_flow_graph, reaching_definitions, BlockSets::out_set)
    }

    /// Render the IN set of every block.
    pub fn in_sets(
        control_flow_graph: &ir::ControlFlowGraph,
        reaching_definitions: &ReachingDefinitions,
    ) -> Result<Report> {
        Report::render(control_flow_graph, reaching_definitions, BlockSets::in_set)
    }

    fn render<F>(
        control_flow_graph: &ir::ControlFlowGraph,
        reaching_definitions: &ReachingDefinitions,
        select: F,
    ) -> Result<Report>
    where
        F: Fn(&BlockSets) -> &DefinitionSet,
    {
        let catalog = reaching_definitions.catalog();
        let mut blocks = Vec::new();

        for block in control_flow_graph.blocks() {
            let set = select(reaching_definitions.block_sets(block.index())?);
            let mut definitions = BTreeSet::new();
            for id in set.iter() {
                definitions.insert(catalog.get(id)?.to_string());
            }
            blocks.push(BlockReport {
                index: block.index(),
                identifier: block.identifier(),
                definitions: definitions.into_iter().collect(),
            });
        }

        Ok(Report { blocks })
    }

    pub fn blocks(&self) -> &[BlockReport] {
        &self.blocks
    }

    /// Find a block's report by its label, or by its index rendered as
    /// `0x..` when it has no label.
    pub fn block(&self, identifier: &str) -> Option<&BlockReport> {
        self.blocks
            .iter()
            .find(|block| block.identifier == identifier)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }
        Ok(())
    }
}

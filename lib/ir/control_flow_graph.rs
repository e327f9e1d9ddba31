use crate::error::*;
use crate::ir::*;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::convert::TryFrom;
use std::fmt;

/// Basic blocks in program order, and the edges between them.
///
/// The first block is the entry block.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(try_from = "Listing", into = "Listing")]
pub struct ControlFlowGraph {
    graph: StableDiGraph<Block, Edge>,
    /// Nodes in program order.
    order: Vec<NodeIndex>,
    nodes: HashMap<usize, NodeIndex>,
}

/// The serialized form of a `ControlFlowGraph`.
#[derive(Deserialize, Serialize)]
struct Listing {
    blocks: Vec<Block>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl ControlFlowGraph {
    pub fn new() -> ControlFlowGraph {
        ControlFlowGraph::default()
    }

    /// Append a new, empty block, returning its index.
    pub fn insert_block<S: Into<String>>(&mut self, label: Option<S>) -> usize {
        let index = self
            .nodes
            .keys()
            .map(|index| index + 1)
            .max()
            .unwrap_or(0);
        self.push_block(Block::new(index, label.map(|label| label.into())));
        index
    }

    fn push_block(&mut self, block: Block) {
        let index = block.index();
        let node = self.graph.add_node(block);
        self.order.push(node);
        self.nodes.insert(index, node);
    }

    /// Append a block that already carries its index.
    fn append_block(&mut self, block: Block) -> Result<()> {
        if self.has_block(block.index()) {
            return Err(ErrorKind::MalformedControlFlowGraph(format!(
                "duplicate block 0x{:x}",
                block.index()
            ))
            .into());
        }
        self.push_block(block);
        Ok(())
    }

    /// Insert an edge between two blocks already in the graph. There is at
    /// most one edge from any block to any other, whatever its comment.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<()> {
        let head = self.edge_end(&edge, edge.head())?;
        let tail = self.edge_end(&edge, edge.tail())?;
        if self.graph.find_edge(head, tail).is_some() {
            return Err(
                ErrorKind::MalformedControlFlowGraph(format!("duplicate edge {}", edge)).into(),
            );
        }
        self.graph.add_edge(head, tail, edge);
        Ok(())
    }

    fn edge_end(&self, edge: &Edge, index: usize) -> Result<NodeIndex> {
        self.nodes.get(&index).cloned().ok_or_else(|| {
            ErrorKind::MalformedControlFlowGraph(format!(
                "edge {} references missing block 0x{:x}",
                edge, index
            ))
            .into()
        })
    }

    fn node(&self, index: usize) -> Result<NodeIndex> {
        self.nodes.get(&index).cloned().ok_or_else(|| {
            ErrorKind::MalformedControlFlowGraph(format!("no block 0x{:x}", index)).into()
        })
    }

    /// Check that instruction indices are unique within each block.
    ///
    /// Block indices and edges are checked as the graph is built.
    pub fn validate(&self) -> Result<()> {
        for block in self.blocks() {
            let mut instruction_indices = HashSet::new();
            for instruction in block.instructions() {
                if !instruction_indices.insert(instruction.index()) {
                    return Err(ErrorKind::MalformedControlFlowGraph(format!(
                        "duplicate instruction {}",
                        Site::new(block.index(), instruction.index())
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// The index of the entry block, which is the first block in program
    /// order.
    pub fn entry(&self) -> Option<usize> {
        self.order.first().map(|node| self.graph[*node].index())
    }

    pub fn has_block(&self, index: usize) -> bool {
        self.nodes.contains_key(&index)
    }
    pub fn block(&self, index: usize) -> Result<&Block> {
        let node = self.node(index)?;
        Ok(&self.graph[node])
    }
    pub fn block_mut(&mut self, index: usize) -> Result<&mut Block> {
        let node = self.node(index)?;
        Ok(&mut self.graph[node])
    }
    /// All blocks, in program order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.order.iter().map(move |node| &self.graph[*node])
    }
    pub fn num_blocks(&self) -> usize {
        self.order.len()
    }

    /// All edges, in the order they were inserted.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.graph.edge_indices().map(move |edge| &self.graph[edge])
    }

    fn neighbors(&self, index: usize, direction: Direction) -> Result<Vec<usize>> {
        let mut neighbors = self
            .graph
            .neighbors_directed(self.node(index)?, direction)
            .map(|node| self.graph[node].index())
            .collect::<Vec<usize>>();
        // petgraph walks the most recently inserted edge first
        neighbors.reverse();
        Ok(neighbors)
    }

    /// Indices of the immediate predecessors of a block, in the order their
    /// edges were inserted.
    pub fn predecessors(&self, index: usize) -> Result<Vec<usize>> {
        self.neighbors(index, Direction::Incoming)
    }
    /// Indices of the immediate successors of a block.
    pub fn successors(&self, index: usize) -> Result<Vec<usize>> {
        self.neighbors(index, Direction::Outgoing)
    }
}

impl TryFrom<Listing> for ControlFlowGraph {
    type Error = Error;

    fn try_from(listing: Listing) -> Result<ControlFlowGraph> {
        let mut control_flow_graph = ControlFlowGraph::new();
        for block in listing.blocks {
            control_flow_graph.append_block(block)?;
        }
        for edge in listing.edges {
            control_flow_graph.insert_edge(edge)?;
        }
        control_flow_graph.validate()?;
        Ok(control_flow_graph)
    }
}

impl From<ControlFlowGraph> for Listing {
    fn from(control_flow_graph: ControlFlowGraph) -> Listing {
        Listing {
            blocks: control_flow_graph.blocks().cloned().collect(),
            edges: control_flow_graph.edges().cloned().collect(),
        }
    }
}

impl fmt::Display for ControlFlowGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for block in self.blocks() {
            writeln!(f, "{}", block)?;
        }
        for edge in self.edges() {
            writeln!(f, "edge {}", edge)?;
        }
        Ok(())
    }
}

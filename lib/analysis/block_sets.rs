//! Per-block GEN and KILL sets.

use crate::analysis::{Definition, DefinitionCatalog, DefinitionSet};
use crate::config::{AnalysisConfig, UnsupportedPolicy};
use crate::error::*;
use crate::ir;

/// The four dataflow sets of one block.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockSets {
    pub(crate) gen: DefinitionSet,
    pub(crate) kill: DefinitionSet,
    pub(crate) in_set: DefinitionSet,
    pub(crate) out_set: DefinitionSet,
}

impl BlockSets {
    /// Initial state for a block: nothing comes in, and what the block
    /// generates goes out.
    pub fn new(gen: DefinitionSet, kill: DefinitionSet) -> BlockSets {
        BlockSets {
            out_set: gen.clone(),
            gen,
            kill,
            in_set: DefinitionSet::new(),
        }
    }

    /// Definitions generated in this block and not overwritten later in it.
    pub fn gen(&self) -> &DefinitionSet {
        &self.gen
    }
    /// Definitions, anywhere in the procedure, of a variable this block
    /// writes.
    pub fn kill(&self) -> &DefinitionSet {
        &self.kill
    }
    /// Definitions reaching the start of this block.
    pub fn in_set(&self) -> &DefinitionSet {
        &self.in_set
    }
    /// Definitions reaching the end of this block.
    pub fn out_set(&self) -> &DefinitionSet {
        &self.out_set
    }
}

/// Instructions of `block` the analysis should look at, applying the
/// configured policy to anything which is neither a write nor a declaration.
fn supported_instructions<'b>(
    block: &'b ir::Block,
    config: &AnalysisConfig,
) -> Result<Vec<&'b ir::Instruction>> {
    let mut instructions = Vec::new();
    for instruction in block.instructions() {
        if let ir::Operation::Unsupported { opcode } = instruction.operation() {
            match config.unsupported_instructions() {
                UnsupportedPolicy::Reject => {
                    return Err(ErrorKind::UnsupportedInstructionKind(
                        block.index(),
                        instruction.index(),
                        opcode.clone(),
                    )
                    .into());
                }
                UnsupportedPolicy::Ignore => {
                    warn!(
                        "skipping unsupported instruction {}",
                        ir::Site::new(block.index(), instruction.index())
                    );
                    continue;
                }
            }
        }
        instructions.push(instruction);
    }
    Ok(instructions)
}

/// Compute GEN for `block`, registering every definition it makes in
/// `catalog`.
///
/// A write removes any earlier definition of the same variable from GEN
/// before adding itself, so only the last write of a variable in the block
/// is generated. Declarations are added as they are found.
pub fn build_gen(
    block: &ir::Block,
    catalog: &mut DefinitionCatalog,
    config: &AnalysisConfig,
) -> Result<DefinitionSet> {
    let mut gen = DefinitionSet::new();

    for instruction in supported_instructions(block, config)? {
        let definition = match Definition::from_instruction(block, instruction) {
            Some(definition) => definition,
            None => continue,
        };

        if !definition.is_declaration() {
            let mut shadowed = Vec::new();
            for id in gen.iter() {
                if catalog.get(id)?.variable() == definition.variable() {
                    shadowed.push(id);
                }
            }
            for id in shadowed {
                trace!(
                    "block 0x{:x} GEN drops {} {}",
                    block.index(),
                    id,
                    catalog.get(id)?
                );
                gen.remove(id);
            }
        }

        trace!("block 0x{:x} GEN adds {}", block.index(), definition);
        let id = catalog.insert(definition);
        gen.insert(id);
    }

    Ok(gen)
}

/// Compute KILL for `block` once `catalog` holds every definition in the
/// procedure.
///
/// Every write in the block kills every definition of the same variable in
/// the catalog, including the block's own. When the configuration asks for
/// it, the block's own GEN definitions are left out instead.
pub fn build_kill(
    block: &ir::Block,
    gen: &DefinitionSet,
    catalog: &DefinitionCatalog,
    config: &AnalysisConfig,
) -> Result<DefinitionSet> {
    let mut kill = DefinitionSet::new();

    for instruction in supported_instructions(block, config)? {
        let variable = match instruction.operation().variable_written() {
            Some(variable) => variable,
            None => continue,
        };
        for id in catalog.defining(variable) {
            if config.exclude_self_kill() && gen.contains(id) {
                continue;
            }
            if kill.insert(id) {
                trace!(
                    "block 0x{:x} KILL adds {} {}",
                    block.index(),
                    id,
                    catalog.get(id)?
                );
            }
        }
    }

    Ok(kill)
}

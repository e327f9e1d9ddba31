use crate::analysis::Definition;
use crate::error::*;
use crate::ir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A handle to a definition in a `DefinitionCatalog`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct DefinitionId(usize);

impl DefinitionId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

/// Every definition found in a procedure.
///
/// The catalog only grows. Each site is registered at most once, so handles
/// compare equal exactly when the definitions they name come from the same
/// instruction.
#[derive(Clone, Debug, Default)]
pub struct DefinitionCatalog {
    definitions: Vec<Definition>,
    sites: HashMap<ir::Site, DefinitionId>,
}

impl DefinitionCatalog {
    pub fn new() -> DefinitionCatalog {
        DefinitionCatalog::default()
    }

    /// Register a definition, returning its handle. Registering a second
    /// definition for a site already in the catalog returns the existing
    /// handle.
    pub fn insert(&mut self, definition: Definition) -> DefinitionId {
        if let Some(id) = self.sites.get(&definition.site()) {
            return *id;
        }
        let id = DefinitionId(self.definitions.len());
        self.sites.insert(definition.site(), id);
        self.definitions.push(definition);
        id
    }

    pub fn get(&self, id: DefinitionId) -> Result<&Definition> {
        self.definitions
            .get(id.0)
            .ok_or_else(|| format!("Definition {} is not in the catalog", id).into())
    }

    pub fn id(&self, site: &ir::Site) -> Option<DefinitionId> {
        self.sites.get(site).cloned()
    }

    /// Handles of every definition of `variable`, anywhere in the procedure.
    pub fn defining<'c>(
        &'c self,
        variable: &'c ir::Operand,
    ) -> impl Iterator<Item = DefinitionId> + 'c {
        self.iter()
            .filter(move |(_, definition)| definition.variable() == variable)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DefinitionId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| (DefinitionId(index), definition))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

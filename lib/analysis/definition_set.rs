use crate::analysis::DefinitionId;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, PartialOrd};
use std::collections::BTreeSet;
use std::iter::FromIterator;

/// A set of definitions, compared by definition identity.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DefinitionSet {
    definitions: BTreeSet<DefinitionId>,
}

impl DefinitionSet {
    pub fn new() -> DefinitionSet {
        DefinitionSet {
            definitions: BTreeSet::new(),
        }
    }

    /// Returns true if `id` was not already in the set.
    pub fn insert(&mut self, id: DefinitionId) -> bool {
        self.definitions.insert(id)
    }

    pub fn contains(&self, id: DefinitionId) -> bool {
        self.definitions.contains(&id)
    }

    pub fn remove(&mut self, id: DefinitionId) -> bool {
        self.definitions.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = DefinitionId> + '_ {
        self.definitions.iter().cloned()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn join(mut self, other: &DefinitionSet) -> DefinitionSet {
        other.iter().for_each(|id| {
            self.insert(id);
        });
        self
    }

    /// Every definition in `self` which is not in `other`.
    pub fn difference(&self, other: &DefinitionSet) -> DefinitionSet {
        self.definitions
            .difference(&other.definitions)
            .cloned()
            .collect()
    }

    pub fn is_subset(&self, other: &DefinitionSet) -> bool {
        self.definitions.is_subset(&other.definitions)
    }
}

impl FromIterator<DefinitionId> for DefinitionSet {
    fn from_iter<I: IntoIterator<Item = DefinitionId>>(iter: I) -> DefinitionSet {
        DefinitionSet {
            definitions: iter.into_iter().collect(),
        }
    }
}

impl Extend<DefinitionId> for DefinitionSet {
    fn extend<I: IntoIterator<Item = DefinitionId>>(&mut self, iter: I) {
        self.definitions.extend(iter);
    }
}

/// Sets are ordered by inclusion.
impl PartialOrd for DefinitionSet {
    fn partial_cmp(&self, rhs: &DefinitionSet) -> Option<Ordering> {
        match (self.is_subset(rhs), rhs.is_subset(self)) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => None,
        }
    }
}

use crate::ir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One write or declaration of a variable.
///
/// A `Definition` is identified by the instruction which produced it. Two
/// definitions carrying the same variable and value are still different
/// definitions when they come from different sites, so `PartialEq` and `Hash`
/// only look at the site.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Definition {
    site: ir::Site,
    variable: ir::Operand,
    value: Option<ir::Operand>,
}

impl Definition {
    pub fn new(site: ir::Site, variable: ir::Operand, value: Option<ir::Operand>) -> Definition {
        Definition {
            site,
            variable,
            value,
        }
    }

    /// The definition an instruction produces, if it produces one.
    pub fn from_instruction(block: &ir::Block, instruction: &ir::Instruction) -> Option<Definition> {
        let site = ir::Site::new(block.index(), instruction.index());
        match instruction.operation() {
            ir::Operation::Write { dst, src } => {
                Some(Definition::new(site, dst.clone(), Some(src.clone())))
            }
            ir::Operation::Declare { dst } => Some(Definition::new(site, dst.clone().into(), None)),
            ir::Operation::Unsupported { .. } => None,
        }
    }

    pub fn site(&self) -> ir::Site {
        self.site
    }

    pub fn variable(&self) -> &ir::Operand {
        &self.variable
    }

    /// The value written, or `None` for a bare declaration.
    pub fn value(&self) -> Option<&ir::Operand> {
        self.value.as_ref()
    }

    pub fn is_declaration(&self) -> bool {
        self.value.is_none()
    }
}

impl PartialEq for Definition {
    fn eq(&self, other: &Definition) -> bool {
        self.site == other.site
    }
}

impl Eq for Definition {}

impl Hash for Definition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.site.hash(state);
    }
}

/// Renders as `(variable=value)`, with `0` standing in for a missing value.
impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "({}={})", self.variable, value),
            None => write!(f, "({}=0)", self.variable),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal integer, displayed as its signed decimal value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Constant {
    value: i64,
}

impl Constant {
    pub fn new(value: i64) -> Constant {
        Constant { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl From<i64> for Constant {
    fn from(value: i64) -> Constant {
        Constant::new(value)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `Scalar` is a named storage location.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Scalar {
    name: String,
}

impl Scalar {
    /// Create a new `Scalar` with the given name.
    pub fn new<S>(name: S) -> Scalar
    where
        S: Into<String>,
    {
        Scalar { name: name.into() }
    }

    /// Gets the name of the `Scalar`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

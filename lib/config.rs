//! Knobs for a reaching definitions run.
//!
//! The defaults reproduce the plain analysis: unsupported instructions are
//! rejected, a block's own definitions stay in its KILL set, and the fixed
//! point runs until it converges.

use serde::{Deserialize, Serialize};

/// What to do with an instruction that is neither a write nor a declaration.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Fail with `ErrorKind::UnsupportedInstructionKind`.
    Reject,
    /// Skip the instruction, logging a warning.
    Ignore,
}

impl Default for UnsupportedPolicy {
    fn default() -> UnsupportedPolicy {
        UnsupportedPolicy::Reject
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    unsupported_instructions: UnsupportedPolicy,
    exclude_self_kill: bool,
    max_passes: Option<usize>,
}

impl AnalysisConfig {
    pub fn new() -> AnalysisConfig {
        AnalysisConfig::default()
    }

    pub fn unsupported_instructions(&self) -> UnsupportedPolicy {
        self.unsupported_instructions
    }
    pub fn with_unsupported_instructions(mut self, policy: UnsupportedPolicy) -> AnalysisConfig {
        self.unsupported_instructions = policy;
        self
    }

    /// When set, a block's own GEN definitions are left out of its KILL set.
    /// This never changes the converged result.
    pub fn exclude_self_kill(&self) -> bool {
        self.exclude_self_kill
    }
    pub fn with_exclude_self_kill(mut self, exclude_self_kill: bool) -> AnalysisConfig {
        self.exclude_self_kill = exclude_self_kill;
        self
    }

    /// An upper bound on solver passes. `None` runs until convergence.
    pub fn max_passes(&self) -> Option<usize> {
        self.max_passes
    }
    pub fn with_max_passes(mut self, max_passes: Option<usize>) -> AnalysisConfig {
        self.max_passes = max_passes;
        self
    }
}

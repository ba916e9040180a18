//! Sequence engine
//!
//! Fibonacci-style recurrence over `u32`.

use crate::config::{Config, OverflowPolicy};
use crate::error::{Result, SeqLogError};

/// Computes the next value of a two-term recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceEngine {
    seed0: u32,
    seed1: u32,
    overflow: OverflowPolicy,
}

impl SequenceEngine {
    /// Create an engine with explicit seeds and overflow policy
    pub fn new(seed0: u32, seed1: u32, overflow: OverflowPolicy) -> Self {
        Self {
            seed0,
            seed1,
            overflow,
        }
    }

    /// Create an engine from the sequence settings of a config
    pub fn from_config(config: &Config) -> Self {
        let (seed0, seed1) = config.seeds;
        Self::new(seed0, seed1, config.overflow_policy)
    }

    /// Next value after `history` (oldest first)
    ///
    /// - `[]` -> `seed0`
    /// - `[x]` -> `seed1`
    /// - `[.., a, b]` -> `a + b`
    pub fn next(&self, history: &[u32]) -> Result<u32> {
        match history {
            [] => Ok(self.seed0),
            [_] => Ok(self.seed1),
            [.., a, b] => self.add(*a, *b),
        }
    }

    /// The two seed values
    pub fn seeds(&self) -> (u32, u32) {
        (self.seed0, self.seed1)
    }

    /// The configured overflow policy
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    fn add(&self, a: u32, b: u32) -> Result<u32> {
        match self.overflow {
            OverflowPolicy::Wrap => Ok(a.wrapping_add(b)),
            OverflowPolicy::Fail => a.checked_add(b).ok_or(SeqLogError::Overflow { a, b }),
        }
    }
}

impl Default for SequenceEngine {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

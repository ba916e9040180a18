//! Configuration for SeqLog
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, SeqLogError};

/// Main configuration for a SeqLog session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Log Configuration
    // -------------------------------------------------------------------------
    /// Sync strategy: how often to fsync appended records
    pub sync_strategy: SyncStrategy,

    // -------------------------------------------------------------------------
    // Sequence Configuration
    // -------------------------------------------------------------------------
    /// First two values of the sequence: `(seed0, seed1)`
    pub seeds: (u32, u32),

    /// When the seeds are written to the log
    pub seed_policy: SeedPolicy,

    /// What happens when `a + b` does not fit in a `u32`
    pub overflow_policy: OverflowPolicy,
}

/// Log sync strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// fsync after every append (safest, slowest)
    EveryWrite,

    /// fsync after N unsynced appends (balanced durability/performance)
    EveryNEntries { count: usize },
}

/// When the two seed values are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPolicy {
    /// `init` tops the log up to two records with the seeds
    AtInit,

    /// `init` writes nothing; the first two `step` calls produce the seeds
    Lazy,
}

/// Overflow behavior of the two-term recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Wrap modulo 2^32
    Wrap,

    /// Fail the step with `SeqLogError::Overflow`
    Fail,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_strategy: SyncStrategy::EveryWrite,
            seeds: (0, 1),
            seed_policy: SeedPolicy::AtInit,
            overflow_policy: OverflowPolicy::Wrap,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings no log can run with
    pub fn validate(&self) -> Result<()> {
        if let SyncStrategy::EveryNEntries { count: 0 } = self.sync_strategy {
            return Err(SeqLogError::Config(
                "sync strategy EveryNEntries requires count > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the sync strategy
    pub fn sync_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.config.sync_strategy = strategy;
        self
    }

    /// Set both seed values
    pub fn seeds(mut self, seed0: u32, seed1: u32) -> Self {
        self.config.seeds = (seed0, seed1);
        self
    }

    /// Set the seeding policy
    pub fn seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.config.seed_policy = policy;
        self
    }

    /// Set the overflow policy
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.config.overflow_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

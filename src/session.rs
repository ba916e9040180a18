//! Session Module
//!
//! The controller that external callers talk to.
//!
//! ## Responsibilities
//! - Bind one append log and one sequence engine to a path
//! - Enforce `Uninitialized -> Ready` ordering of commands
//! - Recover sequence state by scanning the log on every step
//!
//! ## State Machine
//! ```text
//!                  init(path)
//!  Uninitialized ─────────────► Ready ◄──┐
//!                                 │      │ init(path) / step / getData / reset
//!                                 └──────┘
//! ```

use std::path::{Path, PathBuf};

use crate::append_log::AppendLog;
use crate::config::{Config, SeedPolicy};
use crate::error::{Result, SeqLogError};
use crate::protocol::{Command, Response};
use crate::sequence::SequenceEngine;

/// Session state
enum SessionState {
    /// No log bound yet
    Uninitialized,

    /// Log bound and initialized
    Ready(AppendLog),
}

/// A sequence-generating session over one append log
///
/// The session keeps no cursor: every `step` rescans the log, so the next
/// value always follows whatever is on disk, including after a reset or
/// after another session wrote to the same file earlier.
pub struct Session {
    /// Session configuration
    config: Config,

    /// Pure next-value computation
    engine: SequenceEngine,

    /// Current state
    state: SessionState,
}

impl Session {
    /// Create an uninitialized session
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let engine = SequenceEngine::from_config(&config);

        Ok(Self {
            config,
            engine,
            state: SessionState::Uninitialized,
        })
    }

    /// Create a session and `init` it on `path` (convenience method)
    pub fn open(config: Config, path: impl Into<PathBuf>) -> Result<Self> {
        let mut session = Self::new(config)?;
        session.init(path)?;
        Ok(session)
    }

    /// Execute a command
    ///
    /// Routes commands to the matching handler.
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::Init { path } => {
                self.init(path)?;
                Ok(Response::Done)
            }
            Command::Step => self.step().map(Response::Appended),
            Command::GetData => self.get_data().map(Response::Data),
            Command::Reset => self.reset().map(Response::Data),
        }
    }

    /// Bind the session to `path` and initialize the log
    ///
    /// With `SeedPolicy::AtInit`, a log holding fewer than two records is
    /// topped up with the seeds. Repeating `init` on the same path changes
    /// nothing.
    pub fn init(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let seed_policy = self.config.seed_policy;

        let rebind = !matches!(&self.state, SessionState::Ready(log) if log.path() == path.as_path());
        if rebind {
            // Build the new log fully before dropping the old binding
            let mut log = AppendLog::new(path, self.config.sync_strategy);
            prepare_log(&mut log, &self.engine, seed_policy)?;
            self.state = SessionState::Ready(log);
        } else if let SessionState::Ready(log) = &mut self.state {
            prepare_log(log, &self.engine, seed_policy)?;
        }

        if let Some(path) = self.path() {
            tracing::info!(path = %path.display(), ?seed_policy, "Session initialized");
        }
        Ok(())
    }

    /// Append the next sequence value and return it
    ///
    /// Steps:
    /// 1. Scan the log for the current history
    /// 2. Compute the next value
    /// 3. Append it
    pub fn step(&mut self) -> Result<u32> {
        let engine = self.engine;
        let log = self.log_mut("step")?;

        let history = log.read_all()?;
        let value = engine.next(&history)?;
        log.append(value)?;

        tracing::debug!(index = history.len(), value, "Stepped sequence");
        Ok(value)
    }

    /// Read the full sequence
    pub fn get_data(&self) -> Result<Vec<u32>> {
        self.log("getData")?.read_all()
    }

    /// Clear the log; the session stays ready with an empty history
    pub fn reset(&mut self) -> Result<Vec<u32>> {
        let log = self.log_mut("reset")?;
        log.reset()?;
        log.read_all()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Whether `init` has succeeded
    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// Path of the bound log, if any
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            SessionState::Ready(log) => Some(log.path()),
            SessionState::Uninitialized => None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn log(&self, command: &'static str) -> Result<&AppendLog> {
        match &self.state {
            SessionState::Ready(log) => Ok(log),
            SessionState::Uninitialized => Err(SeqLogError::NotReady(command)),
        }
    }

    fn log_mut(&mut self, command: &'static str) -> Result<&mut AppendLog> {
        match &mut self.state {
            SessionState::Ready(log) => Ok(log),
            SessionState::Uninitialized => Err(SeqLogError::NotReady(command)),
        }
    }
}

/// Initialize `log` and, under `SeedPolicy::AtInit`, top it up with the seeds
fn prepare_log(log: &mut AppendLog, engine: &SequenceEngine, seed_policy: SeedPolicy) -> Result<()> {
    log.initialize()?;

    if seed_policy == SeedPolicy::AtInit {
        let mut history = log.read_all()?;
        let mut seeds = Vec::with_capacity(2);
        while history.len() < 2 {
            let value = engine.next(&history)?;
            history.push(value);
            seeds.push(value);
        }
        log.append_all(&seeds)?;
    }

    Ok(())
}

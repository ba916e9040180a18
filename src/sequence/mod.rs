//! Sequence Module
//!
//! Pure computation of the next sequence value from the persisted history.
//!
//! ## Responsibilities
//! - Produce the seeds for short histories
//! - Two-term recurrence `next = a + b` for everything else
//! - Apply the configured overflow policy
//!
//! No I/O happens here. The session recovers the history by scanning the log
//! and hands it in on every step.

mod engine;

pub use engine::SequenceEngine;

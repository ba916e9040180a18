//! # SeqLog
//!
//! An append-only fixed-record log with full-scan recovery, driven by a
//! sequence-generating session:
//! - Fixed 4-byte little-endian records, no header or footer
//! - All-or-nothing appends (failed writes are rolled back)
//! - Torn-tail detection on scan, offline verify/repair
//! - Stateless engine, stateful storage: state is recovered by rescanning
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Session Worker                            │
//! │         (optional thread + command channel)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Session Controller                           │
//! │        init / step / getData / reset                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Append Log  │          │  Sequence   │
//!   │(scan/append)│          │   Engine    │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │Record Codec │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod append_log;
pub mod sequence;
pub mod protocol;
pub mod session;
pub mod worker;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SeqLogError, Result};
pub use config::Config;
pub use append_log::AppendLog;
pub use session::Session;
pub use worker::SessionWorker;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SeqLog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

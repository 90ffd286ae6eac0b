//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use evm_common::prelude::*;` and get
//! the most important types without listing individual paths.

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{NUM_CANDIDATES, TALLY_MAX};

// ─── Controller Vocabulary ──────────────────────────────────────────
pub use crate::io::{InputFlags, InputSnapshot, OutputSnapshot, VoteLines};
pub use crate::state::{Candidate, SessionState};

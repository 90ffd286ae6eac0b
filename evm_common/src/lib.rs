//! EVM Common Library
//!
//! This crate provides the shared vocabulary for the EVM (electronic voting
//! machine) workspace: the controller state enum, candidate identifiers,
//! per-tick input/output snapshot types with their pin-level encoding, and
//! configuration loading utilities.
//!
//! # Module Structure
//!
//! - [`state`] - Controller session states and candidate identifiers
//! - [`io`] - Per-tick input/output snapshots and pin packing
//! - [`consts`] - System constants (candidate count, tally width)
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use evm_common::prelude::*;
//!
//! let input = InputSnapshot::new(InputFlags::SWITCH_ON, 0);
//! assert_eq!(SessionState::default(), SessionState::Idle);
//! # let _ = input;
//! ```

pub mod config;
pub mod consts;
pub mod io;
pub mod prelude;
pub mod state;

//! # EVM Control Unit Library
//!
//! Behavioral core of a small electronic voting machine: a synchronous
//! finite-state machine advanced one logical step per tick. It enforces the
//! booth interlock (ready → release-ready → vote), accumulates per-candidate
//! tallies, detects ties, and multiplexes a results/winner display.
//!
//! ## Architecture
//!
//! 1. **Transition engine** ([`transition`]) — priority-encoded transition
//!    table, evaluated from pre-tick state only.
//! 2. **Tally board** ([`tally`]) — three 7-bit counters plus the winner/tie
//!    query.
//! 3. **Display mux** ([`display`]) — combinational output derivation.
//! 4. **Tick runner** ([`cycle`]) — the [`cycle::Controller`] owning all
//!    mutable state, with per-tick statistics and an accepted-vote journal.
//!
//! ## Zero-Allocation Tick Path
//!
//! All runtime state is fixed-size and pre-allocated at construction. The
//! tick path performs zero heap allocations; the vote journal is a bounded
//! `heapless::Vec` sized for every candidate at full tally.

pub mod config;
pub mod cycle;
pub mod display;
pub mod script;
pub mod tally;
pub mod transition;

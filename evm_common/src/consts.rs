//! System-wide constants for the EVM workspace.
//!
//! The widths here mirror the machine's output encoding: the result bus is
//! 7 bits wide and the candidate-name bus is 2 bits wide, so tallies are
//! capped at 127 and candidate ids at 3.

use static_assertions::const_assert;
use static_assertions::const_assert_eq;

/// Number of candidates on the ballot. Fixed by the hardware interface
/// (one vote line per candidate, 2-bit candidate-name output).
pub const NUM_CANDIDATES: usize = 3;

/// Width of a per-candidate tally on the result bus [bits].
pub const TALLY_BITS: u32 = 7;

/// Maximum representable tally (127). Tallies saturate here.
pub const TALLY_MAX: u8 = (1 << TALLY_BITS) - 1;

/// Capacity of the accepted-vote journal: every candidate at full tally.
pub const JOURNAL_CAPACITY: usize = NUM_CANDIDATES * TALLY_MAX as usize;

// Candidate ids (1..=3) must fit the 2-bit candidate_name output,
// with 0 reserved for "none".
const_assert!(NUM_CANDIDATES <= 3);
const_assert_eq!(TALLY_MAX, 127);

//! Session state and candidate identifier enums for the EVM controller.
//!
//! All enums use `#[repr(u8)]` for compact memory layout and a stable
//! mapping onto the machine's state register encoding. The session state
//! is mutated only by the controller's tick operation; everything else
//! reads it.

use serde::{Deserialize, Serialize};

use crate::consts::NUM_CANDIDATES;

// ─── Session State ──────────────────────────────────────────────────

/// Controller session lifecycle state.
///
/// Exactly one state is active at any time. `CandidateVoted` is transient:
/// it is held for a single tick and then falls back to `WaitingForCandidate`
/// unconditionally, producing the one-tick `voting_done` pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SessionState {
    /// Machine off. Initial state after reset; terminal state after switch-off.
    Idle = 0,
    /// Powered on, booth empty, awaiting a voter.
    WaitingForCandidate = 1,
    /// A voter is in the booth; awaiting a vote button press.
    WaitingForCandidateToVote = 2,
    /// A vote was registered this tick. Transient.
    CandidateVoted = 3,
    /// Voting session closed; tallies frozen, display-only.
    SessionDone = 4,
}

impl SessionState {
    /// Convert from raw `u8`. Returns `None` for invalid values.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Idle),
            1 => Some(Self::WaitingForCandidate),
            2 => Some(Self::WaitingForCandidateToVote),
            3 => Some(Self::CandidateVoted),
            4 => Some(Self::SessionDone),
            _ => None,
        }
    }

    /// True while the session accepts votes (booth occupied or not).
    #[inline]
    pub const fn session_open(&self) -> bool {
        matches!(
            self,
            Self::WaitingForCandidate | Self::WaitingForCandidateToVote | Self::CandidateVoted
        )
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

// ─── Candidate ──────────────────────────────────────────────────────

/// Candidate identifier.
///
/// Discriminants match the 2-bit `candidate_name` output encoding, where
/// 0 is reserved for "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Candidate {
    C1 = 1,
    C2 = 2,
    C3 = 3,
}

impl Candidate {
    /// All candidates in ballot order.
    pub const ALL: [Candidate; NUM_CANDIDATES] = [Self::C1, Self::C2, Self::C3];

    /// Wire id (1..=3), as driven on the `candidate_name` output.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Zero-based tally index (0..=2).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Convert from wire id (1..=3). Returns `None` for 0 and out-of-range.
    #[inline]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::C1),
            2 => Some(Self::C2),
            3 => Some(Self::C3),
            _ => None,
        }
    }

    /// Convert from the 2-bit `display_select` value (0→C1, 1→C2, 2→C3).
    /// Select value 3 is unmapped.
    #[inline]
    pub const fn from_select(select: u8) -> Option<Self> {
        match select {
            0 => Some(Self::C1),
            1 => Some(Self::C2),
            2 => Some(Self::C3),
            _ => None,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

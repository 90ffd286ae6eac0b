//! Per-tick input/output snapshots and their pin-level encoding.
//!
//! The controller's entire external contract is one input vector sampled
//! per tick and one output vector derived per tick, plus the reset line.
//! Bit positions follow the board pinout so recorded pin traces can be
//! replayed against the simulator:
//!
//! ```text
//! ui_in[0..2]  vote_candidate_1/2/3     uo_out[1:0] candidate_name
//! ui_in[3]     switch_on_evm            uo_out[2]   invalid_results
//! ui_in[4]     candidate_ready          uo_out[3]   voting_in_progress
//! ui_in[5]     voting_session_done      uo_out[4]   voting_done
//! ui_in[6]     switch_off_evm           uo_out[7:5] unused (0)
//! ui_in[7]     display_winner           uio_out[6:0] result_count
//! uio_in[1:0]  display_results
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::consts::TALLY_MAX;
use crate::state::Candidate;

// ─── Input Snapshot ─────────────────────────────────────────────────

bitflags! {
    /// Level-sampled input lines, one bit per `ui_in` pin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InputFlags: u8 {
        /// Momentary vote-cast signal for candidate 1.
        const VOTE_1          = 1 << 0;
        /// Momentary vote-cast signal for candidate 2.
        const VOTE_2          = 1 << 1;
        /// Momentary vote-cast signal for candidate 3.
        const VOTE_3          = 1 << 2;
        /// Power-on request.
        const SWITCH_ON       = 1 << 3;
        /// Voter-present / booth-entry signal.
        const CANDIDATE_READY = 1 << 4;
        /// Close-session request.
        const SESSION_DONE    = 1 << 5;
        /// Power-off request.
        const SWITCH_OFF      = 1 << 6;
        /// Switch the display mux to winner mode.
        const DISPLAY_WINNER  = 1 << 7;
    }
}

impl Default for InputFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl InputFlags {
    /// The vote flag for a given candidate.
    #[inline]
    pub const fn vote(candidate: Candidate) -> Self {
        match candidate {
            Candidate::C1 => Self::VOTE_1,
            Candidate::C2 => Self::VOTE_2,
            Candidate::C3 => Self::VOTE_3,
        }
    }
}

/// Classification of the three vote lines within one input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteLines {
    /// No vote line asserted.
    None,
    /// Exactly one vote line asserted.
    Single(Candidate),
    /// Two or three vote lines asserted simultaneously.
    Conflict,
}

/// Complete input vector for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Boolean input lines.
    pub flags: InputFlags,
    /// 2-bit candidate selector for the non-winner result display.
    pub display_select: u8,
}

impl InputSnapshot {
    /// Build a snapshot. `display_select` is masked to its 2-bit width.
    #[inline]
    pub const fn new(flags: InputFlags, display_select: u8) -> Self {
        Self {
            flags,
            display_select: display_select & 0b11,
        }
    }

    /// Decode from raw pin values (`ui_in`, `uio_in[1:0]`).
    #[inline]
    pub const fn from_pins(ui_in: u8, uio_in: u8) -> Self {
        Self {
            flags: InputFlags::from_bits_retain(ui_in),
            display_select: uio_in & 0b11,
        }
    }

    /// Encode back to raw pin values.
    #[inline]
    pub const fn to_pins(self) -> (u8, u8) {
        (self.flags.bits(), self.display_select)
    }

    /// Classify the vote lines of this snapshot.
    pub fn vote_lines(&self) -> VoteLines {
        let mut single = None;
        for candidate in Candidate::ALL {
            if self.flags.contains(InputFlags::vote(candidate)) {
                if single.is_some() {
                    return VoteLines::Conflict;
                }
                single = Some(candidate);
            }
        }
        match single {
            Some(candidate) => VoteLines::Single(candidate),
            None => VoteLines::None,
        }
    }
}

// ─── Output Snapshot ────────────────────────────────────────────────

/// Complete output vector for one tick, a pure function of controller
/// state, tallies, and display controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputSnapshot {
    /// Displayed candidate id: 0 = none, 1..=3 = candidate.
    pub candidate_name: u8,
    /// Tie flag: the winner query found no unique maximum.
    pub invalid_results: bool,
    /// A voter is in the booth awaiting a vote.
    pub voting_in_progress: bool,
    /// One-tick pulse: a vote was registered on the previous tick.
    pub voting_done: bool,
    /// 7-bit tally of the selected/winning candidate.
    pub result_count: u8,
}

impl OutputSnapshot {
    /// All-zero output vector, as driven in `Idle` after reset.
    pub const ZERO: Self = Self {
        candidate_name: 0,
        invalid_results: false,
        voting_in_progress: false,
        voting_done: false,
        result_count: 0,
    };

    /// Encode to raw pin values (`uo_out`, `uio_out`).
    #[inline]
    pub const fn to_pins(self) -> (u8, u8) {
        let uo_out = (self.candidate_name & 0b11)
            | ((self.invalid_results as u8) << 2)
            | ((self.voting_in_progress as u8) << 3)
            | ((self.voting_done as u8) << 4);
        (uo_out, self.result_count & TALLY_MAX)
    }

    /// Decode from raw pin values.
    #[inline]
    pub const fn from_pins(uo_out: u8, uio_out: u8) -> Self {
        Self {
            candidate_name: uo_out & 0b11,
            invalid_results: (uo_out >> 2) & 1 == 1,
            voting_in_progress: (uo_out >> 3) & 1 == 1,
            voting_done: (uo_out >> 4) & 1 == 1,
            result_count: uio_out & TALLY_MAX,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_pin_bit_positions() {
        // Bit positions must match the board pinout exactly.
        let input = InputSnapshot::from_pins(0b0001_1000, 0);
        assert!(input.flags.contains(InputFlags::SWITCH_ON));
        assert!(input.flags.contains(InputFlags::CANDIDATE_READY));
        assert!(!input.flags.contains(InputFlags::VOTE_1));

        let input = InputSnapshot::from_pins(0b1010_1000, 0);
        assert!(input.flags.contains(InputFlags::SESSION_DONE));
        assert!(input.flags.contains(InputFlags::DISPLAY_WINNER));
    }

    #[test]
    fn display_select_masked_to_two_bits() {
        let input = InputSnapshot::new(InputFlags::empty(), 0b111);
        assert_eq!(input.display_select, 0b11);
        let input = InputSnapshot::from_pins(0, 0b1110);
        assert_eq!(input.display_select, 0b10);
    }

    #[test]
    fn vote_lines_classification() {
        let none = InputSnapshot::new(InputFlags::SWITCH_ON, 0);
        assert_eq!(none.vote_lines(), VoteLines::None);

        for candidate in Candidate::ALL {
            let single = InputSnapshot::new(InputFlags::vote(candidate), 0);
            assert_eq!(single.vote_lines(), VoteLines::Single(candidate));
        }

        let conflict = InputSnapshot::new(InputFlags::VOTE_1 | InputFlags::VOTE_3, 0);
        assert_eq!(conflict.vote_lines(), VoteLines::Conflict);

        let all = InputSnapshot::new(
            InputFlags::VOTE_1 | InputFlags::VOTE_2 | InputFlags::VOTE_3,
            0,
        );
        assert_eq!(all.vote_lines(), VoteLines::Conflict);
    }

    #[test]
    fn output_pin_encoding() {
        let output = OutputSnapshot {
            candidate_name: 2,
            invalid_results: false,
            voting_in_progress: true,
            voting_done: false,
            result_count: 57,
        };
        let (uo_out, uio_out) = output.to_pins();
        assert_eq!(uo_out, 0b0000_1010);
        assert_eq!(uio_out, 57);
        assert_eq!(OutputSnapshot::from_pins(uo_out, uio_out), output);
    }

    #[test]
    fn output_zero_is_all_low() {
        assert_eq!(OutputSnapshot::ZERO.to_pins(), (0, 0));
        assert_eq!(OutputSnapshot::default(), OutputSnapshot::ZERO);
    }
}

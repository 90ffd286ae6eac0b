//! Combinational output derivation: status lines plus the result display mux.
//!
//! Pure function of post-tick state, tallies, and the display control
//! inputs. The display mux is live only in `SessionDone`; in every other
//! state the name/count buses idle at zero (after reset the machine drives
//! all-low outputs even with a candidate selected). Two display modes:
//!
//! - **Winner mode** (DISPLAY_WINNER asserted): runs the winner query.
//!   A tie reports `invalid_results` with candidate 0; `result_count`
//!   carries the tied count.
//! - **Results mode** (DISPLAY_WINNER deasserted): `display_select` picks
//!   the candidate (0→1, 1→2, 2→3); the unmapped select 3 drives zeros.

use evm_common::io::{InputFlags, InputSnapshot, OutputSnapshot};
use evm_common::state::{Candidate, SessionState};

use crate::tally::{TallyBoard, WinnerResult};

/// Derive the complete output vector for the current tick.
pub fn derive_output(
    state: SessionState,
    tally: &TallyBoard,
    input: &InputSnapshot,
) -> OutputSnapshot {
    let mut output = OutputSnapshot {
        voting_in_progress: state == SessionState::WaitingForCandidateToVote,
        voting_done: state == SessionState::CandidateVoted,
        ..OutputSnapshot::ZERO
    };

    // Display mux is live only once the session is closed.
    if state != SessionState::SessionDone {
        return output;
    }

    if input.flags.contains(InputFlags::DISPLAY_WINNER) {
        match tally.winner() {
            WinnerResult::Winner { candidate, count } => {
                output.candidate_name = candidate.id();
                output.result_count = count;
            }
            WinnerResult::Tie { count } => {
                output.invalid_results = true;
                output.result_count = count;
            }
        }
    } else if let Some(candidate) = Candidate::from_select(input.display_select) {
        output.candidate_name = candidate.id();
        output.result_count = tally.count(candidate);
    }

    output
}

// ─── Tests ──────────────────────────────────────────────────────────

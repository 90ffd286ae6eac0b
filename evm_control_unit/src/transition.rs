//! Priority-encoded transition table for the session state machine.
//!
//! Evaluated once per tick, strictly from the pre-tick state and the
//! sampled input snapshot. First matching rule wins:
//!
//! 1. `Idle` + SWITCH_ON → `WaitingForCandidate`
//! 2. `WaitingForCandidate` + CANDIDATE_READY → `WaitingForCandidateToVote`
//! 3. `WaitingForCandidate` + SESSION_DONE → `SessionDone`
//! 4. `WaitingForCandidateToVote` + exactly one vote line, CANDIDATE_READY
//!    released → accept vote, → `CandidateVoted`
//! 5. `CandidateVoted` → `WaitingForCandidate` (unconditional)
//! 6. `SessionDone` + SWITCH_OFF → `Idle`
//! 7. otherwise hold
//!
//! Reset has absolute priority and is handled by the tick runner before
//! this table is consulted.
//!
//! Rule 4 models the physical booth interlock: the voter-present line must
//! be released before a vote counts. A vote pressed while CANDIDATE_READY
//! is still asserted is a named no-op, never a failure.

use evm_common::io::{InputFlags, InputSnapshot, VoteLines};
use evm_common::state::{Candidate, SessionState};

use crate::config::MultiVotePolicy;
use Step::Transition;

// ─── Step Result ────────────────────────────────────────────────────

/// Named reason a vote tick was absorbed without a tally change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteRejection {
    /// CANDIDATE_READY still asserted together with a vote line.
    ReadyInterlock,
    /// More than one vote line asserted, policy is `Ignore`.
    MultiVote,
}

/// Intent produced by one evaluation of the transition table.
///
/// The tick runner applies the intent: `Vote` additionally mutates the
/// tally board; the table itself is pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move to a new state with no tally effect.
    Transition(SessionState),
    /// Accept a vote: tally the candidate and enter `CandidateVoted`.
    Vote(Candidate),
    /// Absorb the tick with a named reason; state unchanged.
    Ignore(VoteRejection),
    /// No rule matched; state unchanged.
    Hold,
}

// ─── Table ──────────────────────────────────────────────────────────

/// Evaluate the transition table for one tick.
pub fn evaluate(state: SessionState, input: &InputSnapshot, policy: MultiVotePolicy) -> Step {
    use SessionState::*;

    match state {
        Idle if input.flags.contains(InputFlags::SWITCH_ON) => Transition(WaitingForCandidate),

        WaitingForCandidate if input.flags.contains(InputFlags::CANDIDATE_READY) => {
            Transition(WaitingForCandidateToVote)
        }
        WaitingForCandidate if input.flags.contains(InputFlags::SESSION_DONE) => {
            Transition(SessionDone)
        }

        WaitingForCandidateToVote => booth_step(input, policy),

        // One-tick pulse state: falls back regardless of inputs.
        CandidateVoted => Transition(WaitingForCandidate),

        SessionDone if input.flags.contains(InputFlags::SWITCH_OFF) => Transition(Idle),

        _ => Step::Hold,
    }
}

/// Vote-line handling inside `WaitingForCandidateToVote`.
fn booth_step(input: &InputSnapshot, policy: MultiVotePolicy) -> Step {
    let lines = input.vote_lines();
    if lines == VoteLines::None {
        return Step::Hold;
    }

    // Booth interlock: the voter-present line must be released first.
    if input.flags.contains(InputFlags::CANDIDATE_READY) {
        return Step::Ignore(VoteRejection::ReadyInterlock);
    }

    match lines {
        VoteLines::Single(candidate) => Step::Vote(candidate),
        VoteLines::Conflict => match policy {
            MultiVotePolicy::Ignore => Step::Ignore(VoteRejection::MultiVote),
            // Lowest wire id wins; VOTE_1 has the lowest bit.
            MultiVotePolicy::Lowest => {
                for candidate in Candidate::ALL {
                    if input.flags.contains(InputFlags::vote(candidate)) {
                        return Step::Vote(candidate);
                    }
                }
                Step::Hold
            }
        },
        VoteLines::None => Step::Hold,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

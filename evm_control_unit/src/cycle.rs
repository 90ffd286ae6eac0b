//! Deterministic tick engine: sample → transition → derive outputs.
//!
//! One logical tick advances all state atomically. The transition is
//! computed strictly from the pre-tick state and tallies; outputs are then
//! derived from the post-tick values, matching a registered synchronous
//! design sampled after the clock edge. Reset overrides every other rule.
//!
//! ## Runtime State
//!
//! All state is pre-allocated at construction: the session state register,
//! the three-counter tally board, and a bounded accepted-vote journal.
//! The tick path performs zero heap allocations.

use heapless::Vec;
use tracing::{debug, info, warn};

use evm_common::consts::JOURNAL_CAPACITY;
use evm_common::io::{InputSnapshot, OutputSnapshot};
use evm_common::state::{Candidate, SessionState};

use crate::config::PolicyConfig;
use crate::display::derive_output;
use crate::tally::{RecordOutcome, TallyBoard};
use crate::transition::{self, Step, VoteRejection};

// ─── Tick Event ─────────────────────────────────────────────────────

/// Named outcome of one tick.
///
/// Malformed input combinations surface here as explicit no-op outcomes,
/// never as errors or panics: the hardware being modeled has only
/// defined/undefined output values, no exception mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Reset asserted: state, tallies, and journal cleared.
    Reset,
    /// State changed with no tally effect.
    Entered(SessionState),
    /// Vote counted; `count` is the candidate's new tally.
    VoteAccepted { candidate: Candidate, count: u8 },
    /// Vote landed on a full counter under the saturate policy: the state
    /// machine still registers the vote, the counter holds at maximum.
    VoteSaturated(Candidate),
    /// Vote landed on a full counter under the wrap policy: counter
    /// wrapped to zero, as the raw 7-bit register would.
    VoteWrapped(Candidate),
    /// Vote tick absorbed with a named reason; no state or tally change.
    VoteIgnored(VoteRejection),
    /// No rule matched; nothing changed.
    NoChange,
}

/// Event plus the derived output vector for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub event: TickEvent,
    pub output: OutputSnapshot,
}

// ─── Tick Statistics ────────────────────────────────────────────────

/// O(1) per-tick counters. Updated every tick with no allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickStats {
    /// Total ticks executed.
    pub ticks: u64,
    /// Votes that changed a tally (counted or wrapped).
    pub votes_accepted: u64,
    /// Vote ticks absorbed (interlock, conflict, saturated counter).
    pub votes_ignored: u64,
    /// Resets observed.
    pub resets: u64,
}

// ─── Controller ─────────────────────────────────────────────────────

/// The EVM controller: exclusive owner of the session state register,
/// the tally board, and the accepted-vote journal.
#[derive(Debug, Clone)]
pub struct Controller {
    state: SessionState,
    tally: TallyBoard,
    /// Audit trail of accepted votes, in acceptance order.
    journal: Vec<Candidate, JOURNAL_CAPACITY>,
    policy: PolicyConfig,
    stats: TickStats,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// New controller in `Idle` with zero tallies and default policies.
    pub fn new() -> Self {
        Self::with_policy(PolicyConfig::default())
    }

    /// New controller with explicit input-handling policies.
    pub fn with_policy(policy: PolicyConfig) -> Self {
        Self {
            state: SessionState::Idle,
            tally: TallyBoard::new(),
            journal: Vec::new(),
            policy,
            stats: TickStats::default(),
        }
    }

    /// Current session state.
    #[inline]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Current tally board (read-only).
    #[inline]
    pub const fn tally(&self) -> &TallyBoard {
        &self.tally
    }

    /// Accepted votes in acceptance order.
    #[inline]
    pub fn journal(&self) -> &[Candidate] {
        &self.journal
    }

    /// Tick statistics.
    #[inline]
    pub const fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Advance one tick.
    ///
    /// `reset` models the dedicated reset line and takes precedence over
    /// every transition rule. Outputs are derived from the post-tick state.
    pub fn tick(&mut self, reset: bool, input: InputSnapshot) -> TickResult {
        self.stats.ticks += 1;

        let event = if reset {
            self.apply_reset()
        } else {
            self.apply_step(transition::evaluate(self.state, &input, self.policy.multi_vote))
        };

        TickResult {
            event,
            output: derive_output(self.state, &self.tally, &input),
        }
    }

    /// Pin-level facade: active-low reset, raw `ui_in`/`uio_in`, returns
    /// raw `(uo_out, uio_out)`.
    pub fn tick_pins(&mut self, rst_n: bool, ui_in: u8, uio_in: u8) -> (u8, u8) {
        self.tick(!rst_n, InputSnapshot::from_pins(ui_in, uio_in))
            .output
            .to_pins()
    }

    fn apply_reset(&mut self) -> TickEvent {
        if self.state != SessionState::Idle || self.tally.total() != 0 {
            info!("reset: returning to Idle, tallies cleared");
        }
        self.state = SessionState::Idle;
        self.tally.reset();
        self.journal.clear();
        self.stats.resets += 1;
        TickEvent::Reset
    }

    fn apply_step(&mut self, step: Step) -> TickEvent {
        match step {
            Step::Transition(next) => {
                debug!(from = ?self.state, to = ?next, "session state transition");
                if next == SessionState::SessionDone {
                    info!(total_votes = self.tally.total(), "voting session closed");
                }
                self.state = next;
                TickEvent::Entered(next)
            }
            Step::Vote(candidate) => self.apply_vote(candidate),
            Step::Ignore(rejection) => {
                match rejection {
                    VoteRejection::ReadyInterlock => {
                        warn!("vote ignored: candidate_ready still asserted (booth interlock)")
                    }
                    VoteRejection::MultiVote => {
                        warn!("vote ignored: multiple vote lines asserted simultaneously")
                    }
                }
                self.stats.votes_ignored += 1;
                TickEvent::VoteIgnored(rejection)
            }
            Step::Hold => TickEvent::NoChange,
        }
    }

    fn apply_vote(&mut self, candidate: Candidate) -> TickEvent {
        let outcome = self.tally.record(candidate, self.policy.overflow);
        self.state = SessionState::CandidateVoted;

        match outcome {
            RecordOutcome::Counted(count) => {
                debug!(candidate = candidate.id(), count, "vote accepted");
                if self.journal.push(candidate).is_err() {
                    warn!("vote journal full; audit trail truncated");
                }
                self.stats.votes_accepted += 1;
                TickEvent::VoteAccepted { candidate, count }
            }
            RecordOutcome::Saturated => {
                warn!(candidate = candidate.id(), "tally saturated; vote dropped");
                self.stats.votes_ignored += 1;
                TickEvent::VoteSaturated(candidate)
            }
            RecordOutcome::Wrapped => {
                warn!(candidate = candidate.id(), "tally wrapped to zero");
                if self.journal.push(candidate).is_err() {
                    warn!("vote journal full; audit trail truncated");
                }
                self.stats.votes_accepted += 1;
                TickEvent::VoteWrapped(candidate)
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

//! Per-candidate tally board and the winner/tie query.
//!
//! Counts are 7 bits wide to match the result bus. The board itself never
//! decrements; the only mutation is [`TallyBoard::record`], called by the
//! tick runner for an accepted vote while the session is open.

use evm_common::consts::{NUM_CANDIDATES, TALLY_MAX};
use evm_common::state::Candidate;

use crate::config::OverflowPolicy;

// ─── Tally Board ────────────────────────────────────────────────────

/// Outcome of recording one vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Count incremented normally.
    Counted(u8),
    /// Count was at the 7-bit maximum and the policy is `Saturate`:
    /// the vote was dropped, count unchanged.
    Saturated,
    /// Count was at the 7-bit maximum and the policy is `Wrap`:
    /// the count wrapped to zero, as the raw 7-bit counter would.
    Wrapped,
}

/// Three 7-bit vote counters, indexed by [`Candidate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TallyBoard {
    counts: [u8; NUM_CANDIDATES],
}

impl TallyBoard {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            counts: [0; NUM_CANDIDATES],
        }
    }

    /// Current count for one candidate.
    #[inline]
    pub const fn count(&self, candidate: Candidate) -> u8 {
        self.counts[candidate.index()]
    }

    /// Sum of all counters.
    #[inline]
    pub fn total(&self) -> u16 {
        self.counts.iter().map(|&c| c as u16).sum()
    }

    /// True if the candidate's counter is at the 7-bit maximum.
    #[inline]
    pub const fn is_full(&self, candidate: Candidate) -> bool {
        self.counts[candidate.index()] == TALLY_MAX
    }

    /// Record one vote for `candidate` under the given overflow policy.
    pub fn record(&mut self, candidate: Candidate, policy: OverflowPolicy) -> RecordOutcome {
        let slot = &mut self.counts[candidate.index()];
        if *slot < TALLY_MAX {
            *slot += 1;
            RecordOutcome::Counted(*slot)
        } else {
            match policy {
                OverflowPolicy::Saturate => RecordOutcome::Saturated,
                OverflowPolicy::Wrap => {
                    *slot = 0;
                    RecordOutcome::Wrapped
                }
            }
        }
    }

    /// Zero all counters.
    pub fn reset(&mut self) {
        self.counts = [0; NUM_CANDIDATES];
    }

    /// Winner/tie query over the current counts.
    ///
    /// A tie is any configuration where at least two candidates attain the
    /// maximum count, including three-way ties and the all-zero board.
    /// There is no tie-break.
    pub fn winner(&self) -> WinnerResult {
        let max = *self.counts.iter().max().unwrap_or(&0);
        let mut leader = None;
        let mut contenders = 0u8;
        for candidate in Candidate::ALL {
            if self.count(candidate) == max {
                contenders += 1;
                leader = Some(candidate);
            }
        }
        match leader {
            Some(candidate) if contenders == 1 => WinnerResult::Winner {
                candidate,
                count: max,
            },
            _ => WinnerResult::Tie { count: max },
        }
    }
}

// ─── Winner Query ───────────────────────────────────────────────────

/// Result of the winner query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerResult {
    /// Unique candidate with the strictly highest tally.
    Winner { candidate: Candidate, count: u8 },
    /// Two or more candidates share the maximum tally.
    Tie { count: u8 },
}

// ─── Tests ──────────────────────────────────────────────────────────

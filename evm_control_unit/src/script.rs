//! Session script parser and runner for the simulator binary.
//!
//! A script is a line-oriented command list (one command per line, `#`
//! starts a comment). Each command expands to the pin-level tick sequence
//! a physical operator would drive:
//!
//! ```text
//! reset        # hold the reset line for a couple of ticks
//! on           # switch_on_evm; stays asserted for the rest of the session
//! vote 2       # full booth sequence: ready, release-ready + press, release
//! done         # voting_session_done
//! show 1       # display candidate 1's tally (observation recorded)
//! winner       # winner query (observation recorded)
//! off          # switch_off_evm
//! idle 5       # advance 5 ticks with held levels only
//! ```

use std::fmt;
use std::str::FromStr;

use evm_common::io::{InputFlags, InputSnapshot, OutputSnapshot};
use evm_common::state::Candidate;

use crate::cycle::Controller;

// ─── Error Type ─────────────────────────────────────────────────────

/// Script parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Unrecognized command word.
    UnknownCommand { line: usize, word: String },
    /// Missing or out-of-range command argument.
    BadArgument { line: usize, detail: String },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand { line, word } => {
                write!(f, "line {line}: unknown command '{word}'")
            }
            Self::BadArgument { line, detail } => {
                write!(f, "line {line}: {detail}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

// ─── Commands ───────────────────────────────────────────────────────

/// One script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Assert the reset line for two ticks.
    Reset,
    /// Assert switch_on_evm (held for the rest of the script).
    On,
    /// Cast one vote via the full booth interlock sequence.
    Vote(Candidate),
    /// Assert voting_session_done.
    Done,
    /// Select a candidate (1..=3) on the result display; records an
    /// observation.
    Show(Candidate),
    /// Switch the display to winner mode; records an observation.
    Winner,
    /// Assert switch_off_evm and release switch_on_evm.
    Off,
    /// Advance N ticks with only the held levels driven.
    Idle(u32),
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(text: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let stripped = raw.split('#').next().unwrap_or("").trim();
        if stripped.is_empty() {
            continue;
        }
        commands.push(parse_line(line, stripped)?);
    }
    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<Command, ScriptError> {
    let mut words = text.split_whitespace();
    let word = words.next().unwrap_or("");

    // Only argument-taking commands consume a second token; everything
    // left over is rejected below, so `on extra` or `winner 3` fail.
    let command = match word.to_ascii_lowercase().as_str() {
        "reset" => Command::Reset,
        "on" => Command::On,
        "vote" => Command::Vote(parse_candidate(line, words.next())?),
        "done" => Command::Done,
        "show" => Command::Show(parse_candidate(line, words.next())?),
        "winner" => Command::Winner,
        "off" => Command::Off,
        "idle" => {
            let n = words.next().ok_or_else(|| ScriptError::BadArgument {
                line,
                detail: "idle requires a tick count".to_string(),
            })?;
            Command::Idle(u32::from_str(n).map_err(|_| ScriptError::BadArgument {
                line,
                detail: format!("invalid tick count '{n}'"),
            })?)
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                word: word.to_string(),
            });
        }
    };

    if let Some(extra) = words.next() {
        return Err(ScriptError::BadArgument {
            line,
            detail: format!("unexpected trailing argument '{extra}'"),
        });
    }
    Ok(command)
}

fn parse_candidate(line: usize, arg: Option<&str>) -> Result<Candidate, ScriptError> {
    let arg = arg.ok_or_else(|| ScriptError::BadArgument {
        line,
        detail: "expected a candidate number (1..=3)".to_string(),
    })?;
    u8::from_str(arg)
        .ok()
        .and_then(Candidate::from_id)
        .ok_or_else(|| ScriptError::BadArgument {
            line,
            detail: format!("invalid candidate '{arg}' (expected 1..=3)"),
        })
}

// ─── Runner ─────────────────────────────────────────────────────────

/// Output captured for a `show` or `winner` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub command: Command,
    pub output: OutputSnapshot,
}

/// Drives a [`Controller`] through a command list, expanding each command
/// into the pin-accurate tick sequence and holding level signals (power
/// switch) across commands.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    /// Level lines held between commands.
    held: InputFlags,
}

impl ScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all commands, returning the observations from `show`/`winner`.
    pub fn run(&mut self, cu: &mut Controller, commands: &[Command]) -> Vec<Observation> {
        let mut observations = Vec::new();
        for &command in commands {
            if let Some(output) = self.run_one(cu, command) {
                observations.push(Observation { command, output });
            }
        }
        observations
    }

    fn run_one(&mut self, cu: &mut Controller, command: Command) -> Option<OutputSnapshot> {
        match command {
            Command::Reset => {
                self.held = InputFlags::empty();
                self.ticks(cu, true, self.held, 0, 2);
                None
            }
            Command::On => {
                self.held |= InputFlags::SWITCH_ON;
                self.ticks(cu, false, self.held, 0, 2);
                None
            }
            Command::Vote(candidate) => {
                // Booth interlock: ready, release-ready + press, release.
                self.ticks(cu, false, self.held | InputFlags::CANDIDATE_READY, 0, 2);
                self.ticks(cu, false, self.held | InputFlags::vote(candidate), 0, 3);
                self.ticks(cu, false, self.held, 0, 3);
                None
            }
            Command::Done => {
                self.ticks(cu, false, self.held | InputFlags::SESSION_DONE, 0, 3);
                None
            }
            Command::Show(candidate) => {
                Some(self.ticks(cu, false, self.held, candidate.id() - 1, 2))
            }
            Command::Winner => {
                Some(self.ticks(cu, false, self.held | InputFlags::DISPLAY_WINNER, 0, 2))
            }
            Command::Off => {
                self.held &= !InputFlags::SWITCH_ON;
                self.ticks(cu, false, self.held | InputFlags::SWITCH_OFF, 0, 2);
                None
            }
            Command::Idle(n) => {
                self.ticks(cu, false, self.held, 0, n);
                None
            }
        }
    }

    /// Advance `n` ticks with the same input vector; returns the last output.
    fn ticks(
        &self,
        cu: &mut Controller,
        reset: bool,
        flags: InputFlags,
        select: u8,
        n: u32,
    ) -> OutputSnapshot {
        let input = InputSnapshot::new(flags, select);
        let mut output = OutputSnapshot::ZERO;
        for _ in 0..n {
            output = cu.tick(reset, input).output;
        }
        output
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

//! TOML configuration loader with validation.
//!
//! Loads the simulator configuration: ballot (candidate labels) and the
//! two input-policy knobs the hardware left undefined — simultaneous
//! multi-candidate votes and tally overflow. Validation: exactly one label
//! per candidate, labels unique and non-empty.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use evm_common::config::{ConfigError, ConfigLoader, SharedConfig};
use evm_common::consts::NUM_CANDIDATES;
use evm_common::state::Candidate;

// ─── Policy Knobs ───────────────────────────────────────────────────

/// Policy for a tick where more than one vote line is asserted.
///
/// The hardware never defines this case; both policies produce a valid
/// tick, never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiVotePolicy {
    /// Ignore the tick entirely: no tally change, conflict logged.
    #[default]
    Ignore,
    /// Resolve in favor of the lowest candidate id.
    Lowest,
}

/// Policy for a vote landing on a counter already at the 7-bit maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Hold the counter at 127 and drop the vote.
    #[default]
    Saturate,
    /// Wrap to zero, as the raw 7-bit counter would.
    Wrap,
}

/// Input-handling policies, grouped for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Simultaneous multi-candidate vote handling.
    #[serde(default)]
    pub multi_vote: MultiVotePolicy,
    /// Tally overflow handling.
    #[serde(default)]
    pub overflow: OverflowPolicy,
}

// ─── Ballot ─────────────────────────────────────────────────────────

/// One ballot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Display label for result/winner output.
    pub label: String,
}

/// The ballot: one entry per candidate, in wire-id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotConfig {
    pub candidates: Vec<CandidateConfig>,
}

impl BallotConfig {
    /// Label for a candidate. Falls back to the wire id if the ballot is
    /// shorter than expected (cannot happen after validation).
    pub fn label(&self, candidate: Candidate) -> &str {
        self.candidates
            .get(candidate.index())
            .map(|c| c.label.as_str())
            .unwrap_or("?")
    }
}

impl Default for BallotConfig {
    fn default() -> Self {
        Self {
            candidates: Candidate::ALL
                .iter()
                .map(|c| CandidateConfig {
                    label: format!("Candidate {}", c.id()),
                })
                .collect(),
        }
    }
}

// ─── Simulator Config ───────────────────────────────────────────────

/// Complete validated simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub shared: SharedConfig,
    #[serde(default)]
    pub ballot: BallotConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl SimConfig {
    /// Validate semantic rules beyond TOML syntax.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - the ballot does not have exactly one entry per candidate
    /// - any label is empty
    /// - labels are not unique
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.ballot.candidates.len() != NUM_CANDIDATES {
            return Err(ConfigError::ValidationError(format!(
                "ballot must list exactly {NUM_CANDIDATES} candidates, got {}",
                self.ballot.candidates.len()
            )));
        }

        let mut seen = HashSet::new();
        for (i, entry) in self.ballot.candidates.iter().enumerate() {
            if entry.label.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "candidate {} label is empty",
                    i + 1
                )));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate candidate label '{}'",
                    entry.label
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            shared: SharedConfig {
                log_level: Default::default(),
                service_name: "evm-sim".to_string(),
            },
            ballot: BallotConfig::default(),
            policy: PolicyConfig::default(),
        }
    }
}

/// Load and validate the simulator configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<SimConfig, ConfigError> {
    let config = SimConfig::load(path)?;
    config.validate()?;
    Ok(config)
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn default_policies() {
        let p = PolicyConfig::default();
        assert_eq!(p.multi_vote, MultiVotePolicy::Ignore);
        assert_eq!(p.overflow, OverflowPolicy::Saturate);
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            [shared]
            log_level = "debug"
            service_name = "booth-7"

            [ballot]
            candidates = [
                { label = "Ada" },
                { label = "Grace" },
                { label = "Edsger" },
            ]

            [policy]
            multi_vote = "lowest"
            overflow = "wrap"
        "#;
        let config: SimConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        assert_eq!(config.ballot.label(Candidate::C2), "Grace");
        assert_eq!(config.policy.multi_vote, MultiVotePolicy::Lowest);
        assert_eq!(config.policy.overflow, OverflowPolicy::Wrap);
    }

    #[test]
    fn ballot_and_policy_sections_optional() {
        let config: SimConfig =
            toml::from_str("[shared]\nservice_name = \"evm\"").unwrap();
        config.validate().unwrap();
        assert_eq!(config.ballot.label(Candidate::C1), "Candidate 1");
    }

    #[test]
    fn wrong_candidate_count_rejected() {
        let toml_str = r#"
            [shared]
            service_name = "evm"
            [ballot]
            candidates = [{ label = "Only One" }]
        "#;
        let config: SimConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn duplicate_labels_rejected() {
        let toml_str = r#"
            [shared]
            service_name = "evm"
            [ballot]
            candidates = [
                { label = "Same" },
                { label = "Same" },
                { label = "Other" },
            ]
        "#;
        let config: SimConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[shared]\nservice_name = \"evm-disk\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.shared.service_name, "evm-disk");
    }
}

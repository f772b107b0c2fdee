//! Engine configuration.
//!
//! Rule variants the source game leaves open are configuration, not constants:
//! - Medic self-save
//! - Vote tie handling
//! - Win rule
//! - Death cause disclosure
//! - Sub-phase deadlines (enforced by the session layer)

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What happens when the day vote ends in a tie for the top count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteTiePolicy {
    /// Nobody is eliminated this round.
    #[default]
    NoElimination,
    /// One more vote restricted to the tied candidates; a second tie
    /// eliminates nobody.
    Runoff,
}

/// When the game is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// Aggressors win when every non-aggressor is dead; the village wins
    /// when every aggressor is dead.
    #[default]
    Massacre,
    /// As `Massacre`, but aggressors also win once all specialists or all
    /// commoners are dead.
    Edge,
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether the Medic may save themselves from the night kill.
    pub allow_self_save: bool,

    /// Tie handling for the day vote.
    pub vote_tie_policy: VoteTiePolicy,

    /// Win rule.
    pub win_rule: WinRule,

    /// Whether death broadcasts name the cause.
    pub disclose_causes: bool,

    /// Deadline for each sub-phase. `None` waits for every expected actor.
    pub phase_timeout: Option<Duration>,

    /// Seed for role dealing and agent streams.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            allow_self_save: false,
            vote_tie_policy: VoteTiePolicy::default(),
            win_rule: WinRule::default(),
            disclose_causes: false,
            phase_timeout: Some(Duration::from_secs(60)),
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Allow or forbid Medic self-save.
    #[must_use]
    pub fn with_self_save(mut self, allow: bool) -> Self {
        self.allow_self_save = allow;
        self
    }

    /// Set the vote tie policy.
    #[must_use]
    pub fn with_tie_policy(mut self, policy: VoteTiePolicy) -> Self {
        self.vote_tie_policy = policy;
        self
    }

    /// Set the win rule.
    #[must_use]
    pub fn with_win_rule(mut self, rule: WinRule) -> Self {
        self.win_rule = rule;
        self
    }

    /// Disclose death causes in broadcasts.
    #[must_use]
    pub fn with_disclosed_causes(mut self, disclose: bool) -> Self {
        self.disclose_causes = disclose;
        self
    }

    /// Set (or remove) the sub-phase deadline.
    #[must_use]
    pub fn with_phase_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.phase_timeout = timeout;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.allow_self_save);
        assert_eq!(config.vote_tie_policy, VoteTiePolicy::NoElimination);
        assert_eq!(config.win_rule, WinRule::Massacre);
        assert!(!config.disclose_causes);
        assert_eq!(config.phase_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_self_save(true)
            .with_tie_policy(VoteTiePolicy::Runoff)
            .with_win_rule(WinRule::Edge)
            .with_phase_timeout(None)
            .with_seed(7);

        assert!(config.allow_self_save);
        assert_eq!(config.vote_tie_policy, VoteTiePolicy::Runoff);
        assert_eq!(config.win_rule, WinRule::Edge);
        assert_eq!(config.phase_timeout, None);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_self_save(true);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}

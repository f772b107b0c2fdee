//! Built-in agents.

use crate::core::{Action, ActorId, GameRng};
use crate::events::LogEntry;

use super::agent::{Agent, AgentError, Prompt, Submission};

/// Picks uniformly among legal actions, preferring anything over abstaining.
///
/// During discussion it names a random suspect.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
    heard: usize,
}

impl RandomAgent {
    /// A random agent with its own seeded stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed))
    }

    /// A random agent drawing from `rng`, typically a fork of the game seed.
    #[must_use]
    pub fn from_rng(rng: GameRng) -> Self {
        Self { rng, heard: 0 }
    }

    /// One agent per seat, each on its own fork of `seed`.
    #[must_use]
    pub fn for_table(seed: u64, seats: usize) -> Vec<Self> {
        let mut rng = GameRng::new(seed);
        (0..seats).map(|_| Self::from_rng(rng.fork())).collect()
    }

    /// Log entries received so far.
    #[must_use]
    pub fn heard(&self) -> usize {
        self.heard
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    async fn decide(&mut self, prompt: &Prompt) -> Result<Submission, AgentError> {
        if prompt.is_discussion() {
            let others: Vec<ActorId> = prompt
                .view
                .alive_actors
                .iter()
                .copied()
                .filter(|a| *a != prompt.actor)
                .collect();
            return Ok(match self.rng.choose(&others) {
                Some(suspect) => Submission::Speak(format!("I suspect {}.", suspect)),
                None => Submission::Act(Action::Abstain),
            });
        }

        let committed: Vec<Action> = prompt
            .options
            .iter()
            .copied()
            .filter(|a| *a != Action::Abstain)
            .collect();
        let pool = if committed.is_empty() {
            &prompt.options
        } else {
            &committed
        };
        let action = self.rng.choose(pool).copied().unwrap_or(Action::Abstain);
        Ok(Submission::Act(action))
    }

    async fn notify(&mut self, _entry: &LogEntry) {
        self.heard += 1;
    }
}

/// Never answers; every prompt fails as unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAgent;

#[async_trait::async_trait]
impl Agent for SilentAgent {
    async fn decide(&mut self, prompt: &Prompt) -> Result<Submission, AgentError> {
        Err(AgentError::Unavailable(format!("{} is silent", prompt.actor)))
    }

    async fn notify(&mut self, _entry: &LogEntry) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, Role};
    use crate::engine::{ActorView, PrivateKnowledge};

    fn prompt(phase: Phase, options: Vec<Action>) -> Prompt {
        let actor = ActorId::new(1);
        Prompt {
            ticket: 1,
            actor,
            view: ActorView {
                actor,
                role: Role::Commoner,
                alive: true,
                round: 1,
                phase,
                alive_actors: vec![actor, ActorId::new(2), ActorId::new(3)],
                recent_deaths: Vec::new(),
                awaiting_input: true,
                private: PrivateKnowledge::None,
            },
            options,
        }
    }

    #[tokio::test]
    async fn test_random_agent_speaks_in_discussion() {
        let mut agent = RandomAgent::new(3);
        let reply = agent.decide(&prompt(Phase::DayDiscuss, vec![Action::Abstain])).await;
        match reply {
            Ok(Submission::Speak(text)) => assert!(text.starts_with("I suspect Actor ")),
            other => panic!("expected speech, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_random_agent_prefers_committing() {
        let mut agent = RandomAgent::new(3);
        let options = vec![Action::Vote(ActorId::new(2)), Action::Abstain];
        for _ in 0..20 {
            let reply = agent.decide(&prompt(Phase::DayVote, options.clone())).await;
            assert_eq!(reply, Ok(Submission::Act(Action::Vote(ActorId::new(2)))));
        }

        let reply = agent.decide(&prompt(Phase::DayVote, vec![Action::Abstain])).await;
        assert_eq!(reply, Ok(Submission::Act(Action::Abstain)));
    }

    #[tokio::test]
    async fn test_silent_agent_is_unavailable() {
        let reply = SilentAgent.decide(&prompt(Phase::DayVote, vec![Action::Abstain])).await;
        assert!(matches!(reply, Err(AgentError::Unavailable(_))));
    }

    #[test]
    fn test_table_has_one_agent_per_seat() {
        let agents = RandomAgent::for_table(9, 4);
        assert_eq!(agents.len(), 4);
        assert_eq!(agents.iter().map(RandomAgent::heard).sum::<usize>(), 0);
    }
}

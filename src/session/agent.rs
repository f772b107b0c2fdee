use thiserror::Error;

use crate::core::{Action, ActorId};
use crate::engine::ActorView;
use crate::events::LogEntry;

/// A request for one decision.
///
/// Self-contained: everything the actor may know is in `view`, and every
/// action the gateway would accept is in `options`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    /// Identifies the sub-phase this prompt belongs to. Replies carrying an
    /// older ticket are dropped.
    pub ticket: u64,
    /// Who is being asked.
    pub actor: ActorId,
    /// What they may know.
    pub view: ActorView,
    /// Actions that would be accepted right now.
    pub options: Vec<Action>,
}

impl Prompt {
    /// Whether the open sub-phase is discussion, where speech is accepted.
    #[must_use]
    pub fn is_discussion(&self) -> bool {
        self.view.phase == crate::core::Phase::DayDiscuss
    }
}

/// An agent's answer to a [`Prompt`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// A gameplay action.
    Act(Action),
    /// A speech, during discussion only.
    Speak(String),
}

/// Why an agent produced no decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The collaborator behind the agent could not be reached.
    #[error("agent unavailable: {0}")]
    Unavailable(String),
}

/// Something that makes decisions for one seat.
///
/// Implementations can be scripted bots, language-model clients, or humans
/// behind a network connection. The room never calls into the game on an
/// agent's behalf except through the gateway.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Decide what to do in the open sub-phase.
    async fn decide(&mut self, prompt: &Prompt) -> Result<Submission, AgentError>;

    /// Receive a log entry this seat may read.
    async fn notify(&mut self, entry: &LogEntry);
}

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::core::ActorId;
use crate::events::LogEntry;

use super::agent::{Agent, AgentError, Prompt, Submission};

/// Room-to-seat message.
#[derive(Clone, Debug)]
pub(crate) enum Inbox {
    Prompt(Prompt),
    Notice(LogEntry),
}

/// Seat-to-room message.
#[derive(Debug)]
pub(crate) struct Reply {
    pub(crate) actor: ActorId,
    pub(crate) ticket: u64,
    pub(crate) outcome: Result<Submission, AgentError>,
}

/// Runs one agent in its own task.
///
/// - Room sends prompts and log notices through the inbox
/// - Seat calls `Agent::decide` and sends the reply back tagged with the
///   prompt's ticket
/// - Seat forwards notices to `Agent::notify`
///
/// The task ends when the room drops its inbox sender.
pub(crate) struct Seat {
    actor: ActorId,
    agent: Box<dyn Agent>,
    inbox: UnboundedReceiver<Inbox>,
    outbox: UnboundedSender<Reply>,
}

impl Seat {
    pub(crate) fn spawn(
        actor: ActorId,
        agent: Box<dyn Agent>,
        outbox: UnboundedSender<Reply>,
    ) -> UnboundedSender<Inbox> {
        let (tx, rx) = unbounded_channel();
        let seat = Self {
            actor,
            agent,
            inbox: rx,
            outbox,
        };
        tokio::spawn(seat.run());
        tx
    }

    async fn run(mut self) {
        while let Some(message) = self.inbox.recv().await {
            match message {
                Inbox::Prompt(ref prompt) => self.act(prompt).await,
                Inbox::Notice(ref entry) => self.agent.notify(entry).await,
            }
        }
        debug!(actor = %self.actor, "seat closed");
    }

    async fn act(&mut self, prompt: &Prompt) {
        let outcome = self.agent.decide(prompt).await;
        let reply = Reply {
            actor: self.actor,
            ticket: prompt.ticket,
            outcome,
        };
        if self.outbox.send(reply).is_err() {
            debug!(actor = %self.actor, "room gone, reply dropped");
        }
    }
}

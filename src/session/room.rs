use std::collections::BTreeSet;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::core::{ActorId, ActorMap, GameError};
use crate::engine::Game;
use crate::events::LogEntry;

use super::agent::{Agent, Prompt, Submission};
use super::seat::{Inbox, Reply, Seat};

/// What woke the room up while it waited on a sub-phase.
enum Wake {
    Reply(Reply),
    Deadline,
    Shutdown,
}

/// Runs one game against a set of agents.
///
/// The room is the only writer of its [`Game`]. Agents run in their own
/// tasks and talk to the room through channels; every reply goes through
/// the gateway like any other submission.
///
/// Per sub-phase the room:
/// - Prompts every expected actor with a seated agent
/// - Applies replies as they arrive, dropping stale ones
/// - Turns agent errors and rejected submissions into abstentions
/// - Expires the sub-phase once every prompted actor has answered, or when
///   the configured deadline passes
///
/// A shutdown signal stops the loop between mutations and hands the game
/// back as it stands.
#[derive(Debug)]
pub struct Room {
    game: Game,
    seats: ActorMap<Option<UnboundedSender<Inbox>>>,
    replies: UnboundedReceiver<Reply>,
    outbox: UnboundedSender<Reply>,
    shutdown: Option<watch::Receiver<bool>>,
    ticket: u64,
    cursor: usize,
}

impl Room {
    /// A room around `game` with no seated agents.
    #[must_use]
    pub fn new(game: Game) -> Self {
        let (outbox, replies) = unbounded_channel();
        Self {
            seats: ActorMap::with_default(game.roster().len()),
            game,
            replies,
            outbox,
            shutdown: None,
            ticket: 0,
            cursor: 0,
        }
    }

    /// Builder: stop when `shutdown` turns true.
    #[must_use]
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Seat `agent` for `actor`, replacing any earlier agent.
    ///
    /// Spawns the agent's task, so this must run inside a tokio runtime.
    pub fn sit<A>(&mut self, actor: ActorId, agent: A) -> Result<(), GameError>
    where
        A: Agent + 'static,
    {
        let slot = self
            .seats
            .get_mut(actor)
            .ok_or(GameError::UnknownOrDeadActor(actor))?;
        *slot = Some(Seat::spawn(actor, Box::new(agent), self.outbox.clone()));
        Ok(())
    }

    /// The game as it currently stands.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Play until the game ends or shutdown is signalled.
    pub async fn run(mut self) -> Game {
        info!(actors = self.game.roster().len(), "room opened");
        loop {
            self.forward_log();
            if self.game.is_over() {
                break;
            }
            if self.stopped() || !self.play_phase().await {
                info!(phase = %self.game.phase(), round = self.game.round(), "room shut down");
                break;
            }
        }
        self.forward_log();
        self.game
    }
}

impl Room {
    /// Drive the open sub-phase to completion. Returns `false` on shutdown.
    async fn play_phase(&mut self) -> bool {
        self.ticket += 1;
        let ticket = self.ticket;
        let phase = self.game.phase();

        let mut waiting = BTreeSet::new();
        for actor in self.game.awaiting() {
            if self.prompt(actor, ticket) {
                waiting.insert(actor);
            }
        }
        let deadline = self.game.config().phase_timeout.map(|t| Instant::now() + t);

        while !waiting.is_empty() {
            match self.next_wake(deadline).await {
                Wake::Reply(reply) => {
                    if reply.ticket != ticket || !waiting.remove(&reply.actor) {
                        debug!(actor = %reply.actor, ticket = reply.ticket, "stale reply dropped");
                        continue;
                    }
                    let closed = self.apply(reply);
                    self.forward_log();
                    if closed {
                        return true;
                    }
                }
                Wake::Deadline => {
                    warn!(%phase, missing = ?waiting, "deadline passed");
                    break;
                }
                Wake::Shutdown => return false,
            }
        }

        if let Err(e) = self.game.expire() {
            warn!(%phase, error = %e, "expire failed");
        }
        true
    }

    fn prompt(&self, actor: ActorId, ticket: u64) -> bool {
        let Some(Some(inbox)) = self.seats.get(actor) else {
            debug!(%actor, "no agent seated");
            return false;
        };
        let Ok(view) = self.game.get_state(actor) else {
            return false;
        };
        let prompt = Prompt {
            ticket,
            actor,
            view,
            options: self.game.legal_actions(actor),
        };
        if inbox.send(Inbox::Prompt(prompt)).is_err() {
            warn!(%actor, "seat closed, actor will abstain");
            return false;
        }
        true
    }

    /// Apply one reply. Returns whether it closed the sub-phase.
    fn apply(&mut self, reply: Reply) -> bool {
        let actor = reply.actor;
        let result = match reply.outcome {
            Ok(Submission::Act(action)) => self.game.submit(actor, action),
            Ok(Submission::Speak(text)) => self.game.submit_speech(actor, text),
            Err(e) => {
                warn!(%actor, error = %e, "agent unavailable, abstaining");
                return self.abstain(actor);
            }
        };
        match result {
            Ok(accepted) => accepted.phase_closed,
            Err(e) => {
                warn!(%actor, error = %e, "submission rejected, abstaining");
                self.abstain(actor)
            }
        }
    }

    fn abstain(&mut self, actor: ActorId) -> bool {
        match self.game.submit_abstain(actor) {
            Ok(accepted) => accepted.phase_closed,
            Err(e) => {
                warn!(%actor, error = %e, "abstain rejected");
                false
            }
        }
    }

    /// Send every new log entry to the seats allowed to read it.
    fn forward_log(&mut self) {
        let entries: Vec<LogEntry> = self.game.log().since(self.cursor).cloned().collect();
        self.cursor += entries.len();
        for entry in entries {
            for (actor, inbox) in self.seats.iter() {
                let Some(inbox) = inbox else {
                    continue;
                };
                let visible = self
                    .game
                    .roster()
                    .role(actor)
                    .is_some_and(|role| entry.visible_to(actor, role));
                if visible && inbox.send(Inbox::Notice(entry.clone())).is_err() {
                    debug!(%actor, "seat closed, notice dropped");
                }
            }
        }
    }

    fn stopped(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }

    async fn next_wake(&mut self, deadline: Option<Instant>) -> Wake {
        let replies = &mut self.replies;
        let shutdown = &mut self.shutdown;
        tokio::select! {
            reply = Self::recv(replies, deadline) => match reply {
                Some(reply) => Wake::Reply(reply),
                None => Wake::Deadline,
            },
            () = Self::cancelled(shutdown) => Wake::Shutdown,
        }
    }

    async fn recv(replies: &mut UnboundedReceiver<Reply>, deadline: Option<Instant>) -> Option<Reply> {
        match deadline {
            Some(at) => tokio::time::timeout_at(at, replies.recv()).await.ok().flatten(),
            None => replies.recv().await,
        }
    }

    async fn cancelled(shutdown: &mut Option<watch::Receiver<bool>>) {
        let Some(rx) = shutdown else {
            return std::future::pending().await;
        };
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }
}

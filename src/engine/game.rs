//! The game facade.
//!
//! `Game` is the single owner of [`GameState`]. Every mutation enters through
//! a `submit_*` call or [`Game::expire`]; both go through the gateway first
//! and only then touch state.
//!
//! ## Flow
//!
//! 1. A submission passes the gateway and is buffered for the open sub-phase
//! 2. Once every expected actor has submitted (or the sub-phase expires),
//!    the sub-phase closes and its resolver runs
//! 3. Deaths go through the death queue, one at a time, with a win check
//!    after each
//! 4. The scheduler opens the next sub-phase; steps nobody is expected in
//!    close immediately

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    is_aggressive, Action, ActorId, EngineConfig, Faction, GameError, GameState, NightStep, Phase,
    Role, SetupError, VoteTiePolicy,
};
use crate::events::{Audience, BroadcastLog, LogEntry, Message};
use crate::gateway::ActionGateway;
use crate::roster::{DeathCause, Resource, RoleSet, Roster, RosterBuilder};
use crate::rules::{Drain, GameResult, NightResolver, Remedy, VoteOutcome, VoteResolver};

use super::view::ActorView;

/// Outcome of an accepted submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accepted {
    /// The submission replaced an earlier one from the same actor.
    pub replaced: bool,
    /// The submission completed the sub-phase, which has now closed.
    pub phase_closed: bool,
}

/// What happens after a sub-phase is resolved.
enum Step {
    /// Open this phase next.
    Open(Phase),
    /// A phase is already open, or the game ended.
    Hold,
}

/// A running game.
///
/// ## Example
///
/// ```
/// use rust_deduction::core::{ActorId, EngineConfig, Phase, NightStep, Role};
/// use rust_deduction::engine::Game;
/// use rust_deduction::roster::Roster;
///
/// let a = ActorId::new;
/// let roster = Roster::from_assignment([
///     (a(1), Role::Aggressor),
///     (a(2), Role::Commoner),
///     (a(3), Role::Commoner),
/// ]).unwrap();
///
/// let mut game = Game::new(EngineConfig::default(), roster);
/// assert_eq!(game.phase(), Phase::Night(NightStep::Kill));
///
/// game.submit_kill(a(1), a(2)).unwrap();
/// assert_eq!(game.phase(), Phase::DayDiscuss);
/// assert!(!game.roster().is_alive(a(2)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    config: EngineConfig,
    state: GameState,
}

impl Game {
    /// Start a game on a dealt roster. The first night opens immediately.
    #[must_use]
    pub fn new(config: EngineConfig, roster: Roster) -> Self {
        info!(actors = roster.len(), "game created");
        let mut game = Self {
            config,
            state: GameState::new(roster),
        };
        if !game.enter(Phase::Night(NightStep::Kill)) {
            game.close_phase();
        }
        game
    }

    /// Deal `roles` with the configured seed and start a game.
    pub fn deal(config: EngineConfig, roles: &RoleSet) -> Result<Self, SetupError> {
        let roster = RosterBuilder::new(roles.clone())
            .with_seed(config.seed)
            .build()?;
        Ok(Self::new(config, roster))
    }

    /// Restore a game from [`Game::snapshot`] bytes.
    pub fn restore(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Serialize the whole game.
    pub fn snapshot(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    // === Queries ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full engine state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        self.state.roster()
    }

    /// The open sub-phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Current round.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round()
    }

    /// The outcome, once decided.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.result()
    }

    /// Whether the game is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// The full, unfiltered broadcast log.
    #[must_use]
    pub fn log(&self) -> &BroadcastLog {
        self.state.log()
    }

    /// Actors the open sub-phase waits for, in seat order.
    #[must_use]
    pub fn expected_actors(&self) -> Vec<ActorId> {
        self.state.scheduler().expected().collect()
    }

    /// Expected actors that have not submitted yet.
    #[must_use]
    pub fn awaiting(&self) -> Vec<ActorId> {
        let scheduler = self.state.scheduler();
        scheduler
            .expected()
            .filter(|a| !scheduler.has_submitted(*a))
            .collect()
    }

    /// What `actor` may know right now.
    pub fn get_state(&self, actor: ActorId) -> Result<ActorView, GameError> {
        ActorView::build(&self.state, actor, self.config.disclose_causes)
            .ok_or(GameError::UnknownOrDeadActor(actor))
    }

    /// The log entries `actor` may read, in order.
    pub fn get_broadcast_log(&self, actor: ActorId) -> Result<Vec<LogEntry>, GameError> {
        let role = self
            .state
            .roster()
            .role(actor)
            .ok_or(GameError::UnknownOrDeadActor(actor))?;
        Ok(self.state.log().for_actor(actor, role))
    }

    /// Every action `actor` could submit right now without rejection.
    ///
    /// Speech is not listed; it is accepted whenever `Abstain` is during
    /// `DayDiscuss`.
    #[must_use]
    pub fn legal_actions(&self, actor: ActorId) -> Vec<Action> {
        let gateway = ActionGateway::new(&self.config, &self.state);
        let targets = self.state.roster().alive_ids();
        let mut candidates: Vec<Action> = match self.phase() {
            Phase::Night(NightStep::Kill) => targets.iter().map(|t| Action::Kill(*t)).collect(),
            Phase::Night(NightStep::Inspect) => {
                targets.iter().map(|t| Action::Inspect(*t)).collect()
            }
            Phase::Night(NightStep::Remedy) => targets
                .iter()
                .flat_map(|t| [Action::Save(*t), Action::Poison(*t)])
                .collect(),
            Phase::DayVote => targets.iter().map(|t| Action::Vote(*t)).collect(),
            Phase::HunterResolve => targets
                .iter()
                .map(|t| Action::Retaliate(Some(*t)))
                .chain([Action::Retaliate(None)])
                .collect(),
            Phase::DayDiscuss | Phase::Ended => Vec::new(),
        };
        candidates.push(Action::Abstain);
        candidates.retain(|a| gateway.check(actor, *a).is_ok());
        candidates
    }

    // === Submissions ===

    /// Validate and buffer a gameplay action.
    pub fn submit(&mut self, actor: ActorId, action: Action) -> Result<Accepted, GameError> {
        ActionGateway::new(&self.config, &self.state)
            .check(actor, action)
            .inspect_err(|e| debug!(%actor, ?action, error = %e, "submission rejected"))?;

        let replaced = self.state.buffer.insert(actor, action).is_some();
        let sequence = self.state.record_action(actor, action);
        debug!(%actor, ?action, sequence, replaced, phase = %self.phase(), "submission accepted");
        Ok(self.mark_done(actor, replaced))
    }

    /// Aggressor nominates tonight's victim.
    pub fn submit_kill(&mut self, actor: ActorId, target: ActorId) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Kill(target))
    }

    /// Inspector checks an actor.
    pub fn submit_inspect(&mut self, actor: ActorId, target: ActorId) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Inspect(target))
    }

    /// Medic spends the antidote on tonight's victim.
    pub fn submit_save(&mut self, actor: ActorId, target: ActorId) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Save(target))
    }

    /// Medic spends the poison.
    pub fn submit_poison(&mut self, actor: ActorId, target: ActorId) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Poison(target))
    }

    /// Day vote.
    pub fn submit_vote(&mut self, actor: ActorId, target: ActorId) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Vote(target))
    }

    /// Dead Marksman fires, or holds fire with `None`.
    pub fn submit_retaliate(
        &mut self,
        actor: ActorId,
        target: Option<ActorId>,
    ) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Retaliate(target))
    }

    /// Pass in the open sub-phase.
    pub fn submit_abstain(&mut self, actor: ActorId) -> Result<Accepted, GameError> {
        self.submit(actor, Action::Abstain)
    }

    /// Speak during discussion. Counts as the speaker's turn.
    pub fn submit_speech(
        &mut self,
        actor: ActorId,
        text: impl Into<String>,
    ) -> Result<Accepted, GameError> {
        ActionGateway::new(&self.config, &self.state)
            .check_speech(actor)
            .inspect_err(|e| debug!(%actor, error = %e, "speech rejected"))?;

        let round = self.round();
        let text = text.into();
        self.state
            .log
            .push(round, Audience::Everyone, Message::Speech { actor, text });
        debug!(%actor, round, "speech accepted");
        Ok(self.mark_done(actor, false))
    }

    /// Close the open sub-phase now. Actors that have not submitted abstain.
    ///
    /// Returns the sub-phase that is open afterwards.
    pub fn expire(&mut self) -> Result<Phase, GameError> {
        if self.is_over() {
            return Err(GameError::GameEnded);
        }
        let missing = self.awaiting();
        if !missing.is_empty() {
            info!(phase = %self.phase(), ?missing, "sub-phase expired");
        }
        self.close_phase();
        Ok(self.phase())
    }

    fn mark_done(&mut self, actor: ActorId, replaced: bool) -> Accepted {
        self.state.scheduler.mark(actor);
        let phase_closed = self.state.scheduler.is_complete();
        if phase_closed {
            self.close_phase();
        }
        Accepted {
            replaced,
            phase_closed,
        }
    }

    // === Transitions ===

    /// Close the open sub-phase, resolve it, and open the next one that
    /// waits for somebody.
    fn close_phase(&mut self) {
        loop {
            let phase = self.phase();
            let decisions = self.state.buffer.take();
            debug!(%phase, round = self.round(), decisions = decisions.len(), "sub-phase closed");

            let step = match phase {
                Phase::Night(NightStep::Kill) => {
                    self.resolve_kill(&decisions);
                    Step::Open(self.state.scheduler.successor())
                }
                Phase::Night(NightStep::Inspect) => {
                    self.resolve_inspect(&decisions);
                    Step::Open(self.state.scheduler.successor())
                }
                Phase::Night(NightStep::Remedy) => {
                    self.resolve_remedy(&decisions);
                    self.finish_night()
                }
                Phase::DayDiscuss => Step::Open(self.state.scheduler.successor()),
                Phase::DayVote => self.resolve_vote(&decisions),
                Phase::HunterResolve => self.resolve_retaliation(&decisions),
                Phase::Ended => Step::Hold,
            };

            let Step::Open(next) = step else {
                return;
            };
            if self.enter(next) {
                return;
            }
        }
    }

    /// Open `phase`. Returns `false` if nobody is expected in it.
    fn enter(&mut self, phase: Phase) -> bool {
        if phase == Phase::Night(NightStep::Kill) {
            self.state.night = NightResolver::new();
        }
        if self.state.scheduler.enter(phase, &self.state.roster) {
            self.announce_phase();
            true
        } else {
            debug!(%phase, "nobody expected, step skipped");
            false
        }
    }

    fn announce_phase(&mut self) {
        let phase = self.phase();
        let round = self.round();
        let expected = self.expected_actors();
        info!(%phase, round, expected = expected.len(), "sub-phase opened");

        match phase {
            Phase::Night(NightStep::Inspect | NightStep::Remedy) => {
                for actor in expected {
                    self.state
                        .log
                        .push(round, Audience::Actor(actor), Message::PhaseOpened { phase });
                }
            }
            _ => {
                self.state
                    .log
                    .push(round, Audience::Everyone, Message::PhaseOpened { phase });
            }
        }
    }

    fn resolve_kill(&mut self, decisions: &[(ActorId, Action)]) {
        let nominations = decisions.iter().filter_map(|(_, action)| match action {
            Action::Kill(target) => Some(*target),
            _ => None,
        });
        let target = NightResolver::kill_consensus(nominations);
        self.state.night.set_pending_kill(target);

        let round = self.round();
        self.state.log.push(
            round,
            Audience::Faction(Faction::Aggressor),
            Message::KillChosen { target },
        );
        let medics: Vec<ActorId> = self
            .state
            .roster
            .alive_with_role(Role::Medic)
            .map(|a| a.id)
            .collect();
        for medic in medics {
            self.state
                .log
                .push(round, Audience::Actor(medic), Message::PendingKill { target });
        }
        debug!(round, target = ?target, "kill consensus");
    }

    fn resolve_inspect(&mut self, decisions: &[(ActorId, Action)]) {
        let round = self.round();
        for &(inspector, action) in decisions {
            let Action::Inspect(target) = action else {
                continue;
            };
            let check = NightResolver::inspect(&mut self.state.roster, inspector, target, round);
            if let Some(check) = check {
                self.state.log.push(
                    round,
                    Audience::Actor(inspector),
                    Message::Inspection {
                        target: check.target,
                        faction: check.faction,
                    },
                );
            }
        }
    }

    fn resolve_remedy(&mut self, decisions: &[(ActorId, Action)]) {
        for &(medic, action) in decisions {
            match action {
                Action::Save(target) => self.state.night.set_remedy(medic, Remedy::Save(target)),
                Action::Poison(target) => self.state.night.set_remedy(medic, Remedy::Poison(target)),
                _ => {}
            }
        }
    }

    fn finish_night(&mut self) -> Step {
        let deaths = self.state.night.finalize(&mut self.state.roster);
        self.state.recent_deaths.clear();
        if deaths.is_empty() {
            let round = self.round();
            self.state.log.push(round, Audience::Everyone, Message::QuietNight);
        }
        for (actor, cause) in deaths {
            self.state.deaths.push(actor, cause);
        }
        self.settle()
    }

    fn resolve_vote(&mut self, decisions: &[(ActorId, Action)]) -> Step {
        let ballots: Vec<(ActorId, ActorId)> = decisions
            .iter()
            .filter_map(|(voter, action)| match action {
                Action::Vote(target) => Some((*voter, *target)),
                _ => None,
            })
            .collect();
        let tally = VoteResolver::tally(ballots.iter().copied());
        VoteResolver::credit(&mut self.state.roster, &ballots);

        let in_runoff = self.state.scheduler.runoff_candidates().is_some();
        let runoff = match &tally.outcome {
            VoteOutcome::Tie(candidates)
                if self.config.vote_tie_policy == VoteTiePolicy::Runoff && !in_runoff =>
            {
                Some(candidates.clone())
            }
            _ => None,
        };
        let eliminated = match tally.outcome {
            VoteOutcome::Eliminated(actor) => Some(actor),
            VoteOutcome::Tie(_) | VoteOutcome::NoVotes => None,
        };

        let round = self.round();
        self.state.log.push(
            round,
            Audience::Everyone,
            Message::VoteTally {
                counts: tally.counts,
                eliminated,
                runoff: runoff.is_some(),
            },
        );
        info!(round, ?eliminated, runoff = runoff.is_some(), "vote tallied");

        if let Some(candidates) = runoff {
            self.state.scheduler.enter_runoff(candidates, &self.state.roster);
            self.announce_phase();
            return Step::Hold;
        }

        self.state.recent_deaths.clear();
        if let Some(actor) = eliminated {
            self.state.deaths.push(actor, DeathCause::Vote);
        }
        self.settle()
    }

    fn resolve_retaliation(&mut self, decisions: &[(ActorId, Action)]) -> Step {
        let Some(shooter) = self.state.scheduler.retaliator() else {
            return self.settle();
        };
        let target = decisions.iter().find_map(|(actor, action)| match action {
            Action::Retaliate(target) if *actor == shooter => *target,
            _ => None,
        });

        let hit_village = target
            .and_then(|t| self.state.roster.role(t))
            .is_some_and(|r| !is_aggressive(r));
        if let Some(record) = self.state.roster.get_mut(shooter) {
            record.kit_mut().spend(Resource::Retaliation);
            if hit_village {
                record.stats_mut().mistakes += 1;
            }
        }

        let round = self.round();
        self.state
            .log
            .push(round, Audience::Everyone, Message::Retaliation { shooter, target });
        info!(%shooter, ?target, "retaliation resolved");

        if let Some(target) = target {
            self.state.deaths.push(target, DeathCause::Retaliation);
        }
        self.settle()
    }

    /// Drain the death queue and decide what opens next.
    fn settle(&mut self) -> Step {
        let round = self.round();
        let rule = self.config.win_rule;
        let disclose = self.config.disclose_causes;
        let state = &mut self.state;

        let drain = state.deaths.drain(&mut state.roster, round, rule, |actor, cause| {
            state.recent_deaths.push((actor, cause));
            state.log.push(
                round,
                Audience::Everyone,
                Message::Death {
                    actor,
                    cause: disclose.then_some(cause),
                },
            );
        });

        match drain {
            Drain::Settled => Step::Open(self.state.scheduler.successor()),
            Drain::Retaliation(marksman) => {
                self.state
                    .scheduler
                    .enter_retaliation(marksman, &self.state.roster);
                self.announce_phase();
                Step::Hold
            }
            Drain::Decided(result) => {
                self.finish(result);
                Step::Hold
            }
        }
    }

    fn finish(&mut self, result: GameResult) {
        let round = self.round();
        self.state.result = Some(result);
        self.state.scheduler.end();
        self.state.buffer.take();
        self.state.log.push(
            round,
            Audience::Everyone,
            Message::GameOver {
                winner: result.winner,
            },
        );
        info!(winner = %result.winner, round, "game over");
    }
}

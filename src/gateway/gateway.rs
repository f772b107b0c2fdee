//! Submission validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. The game has not ended
//! 2. The actor is seated and alive (or is the dead Marksman being asked
//!    to retaliate)
//! 3. The open sub-phase expects this kind of action from this actor
//! 4. Any resource the action would consume is still available
//! 5. The target is alive and allowed for this action
//!
//! The gateway only reads state. Nothing is buffered until every check
//! has passed.

use crate::core::{Action, ActionKind, ActorId, EngineConfig, GameError, GameState, NightStep, Phase};
use crate::roster::Resource;

/// Read-only validator over the current state.
#[derive(Clone, Copy, Debug)]
pub struct ActionGateway<'a> {
    config: &'a EngineConfig,
    state: &'a GameState,
}

impl<'a> ActionGateway<'a> {
    /// Validate against `state` under `config`.
    #[must_use]
    pub fn new(config: &'a EngineConfig, state: &'a GameState) -> Self {
        Self { config, state }
    }

    /// Run every check on a gameplay action.
    pub fn check(&self, actor: ActorId, action: Action) -> Result<(), GameError> {
        self.check_open()?;
        self.check_actor(actor)?;
        self.check_phase(actor, action.kind())?;
        self.check_resource(actor, action)?;
        self.check_target(actor, action)
    }

    /// Run the checks that apply to a speech.
    pub fn check_speech(&self, actor: ActorId) -> Result<(), GameError> {
        self.check_open()?;
        self.check_actor(actor)?;
        self.check_phase(actor, ActionKind::Speech)
    }

    /// Whether `phase` accepts actions of `kind` at all.
    #[must_use]
    pub fn accepts(phase: Phase, kind: ActionKind) -> bool {
        match (phase, kind) {
            (Phase::Ended, _) => false,
            (_, ActionKind::Abstain) => true,
            (Phase::Night(NightStep::Kill), ActionKind::Kill) => true,
            (Phase::Night(NightStep::Inspect), ActionKind::Inspect) => true,
            (Phase::Night(NightStep::Remedy), ActionKind::Save | ActionKind::Poison) => true,
            (Phase::DayDiscuss, ActionKind::Speech) => true,
            (Phase::DayVote, ActionKind::Vote) => true,
            (Phase::HunterResolve, ActionKind::Retaliate) => true,
            _ => false,
        }
    }

    fn check_open(&self) -> Result<(), GameError> {
        if self.state.is_over() || self.state.phase().is_ended() {
            return Err(GameError::GameEnded);
        }
        Ok(())
    }

    fn check_actor(&self, actor: ActorId) -> Result<(), GameError> {
        let record = self
            .state
            .roster()
            .get(actor)
            .ok_or(GameError::UnknownOrDeadActor(actor))?;
        let retaliating = self.state.phase() == Phase::HunterResolve
            && self.state.scheduler().retaliator() == Some(actor);
        if record.is_alive() || retaliating {
            Ok(())
        } else {
            Err(GameError::UnknownOrDeadActor(actor))
        }
    }

    fn check_phase(&self, actor: ActorId, kind: ActionKind) -> Result<(), GameError> {
        let phase = self.state.phase();
        if Self::accepts(phase, kind) && self.state.scheduler().is_expected(actor) {
            Ok(())
        } else {
            Err(GameError::InvalidPhase { actor, kind, phase })
        }
    }

    fn check_resource(&self, actor: ActorId, action: Action) -> Result<(), GameError> {
        let resource = match action {
            Action::Save(_) => Resource::Antidote,
            Action::Poison(_) => Resource::Poison,
            Action::Retaliate(_) => Resource::Retaliation,
            _ => return Ok(()),
        };
        let available = self
            .state
            .roster()
            .get(actor)
            .is_some_and(|r| r.kit().has(resource));
        if available {
            Ok(())
        } else {
            Err(GameError::ResourceExhausted { actor, resource })
        }
    }

    fn check_target(&self, actor: ActorId, action: Action) -> Result<(), GameError> {
        let Some(target) = action.target() else {
            return Ok(());
        };
        let reject = |reason| Err(GameError::InvalidTarget { actor, target, reason });

        if !self.state.roster().is_alive(target) {
            return reject("target is not alive");
        }
        match action {
            Action::Save(_) => {
                if self.state.night().pending_kill() != Some(target) {
                    return reject("only tonight's pending victim can be saved");
                }
                if target == actor && !self.config.allow_self_save {
                    return reject("self-save is disabled");
                }
            }
            _ if target == actor => return reject("cannot target self"),
            Action::Vote(_) => {
                let outside_runoff = self
                    .state
                    .scheduler()
                    .runoff_candidates()
                    .is_some_and(|candidates| !candidates.contains(&target));
                if outside_runoff {
                    return reject("not a runoff candidate");
                }
            }
            _ => {}
        }
        Ok(())
    }
}

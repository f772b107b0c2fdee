//! The day/night state machine.
//!
//! The scheduler knows which sub-phase is open, whose input it waits for,
//! and what comes next. It does not resolve anything: the engine closes a
//! sub-phase, runs the matching resolver, then asks the scheduler to open
//! the successor.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::core::{ActorId, NightStep, Phase, Role};
use crate::roster::{Resource, Roster};

/// Open sub-phase, round counter, and expected actors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseScheduler {
    phase: Phase,
    round: u32,
    expected: OrdSet<ActorId>,
    submitted: OrdSet<ActorId>,
    runoff: Option<Vec<ActorId>>,
    retaliator: Option<ActorId>,
    resume: Option<Phase>,
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseScheduler {
    /// A scheduler before the first night. Round 0, nothing expected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Night(NightStep::Kill),
            round: 0,
            expected: OrdSet::new(),
            submitted: OrdSet::new(),
            runoff: None,
            retaliator: None,
            resume: None,
        }
    }

    /// The open sub-phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Actors whose input the open sub-phase waits for, in seat order.
    pub fn expected(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.expected.iter().copied()
    }

    /// Whether the open sub-phase waits for `actor`.
    #[must_use]
    pub fn is_expected(&self, actor: ActorId) -> bool {
        self.expected.contains(&actor)
    }

    /// Whether `actor` has submitted in the open sub-phase.
    #[must_use]
    pub fn has_submitted(&self, actor: ActorId) -> bool {
        self.submitted.contains(&actor)
    }

    /// Whether every expected actor has submitted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.expected.is_subset(&self.submitted)
    }

    /// Candidates of the runoff vote, if the open `DayVote` is a runoff.
    #[must_use]
    pub fn runoff_candidates(&self) -> Option<&[ActorId]> {
        self.runoff.as_deref()
    }

    /// The dead Marksman awaited by `HunterResolve`.
    #[must_use]
    pub fn retaliator(&self) -> Option<ActorId> {
        self.retaliator
    }

    /// The phase play returns to once `HunterResolve` closes.
    #[must_use]
    pub fn resume_phase(&self) -> Option<Phase> {
        self.resume
    }

    /// The phase that follows the open one when nothing intervenes.
    #[must_use]
    pub fn successor(&self) -> Phase {
        Self::successor_of(self.phase, self.resume)
    }

    fn successor_of(phase: Phase, resume: Option<Phase>) -> Phase {
        match phase {
            Phase::Night(step) => step.next().map_or(Phase::DayDiscuss, Phase::Night),
            Phase::DayDiscuss => Phase::DayVote,
            Phase::DayVote => Phase::Night(NightStep::Kill),
            Phase::HunterResolve => resume.unwrap_or(Phase::Night(NightStep::Kill)),
            Phase::Ended => Phase::Ended,
        }
    }

    /// Actors `phase` waits for, given the roster.
    #[must_use]
    pub fn expected_for(phase: Phase, roster: &Roster, retaliator: Option<ActorId>) -> OrdSet<ActorId> {
        match phase {
            Phase::Night(NightStep::Kill) => {
                roster.alive_with_role(Role::Aggressor).map(|a| a.id).collect()
            }
            Phase::Night(NightStep::Inspect) => {
                roster.alive_with_role(Role::Inspector).map(|a| a.id).collect()
            }
            Phase::Night(NightStep::Remedy) => roster
                .alive_with_role(Role::Medic)
                .filter(|a| a.kit().has(Resource::Antidote) || a.kit().has(Resource::Poison))
                .map(|a| a.id)
                .collect(),
            Phase::DayDiscuss | Phase::DayVote => roster.alive_set(),
            Phase::HunterResolve => retaliator.into_iter().collect(),
            Phase::Ended => OrdSet::new(),
        }
    }

    /// Open `phase` and compute who it waits for.
    ///
    /// Entering `Night/Kill` starts a new round. Returns `false` when nobody
    /// is expected; the caller closes such a step immediately.
    pub(crate) fn enter(&mut self, phase: Phase, roster: &Roster) -> bool {
        if phase == Phase::Night(NightStep::Kill) {
            self.round += 1;
        }
        if self.phase == Phase::HunterResolve && phase != Phase::HunterResolve {
            self.resume = None;
            self.retaliator = None;
        }
        self.phase = phase;
        self.runoff = None;
        self.submitted = OrdSet::new();
        self.expected = Self::expected_for(phase, roster, self.retaliator);
        !self.expected.is_empty()
    }

    /// Reopen `DayVote` restricted to the tied candidates.
    pub(crate) fn enter_runoff(&mut self, candidates: Vec<ActorId>, roster: &Roster) {
        self.enter(Phase::DayVote, roster);
        self.runoff = Some(candidates);
    }

    /// Suspend the normal cycle for a dead Marksman.
    ///
    /// The resume point is kept when a retaliation triggers another one.
    pub(crate) fn enter_retaliation(&mut self, marksman: ActorId, roster: &Roster) {
        if self.phase != Phase::HunterResolve {
            self.resume = Some(self.successor());
        }
        self.retaliator = Some(marksman);
        self.phase = Phase::HunterResolve;
        self.runoff = None;
        self.submitted = OrdSet::new();
        self.expected = Self::expected_for(Phase::HunterResolve, roster, self.retaliator);
    }

    /// Close for good.
    pub(crate) fn end(&mut self) {
        self.phase = Phase::Ended;
        self.expected = OrdSet::new();
        self.submitted = OrdSet::new();
        self.runoff = None;
        self.retaliator = None;
        self.resume = None;
    }

    /// Mark `actor` as having submitted.
    pub(crate) fn mark(&mut self, actor: ActorId) {
        self.submitted.insert(actor);
    }
}

//! Broadcast log entries.
//!
//! Every message carries an [`Audience`]. The engine records everything; who
//! gets to read what is decided per entry when the log is queried.

use serde::{Deserialize, Serialize};

use crate::core::{faction_of, ActorId, Faction, Phase, Role, Side};
use crate::roster::DeathCause;

/// Who may read a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    /// Every seat.
    Everyone,
    /// One seat only.
    Actor(ActorId),
    /// Every seat of one faction.
    Faction(Faction),
}

impl Audience {
    /// Whether a seat holding `role` may read entries for this audience.
    #[must_use]
    pub fn admits(self, actor: ActorId, role: Role) -> bool {
        match self {
            Audience::Everyone => true,
            Audience::Actor(id) => id == actor,
            Audience::Faction(faction) => faction_of(role) == faction,
        }
    }
}

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// A sub-phase opened for input.
    PhaseOpened {
        /// The sub-phase.
        phase: Phase,
    },

    /// A discussion speech.
    Speech {
        /// Speaker.
        actor: ActorId,
        /// What they said.
        text: String,
    },

    /// The aggressors' consensus target (aggressors only).
    KillChosen {
        /// Target, or `None` if nobody nominated anyone.
        target: Option<ActorId>,
    },

    /// Tonight's pending victim (Medic only).
    PendingKill {
        /// Target, or `None` for a quiet night.
        target: Option<ActorId>,
    },

    /// An Inspector check result (Inspector only).
    Inspection {
        /// Who was checked.
        target: ActorId,
        /// Their faction.
        faction: Faction,
    },

    /// Result of a day vote.
    VoteTally {
        /// Votes per candidate, in seat order.
        counts: Vec<(ActorId, u32)>,
        /// The eliminated actor, if the vote was decisive.
        eliminated: Option<ActorId>,
        /// Whether a runoff among the tied candidates follows.
        runoff: bool,
    },

    /// Nobody died overnight.
    QuietNight,

    /// An actor died.
    Death {
        /// Who died.
        actor: ActorId,
        /// Cause, if causes are disclosed.
        cause: Option<DeathCause>,
    },

    /// A dead Marksman fired or held fire.
    Retaliation {
        /// The Marksman.
        shooter: ActorId,
        /// Target, or `None` for holding fire.
        target: Option<ActorId>,
    },

    /// The game is decided.
    GameOver {
        /// Winning side.
        winner: Side,
    },
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Message::PhaseOpened { phase } => write!(f, "{} begins", phase),
            Message::Speech { actor, text } => write!(f, "{}: {}", actor, text),
            Message::KillChosen { target: Some(t) } => write!(f, "the pack chose {}", t),
            Message::KillChosen { target: None } => f.write_str("the pack chose nobody"),
            Message::PendingKill { target: Some(t) } => write!(f, "{} was attacked tonight", t),
            Message::PendingKill { target: None } => f.write_str("nobody was attacked tonight"),
            Message::Inspection { target, faction } => write!(f, "{} is {:?}", target, faction),
            Message::VoteTally { counts, eliminated, runoff } => {
                let tally: Vec<String> = counts
                    .iter()
                    .map(|(a, n)| format!("{}={}", a.0, n))
                    .collect();
                write!(f, "votes [{}]", tally.join(", "))?;
                match (eliminated, runoff) {
                    (Some(a), _) => write!(f, ", {} is eliminated", a),
                    (None, true) => f.write_str(", tie goes to a runoff"),
                    (None, false) => f.write_str(", nobody is eliminated"),
                }
            }
            Message::QuietNight => f.write_str("nobody died last night"),
            Message::Death { actor, cause: Some(c) } => write!(f, "{} died ({})", actor, c),
            Message::Death { actor, cause: None } => write!(f, "{} died", actor),
            Message::Retaliation { shooter, target: Some(t) } => {
                write!(f, "{} shot {}", shooter, t)
            }
            Message::Retaliation { shooter, target: None } => {
                write!(f, "{} held fire", shooter)
            }
            Message::GameOver { winner } => write!(f, "{} win", winner),
        }
    }
}

/// One broadcast entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the full log.
    pub sequence: u32,
    /// Round the entry was written in.
    pub round: u32,
    /// Who may read it.
    pub audience: Audience,
    /// What happened.
    pub message: Message,
}

impl LogEntry {
    /// Whether a seat holding `role` may read this entry.
    #[must_use]
    pub fn visible_to(&self, actor: ActorId, role: Role) -> bool {
        self.audience.admits(actor, role)
    }
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[round {}] {}", self.round, self.message)
    }
}

//! Role-scoped resources.
//!
//! Each role carries a kit of one-shot charges or private knowledge. A
//! [`Charge`] can only go from available to spent; there is no way back.

use serde::{Deserialize, Serialize};

use crate::core::{ActorId, Faction, Role};

/// A one-shot resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Charge {
    available: bool,
}

impl Charge {
    /// A fresh, unspent charge.
    #[must_use]
    pub const fn fresh() -> Self {
        Self { available: true }
    }

    /// Whether the charge can still be used.
    #[must_use]
    pub const fn is_available(self) -> bool {
        self.available
    }

    /// Spend the charge. Returns false if it was already spent.
    pub(crate) fn spend(&mut self) -> bool {
        std::mem::replace(&mut self.available, false)
    }
}

/// Names of the one-shot resources, for error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Medic's save.
    Antidote,
    /// Medic's poison.
    Poison,
    /// Marksman's retaliation.
    Retaliation,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Antidote => f.write_str("antidote"),
            Resource::Poison => f.write_str("poison"),
            Resource::Retaliation => f.write_str("retaliation"),
        }
    }
}

/// One Inspector check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    /// Round the check was made.
    pub round: u32,
    /// Who was checked.
    pub target: ActorId,
    /// What the check revealed.
    pub faction: Faction,
}

/// Per-role resource state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleKit {
    /// Nothing to track.
    Commoner,
    /// Nothing to track; kills are collective and unlimited.
    Aggressor,
    /// Append-only check history.
    Inspector {
        /// Checks made so far, oldest first.
        checks: Vec<Inspection>,
    },
    /// Two independent one-shot charges.
    Medic {
        /// Cancels the night kill on its target.
        antidote: Charge,
        /// Adds a poison death.
        poison: Charge,
    },
    /// One retaliation on death.
    Marksman {
        /// Revoked when the Marksman is poisoned.
        retaliation: Charge,
    },
}

impl RoleKit {
    /// The starting kit for a role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Commoner => RoleKit::Commoner,
            Role::Aggressor => RoleKit::Aggressor,
            Role::Inspector => RoleKit::Inspector { checks: Vec::new() },
            Role::Medic => RoleKit::Medic {
                antidote: Charge::fresh(),
                poison: Charge::fresh(),
            },
            Role::Marksman => RoleKit::Marksman {
                retaliation: Charge::fresh(),
            },
        }
    }

    /// Whether the named resource is held and unspent.
    #[must_use]
    pub fn has(&self, resource: Resource) -> bool {
        match (self, resource) {
            (RoleKit::Medic { antidote, .. }, Resource::Antidote) => antidote.is_available(),
            (RoleKit::Medic { poison, .. }, Resource::Poison) => poison.is_available(),
            (RoleKit::Marksman { retaliation }, Resource::Retaliation) => {
                retaliation.is_available()
            }
            _ => false,
        }
    }

    /// Spend the named resource. Returns false if it was not available.
    pub(crate) fn spend(&mut self, resource: Resource) -> bool {
        match (self, resource) {
            (RoleKit::Medic { antidote, .. }, Resource::Antidote) => antidote.spend(),
            (RoleKit::Medic { poison, .. }, Resource::Poison) => poison.spend(),
            (RoleKit::Marksman { retaliation }, Resource::Retaliation) => retaliation.spend(),
            _ => false,
        }
    }

    /// Inspector checks so far. Empty for other roles.
    #[must_use]
    pub fn checks(&self) -> &[Inspection] {
        match self {
            RoleKit::Inspector { checks } => checks,
            _ => &[],
        }
    }

    pub(crate) fn push_check(&mut self, check: Inspection) {
        if let RoleKit::Inspector { checks } = self {
            checks.push(check);
        }
    }
}

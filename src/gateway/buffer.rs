//! Per-sub-phase decision buffer.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Action, ActorId};

/// Accepted decisions for the open sub-phase, one per actor.
///
/// A later submission from the same actor replaces the earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionBuffer {
    decisions: FxHashMap<ActorId, Action>,
}

impl DecisionBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `action` for `actor`, returning the decision it replaced.
    pub(crate) fn insert(&mut self, actor: ActorId, action: Action) -> Option<Action> {
        self.decisions.insert(actor, action)
    }

    /// The buffered decision of `actor`.
    #[must_use]
    pub fn get(&self, actor: ActorId) -> Option<Action> {
        self.decisions.get(&actor).copied()
    }

    /// Number of buffered decisions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Whether nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Empty the buffer, returning its decisions in seat order.
    pub(crate) fn take(&mut self) -> Vec<(ActorId, Action)> {
        let mut decisions: Vec<_> = self.decisions.drain().collect();
        decisions.sort_unstable_by_key(|(actor, _)| *actor);
        decisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut buffer = DecisionBuffer::new();
        let actor = ActorId::new(2);

        assert_eq!(buffer.insert(actor, Action::Vote(ActorId::new(1))), None);
        assert_eq!(
            buffer.insert(actor, Action::Vote(ActorId::new(3))),
            Some(Action::Vote(ActorId::new(1)))
        );
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.get(actor), Some(Action::Vote(ActorId::new(3))));
    }

    #[test]
    fn test_take_sorted_and_clears() {
        let mut buffer = DecisionBuffer::new();
        buffer.insert(ActorId::new(5), Action::Abstain);
        buffer.insert(ActorId::new(1), Action::Abstain);
        buffer.insert(ActorId::new(3), Action::Abstain);

        let actors: Vec<_> = buffer.take().into_iter().map(|(a, _)| a.0).collect();
        assert_eq!(actors, vec![1, 3, 5]);
        assert!(buffer.is_empty());
    }
}

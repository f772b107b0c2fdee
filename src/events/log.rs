//! Append-only broadcast log.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ActorId, Role};

use super::event::{Audience, LogEntry, Message};

/// Ordered, append-only log of everything the engine announced.
///
/// Backed by `im::Vector`, so handing a copy to a reader is O(1) and the
/// reader can never disturb the engine's copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastLog {
    entries: Vector<LogEntry>,
}

impl BroadcastLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its sequence number.
    pub(crate) fn push(&mut self, round: u32, audience: Audience, message: Message) -> u32 {
        let sequence = self.entries.len() as u32;
        self.entries.push_back(LogEntry {
            sequence,
            round,
            audience,
            message,
        });
        sequence
    }

    /// Number of entries, regardless of audience.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Entries a seat holding `role` may read, in order.
    #[must_use]
    pub fn for_actor(&self, actor: ActorId, role: Role) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.visible_to(actor, role))
            .cloned()
            .collect()
    }

    /// Entries from `sequence` onward, regardless of audience.
    pub fn since(&self, sequence: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Faction;

    #[test]
    fn test_push_sequences() {
        let mut log = BroadcastLog::new();
        assert_eq!(log.push(1, Audience::Everyone, Message::QuietNight), 0);
        assert_eq!(log.push(1, Audience::Everyone, Message::QuietNight), 1);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_for_actor_filters() {
        let mut log = BroadcastLog::new();
        log.push(1, Audience::Faction(Faction::Aggressor), Message::KillChosen {
            target: Some(ActorId::new(3)),
        });
        log.push(1, Audience::Actor(ActorId::new(2)), Message::PendingKill {
            target: Some(ActorId::new(3)),
        });
        log.push(1, Audience::Everyone, Message::QuietNight);

        assert_eq!(log.for_actor(ActorId::new(1), Role::Aggressor).len(), 2);
        assert_eq!(log.for_actor(ActorId::new(2), Role::Medic).len(), 2);
        assert_eq!(log.for_actor(ActorId::new(4), Role::Commoner).len(), 1);
    }

    #[test]
    fn test_reader_copy_is_isolated() {
        let mut log = BroadcastLog::new();
        log.push(1, Audience::Everyone, Message::QuietNight);

        let snapshot = log.clone();
        log.push(2, Audience::Everyone, Message::QuietNight);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.since(1).count(), 1);
    }

    #[test]
    fn test_iter_from_newest() {
        let mut log = BroadcastLog::new();
        log.push(1, Audience::Everyone, Message::QuietNight);
        log.push(2, Audience::Everyone, Message::QuietNight);
        log.push(3, Audience::Everyone, Message::QuietNight);

        let rounds: Vec<u32> = log.iter().rev().map(|e| e.round).collect();
        assert_eq!(rounds, vec![3, 2, 1]);
        assert_eq!(log.iter().next_back().map(|e| e.sequence), Some(2));
    }
}

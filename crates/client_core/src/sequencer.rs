use std::sync::atomic::{AtomicU64, Ordering};

use crate::action::ActionKind;

/// Identifies one dispatched action within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: ActionKind,
    seq: u64,
}

impl Ticket {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Hands out per-kind tickets so a response can be checked against the most
/// recent action of the same kind.
#[derive(Debug, Default)]
pub struct ActionSequencer {
    latest: [AtomicU64; ActionKind::COUNT],
}

impl ActionSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, kind: ActionKind) -> Ticket {
        let seq = self.latest[kind.index()].fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { kind, seq }
    }

    /// `false` once a newer ticket of the same kind has been issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest[ticket.kind.index()].load(Ordering::SeqCst) == ticket.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older_one_of_same_kind() {
        let sequencer = ActionSequencer::new();
        let first = sequencer.issue(ActionKind::Create);
        assert!(sequencer.is_current(first));

        let second = sequencer.issue(ActionKind::Create);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert!(second.seq() > first.seq());
    }

    #[test]
    fn kinds_are_tracked_independently() {
        let sequencer = ActionSequencer::new();
        let search = sequencer.issue(ActionKind::Search);
        let retrieve = sequencer.issue(ActionKind::Retrieve);

        assert!(sequencer.is_current(search));
        assert!(sequencer.is_current(retrieve));
        assert_eq!(retrieve.kind(), ActionKind::Retrieve);
    }
}

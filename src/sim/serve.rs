//! Deferred serve resumption
//!
//! Every serve freezes play and schedules a resume a fixed delay later.
//! Each serve bumps the match's serve generation and hands out a ticket for
//! it; a resume only takes effect while its ticket is still current, so a
//! stale resume can never restart play early after a newer serve.

use serde::{Deserialize, Serialize};

/// Proof of which serve a pending resume belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServeTicket {
    pub generation: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingResume {
    ticket: ServeTicket,
    due_ms: f64,
}

/// Pending resumes, fired against the match clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServeScheduler {
    pending: Vec<PendingResume>,
}

impl ServeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a resume for `ticket` at `due_ms` on the match clock
    pub fn schedule(&mut self, ticket: ServeTicket, due_ms: f64) {
        self.pending.push(PendingResume { ticket, due_ms });
    }

    /// Remove and return every ticket due at or before `now_ms`, oldest first
    pub fn fire_due(&mut self, now_ms: f64) -> Vec<ServeTicket> {
        let mut fired = Vec::new();
        self.pending.retain(|p| {
            if p.due_ms <= now_ms {
                fired.push(p.ticket);
                false
            } else {
                true
            }
        });
        fired
    }

    /// Number of resumes still waiting
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_due_in_order() {
        let mut scheduler = ServeScheduler::new();
        scheduler.schedule(ServeTicket { generation: 1 }, 600.0);
        scheduler.schedule(ServeTicket { generation: 2 }, 900.0);

        assert!(scheduler.fire_due(599.9).is_empty());
        assert_eq!(scheduler.fire_due(600.0), vec![ServeTicket { generation: 1 }]);
        assert_eq!(scheduler.len(), 1);

        assert_eq!(scheduler.fire_due(5000.0), vec![ServeTicket { generation: 2 }]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_fire_due_drains_everything_overdue() {
        let mut scheduler = ServeScheduler::new();
        scheduler.schedule(ServeTicket { generation: 3 }, 100.0);
        scheduler.schedule(ServeTicket { generation: 4 }, 200.0);

        let fired = scheduler.fire_due(1000.0);
        assert_eq!(fired.len(), 2);
        assert_eq!(fired[0].generation, 3);
        assert!(scheduler.is_empty());
    }
}

//! New Ticket Detector
//!
//! Remembers which tickets the panel has already shown and reports when
//! unseen ones show up, so the panel can play a single alert per batch.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// Nothing observed yet
    Uninitialized,
    /// First snapshot recorded, nothing announced
    Primed,
    /// Announcing newcomers
    Steady,
}

/// What a snapshot meant to the detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Empty snapshot, nothing changed
    Ignored,
    /// First snapshot; everything recorded silently
    Primed { recorded: usize },
    /// No unseen ids
    NothingNew,
    /// Unseen ids, in snapshot order. `notify` is the alert decision.
    NewTickets { ids: Vec<String>, notify: bool },
}

impl Observation {
    pub fn should_notify(&self) -> bool {
        matches!(self, Observation::NewTickets { notify: true, .. })
    }
}

/// Seen-set state machine. One per panel; ids are never evicted.
#[derive(Debug, Clone)]
pub struct NewTicketDetector {
    state: DetectorState,
    seen: HashSet<String>,
}

impl Default for NewTicketDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTicketDetector {
    pub fn new() -> Self {
        Self {
            state: DetectorState::Uninitialized,
            seen: HashSet::new(),
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn has_seen(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Feed the ids of the latest snapshot.
    pub fn observe<'a, I>(&mut self, ids: I, notifications_enabled: bool) -> Observation
    where
        I: IntoIterator<Item = &'a str>,
    {
        let ids: Vec<&str> = ids.into_iter().collect();
        if ids.is_empty() {
            return Observation::Ignored;
        }

        if self.state == DetectorState::Uninitialized {
            self.seen.extend(ids.iter().map(|id| id.to_string()));
            self.state = DetectorState::Primed;
            log::debug!("[DETECTOR] primed with {} tickets", self.seen.len());
            return Observation::Primed {
                recorded: self.seen.len(),
            };
        }

        self.state = DetectorState::Steady;
        let mut fresh = Vec::new();
        for id in ids {
            if self.seen.insert(id.to_string()) {
                fresh.push(id.to_string());
            }
        }

        if fresh.is_empty() {
            return Observation::NothingNew;
        }
        log::info!(
            "[DETECTOR] {} new tickets (alert {})",
            fresh.len(),
            if notifications_enabled { "on" } else { "off" }
        );
        Observation::NewTickets {
            ids: fresh,
            notify: notifications_enabled,
        }
    }
}

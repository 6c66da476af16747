//! Panel Summary
//!
//! Status counters and the client-side "only active" filter.

use crate::models::{TicketStatus, TicketSummary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TicketStats {
    pub total: usize,
    pub pending: usize,
    pub in_preparation: usize,
    pub partial: usize,
    pub ready: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[TicketSummary]) -> Self {
        let by = |status: TicketStatus| tickets.iter().filter(|t| t.status == status).count();
        Self {
            total: tickets.len(),
            pending: by(TicketStatus::Pending),
            in_preparation: by(TicketStatus::InPreparation),
            partial: by(TicketStatus::Partial),
            ready: by(TicketStatus::Ready),
        }
    }
}

/// Tickets to display; `only_active` keeps what the kitchen still works on
pub fn visible_tickets(tickets: &[TicketSummary], only_active: bool) -> Vec<TicketSummary> {
    tickets
        .iter()
        .filter(|t| !only_active || t.status.is_active())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, status: TicketStatus) -> TicketSummary {
        TicketSummary {
            id: id.to_string(),
            table_ref: None,
            server_name: None,
            order_number: None,
            comanda_number: None,
            status,
            ordered_at: None,
            prep_started_at: None,
            delivered_at: None,
        }
    }

    #[test]
    fn test_stats_and_active_filter() {
        let tickets = vec![
            ticket("a", TicketStatus::Pending),
            ticket("b", TicketStatus::Pending),
            ticket("c", TicketStatus::Partial),
            ticket("d", TicketStatus::Ready),
            ticket("e", TicketStatus::Cancelled),
        ];

        let stats = TicketStats::from_tickets(&tickets);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.partial, 1);
        assert_eq!(stats.ready, 1);
        assert_eq!(stats.in_preparation, 0);

        let active = visible_tickets(&tickets, true);
        let ids: Vec<_> = active.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(visible_tickets(&tickets, false).len(), 5);
    }
}

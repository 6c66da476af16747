//! Ticket Card View Model
//!
//! Display-ready fields of one grid card.

use chrono::{DateTime, Utc};

use crate::config::UrgencyThresholds;
use crate::freshness::{format_clock, Freshness};
use crate::models::{TicketStatus, TicketSummary};

const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct TicketCard {
    pub id: String,
    pub table: String,
    pub server: String,
    pub order_number: String,
    pub comanda_number: String,
    pub status: TicketStatus,
    pub ordered_at: String,
    pub prep_started_at: String,
    pub delivered_at: String,
    pub freshness: Freshness,
}

impl TicketCard {
    pub fn build(ticket: &TicketSummary, now: DateTime<Utc>, thresholds: &UrgencyThresholds) -> Self {
        let text = |v: Option<&str>| v.unwrap_or(PLACEHOLDER).to_string();
        let number = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string());
        Self {
            id: ticket.id.clone(),
            table: text(ticket.table_ref.as_deref()),
            server: text(ticket.server_name.as_deref()),
            order_number: number(ticket.order_number),
            comanda_number: number(ticket.comanda_number),
            status: ticket.status,
            ordered_at: format_clock(ticket.ordered_at.as_deref()),
            prep_started_at: format_clock(ticket.prep_started_at.as_deref()),
            delivered_at: format_clock(ticket.delivered_at.as_deref()),
            freshness: Freshness::of(ticket.ordered_at.as_deref(), ticket.status, now, thresholds),
        }
    }

    /// Left accent colour class, by status
    pub fn accent_class(&self) -> &'static str {
        match self.status {
            TicketStatus::Pending => "accent-pending",
            TicketStatus::InPreparation => "accent-prep",
            TicketStatus::Partial => "accent-partial",
            TicketStatus::Ready => "accent-ready",
            TicketStatus::Cancelled => "accent-cancelled",
        }
    }
}

pub fn build_cards(
    tickets: &[TicketSummary],
    now: DateTime<Utc>,
    thresholds: &UrgencyThresholds,
) -> Vec<TicketCard> {
    tickets
        .iter()
        .map(|t| TicketCard::build(t, now, thresholds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freshness::UrgencyTier;
    use chrono::TimeZone;

    #[test]
    fn test_card_placeholders_and_age() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 13, 0, 0).unwrap();
        let ticket = TicketSummary {
            id: "t1".into(),
            table_ref: None,
            server_name: Some("Laura".into()),
            order_number: None,
            comanda_number: Some(232),
            status: TicketStatus::InPreparation,
            ordered_at: Some("2026-10-16T12:45:00Z".into()),
            prep_started_at: None,
            delivered_at: None,
        };

        let card = TicketCard::build(&ticket, now, &UrgencyThresholds::DEFAULT);
        assert_eq!(card.table, "—");
        assert_eq!(card.server, "Laura");
        assert_eq!(card.order_number, "—");
        assert_eq!(card.comanda_number, "232");
        assert_eq!(card.prep_started_at, "—");
        assert_eq!(card.freshness.minutes, 15);
        assert_eq!(card.freshness.tier, UrgencyTier::Warn);
        assert_eq!(card.accent_class(), "accent-prep");
    }
}

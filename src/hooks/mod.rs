//! Polling Hooks
//!
//! Leptos bindings for `comanda_core::Poller`.

mod query;
mod use_ticket_detail;
mod use_ticket_events;
mod use_tickets;

pub use query::{use_polled_query, Query, WebScheduler};
pub use use_ticket_detail::use_ticket_detail;
pub use use_ticket_events::use_ticket_events;
pub use use_tickets::use_tickets;

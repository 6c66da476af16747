//! Comanda Core
//!
//! Target-independent half of the kitchen panel:
//! - models / service: wire schemas and the ticket API contract
//! - client / mock: HTTP and in-memory implementations
//! - query: keyed, cancellable polling with stale-response discard
//! - freshness / detector / stats: what the panel derives from snapshots

pub mod actions;
pub mod card;
pub mod client;
pub mod config;
pub mod detector;
pub mod error;
pub mod freshness;
pub mod mock;
pub mod models;
pub mod query;
pub mod service;
pub mod stats;

pub use actions::ItemCommand;
pub use card::{build_cards, TicketCard};
pub use client::HttpTicketService;
pub use config::{ApiConfig, ApiMode, Role, UrgencyThresholds};
pub use detector::{DetectorState, NewTicketDetector, Observation};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use freshness::{elapsed_minutes, format_clock, urgency_tier, Freshness, UrgencyTier};
pub use mock::{MockCall, MockTicketService};
pub use models::{
    AuditEvent, AuditEventKind, ItemStatus, SyncRunResult, TicketDetail, TicketFilter, TicketItem,
    TicketStatus, TicketSummary,
};
pub use query::{Fetcher, LocalFuture, PollOptions, Poller, QueryState, Scheduler};
pub use service::{ItemRef, TicketService};
pub use stats::{visible_tickets, TicketStats};

//! Ticket Service Contract
//!
//! Logical operations of the kitchen ticket API. Transport lives in the
//! implementations (`HttpTicketService`, `MockTicketService`).

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ApiResult;
use crate::models::{AuditEvent, ItemStatus, SyncRunResult, TicketDetail, TicketFilter, TicketSummary};

// ========================
// Request Bodies
// ========================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemStatusUpdate {
    pub status: ItemStatus,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCancel {
    pub reason: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemReplace {
    pub new_product_name: String,
    pub reason: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncRunRequest {
    pub mode: &'static str,
}

impl SyncRunRequest {
    pub const MANUAL: SyncRunRequest = SyncRunRequest { mode: "MANUAL" };
}

/// Identifies one item of one ticket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub ticket_id: String,
    pub item_id: String,
}

impl ItemRef {
    pub fn new(ticket_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            item_id: item_id.into(),
        }
    }
}

// ========================
// Service Trait
// ========================

/// Everything the panel needs from the backend.
///
/// Futures are `!Send`: implementations run on the browser event loop.
#[async_trait(?Send)]
pub trait TicketService {
    async fn list_tickets(&self, filter: &TicketFilter) -> ApiResult<Vec<TicketSummary>>;

    async fn get_ticket_detail(&self, ticket_id: &str) -> ApiResult<TicketDetail>;

    /// Trigger a manual POS reconciliation pass
    async fn run_sync(&self) -> ApiResult<SyncRunResult>;

    async fn update_item_status(&self, item: &ItemRef, body: &ItemStatusUpdate) -> ApiResult<()>;

    async fn cancel_item(&self, item: &ItemRef, body: &ItemCancel) -> ApiResult<()>;

    async fn replace_item(&self, item: &ItemRef, body: &ItemReplace) -> ApiResult<()>;

    /// Rendered HTML document; `width_mm` selects the narrow thermal layout
    async fn print_ticket(&self, ticket_id: &str, width_mm: Option<u32>) -> ApiResult<String>;

    async fn get_ticket_events(&self, ticket_id: &str) -> ApiResult<Vec<AuditEvent>>;
}

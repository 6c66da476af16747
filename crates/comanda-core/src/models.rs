//! Ticket Models
//!
//! Wire schemas for the kitchen ticket API. Field and enum names on the wire
//! are the ones the POS-facing backend emits; Rust names are mapped with serde.

use serde::{Deserialize, Serialize};

/// Lifecycle of a whole ticket (comanda)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "EN_PREPARACION")]
    InPreparation,
    #[serde(rename = "PARCIAL")]
    Partial,
    #[serde(rename = "LISTO")]
    Ready,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 5] = [
        TicketStatus::Pending,
        TicketStatus::InPreparation,
        TicketStatus::Partial,
        TicketStatus::Ready,
        TicketStatus::Cancelled,
    ];

    /// Wire value, also used as the `status` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "PENDIENTE",
            TicketStatus::InPreparation => "EN_PREPARACION",
            TicketStatus::Partial => "PARCIAL",
            TicketStatus::Ready => "LISTO",
            TicketStatus::Cancelled => "CANCELADO",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// Human label for pills and selects
    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pendiente",
            TicketStatus::InPreparation => "En preparación",
            TicketStatus::Partial => "Parcial",
            TicketStatus::Ready => "Listo",
            TicketStatus::Cancelled => "Cancelado",
        }
    }

    /// Tickets the kitchen still has to work on
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TicketStatus::Pending | TicketStatus::InPreparation | TicketStatus::Partial
        )
    }
}

/// Lifecycle of one product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "EN_PREPARACION")]
    InPreparation,
    #[serde(rename = "ENTREGADO")]
    Delivered,
    #[serde(rename = "CANCELADO")]
    Cancelled,
}

impl ItemStatus {
    /// Statuses an operator may set directly (cancel has its own flow)
    pub const SETTABLE: [ItemStatus; 3] = [
        ItemStatus::Pending,
        ItemStatus::InPreparation,
        ItemStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "PENDIENTE",
            ItemStatus::InPreparation => "EN_PREPARACION",
            ItemStatus::Delivered => "ENTREGADO",
            ItemStatus::Cancelled => "CANCELADO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "Pendiente",
            ItemStatus::InPreparation => "Preparación",
            ItemStatus::Delivered => "Entregado",
            ItemStatus::Cancelled => "Cancelado",
        }
    }
}

/// Card-level view of a ticket, as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub id: String,
    #[serde(rename = "mesa_ref", default)]
    pub table_ref: Option<String>,
    #[serde(rename = "mesero_nombre", default)]
    pub server_name: Option<String>,
    #[serde(rename = "pos_consec_docto", default)]
    pub order_number: Option<i64>,
    #[serde(default)]
    pub comanda_number: Option<i64>,
    pub status: TicketStatus,
    #[serde(rename = "hora_pedido", default)]
    pub ordered_at: Option<String>,
    #[serde(rename = "hora_preparacion", default)]
    pub prep_started_at: Option<String>,
    #[serde(rename = "hora_entrega", default)]
    pub delivered_at: Option<String>,
}

/// One product line of a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketItem {
    pub id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(rename = "qty")]
    pub quantity: f64,
    #[serde(rename = "unidad", default)]
    pub unit: Option<String>,
    pub status: ItemStatus,
}

impl TicketItem {
    /// "2 × Hamburguesa"
    pub fn label(&self) -> String {
        format!(
            "{} × {}",
            format_quantity(self.quantity),
            self.product_name.as_deref().unwrap_or("—")
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == ItemStatus::Cancelled
    }
}

/// Full ticket with its ordered items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub summary: TicketSummary,
    #[serde(default)]
    pub items: Vec<TicketItem>,
}

/// Outcome of a manual POS sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRunResult {
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(rename = "new_tickets")]
    pub new_count: u32,
    #[serde(rename = "updated_tickets")]
    pub updated_count: u32,
    #[serde(rename = "errors")]
    pub error_count: u32,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
}

impl SyncRunResult {
    pub fn summary_message(&self) -> String {
        format!(
            "Sync OK · nuevos: {} · actualizados: {}",
            self.new_count, self.updated_count
        )
    }
}

/// Audit trail entry for a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: String,
    pub ticket_id: String,
    #[serde(default)]
    pub item_id: Option<String>,
    pub event_type: String,
    pub message: String,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub created_at: String,
}

/// Display category of an audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEventKind {
    Error,
    Cancel,
    Replace,
    Status,
    Print,
    Other,
}

impl AuditEventKind {
    /// Classify a free-form event type; earlier matches win.
    pub fn classify(event_type: &str) -> Self {
        let upper = event_type.to_ascii_uppercase();
        if upper.contains("ERROR") {
            AuditEventKind::Error
        } else if upper.contains("CANCEL") {
            AuditEventKind::Cancel
        } else if upper.contains("REPLACE") {
            AuditEventKind::Replace
        } else if upper.contains("STATUS") {
            AuditEventKind::Status
        } else if upper.contains("PRINT") {
            AuditEventKind::Print
        } else {
            AuditEventKind::Other
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            AuditEventKind::Error => "dot-error",
            AuditEventKind::Cancel => "dot-cancel",
            AuditEventKind::Replace => "dot-replace",
            AuditEventKind::Status => "dot-status",
            AuditEventKind::Print => "dot-print",
            AuditEventKind::Other => "dot-other",
        }
    }
}

impl AuditEvent {
    pub fn kind(&self) -> AuditEventKind {
        AuditEventKind::classify(&self.event_type)
    }

    pub fn actor(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Sistema")
    }
}

/// Filter criteria for the ticket list; also the polling key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub query: String,
}

impl TicketFilter {
    pub fn new(status: Option<TicketStatus>, query: impl Into<String>) -> Self {
        Self {
            status,
            query: query.into(),
        }
    }

    /// Query-string pairs; `q` is always sent, `status` only when set
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        pairs.push(("q", self.query.clone()));
        pairs
    }
}

fn format_quantity(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{}", qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_detail_from_wire() {
        let json = r#"{
            "id": "6c4d7c80-1111-4a11-9d1b-000000000001",
            "comanda_number": 231,
            "mesa_ref": "12",
            "mesero_nombre": "Carlos",
            "pos_consec_docto": 10452,
            "status": "EN_PREPARACION",
            "hora_pedido": "2026-10-16T12:00:00+00:00",
            "hora_preparacion": null,
            "hora_entrega": null,
            "items": [
                {"id": "i-1", "product_name": "Hamburguesa", "qty": 2.0, "unidad": "UND", "status": "ENTREGADO"}
            ]
        }"#;

        let detail: TicketDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.summary.table_ref.as_deref(), Some("12"));
        assert_eq!(detail.summary.order_number, Some(10452));
        assert_eq!(detail.summary.status, TicketStatus::InPreparation);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items[0].status, ItemStatus::Delivered);
        assert_eq!(detail.items[0].label(), "2 × Hamburguesa");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let json = r#"{"id": "x", "status": "PERDIDO"}"#;
        assert!(serde_json::from_str::<TicketSummary>(json).is_err());
    }

    #[test]
    fn test_filter_query_pairs() {
        let all = TicketFilter::default();
        assert_eq!(all.query_pairs(), vec![("q", String::new())]);

        let pending = TicketFilter::new(Some(TicketStatus::Pending), "12");
        assert_eq!(
            pending.query_pairs(),
            vec![("status", "PENDIENTE".to_string()), ("q", "12".to_string())]
        );
    }

    #[test]
    fn test_event_kind_priority() {
        assert_eq!(AuditEventKind::classify("ITEM_CANCEL"), AuditEventKind::Cancel);
        assert_eq!(AuditEventKind::classify("item_status"), AuditEventKind::Status);
        assert_eq!(AuditEventKind::classify("PRINT"), AuditEventKind::Print);
        assert_eq!(AuditEventKind::classify("SYNC_ERROR_STATUS"), AuditEventKind::Error);
        assert_eq!(AuditEventKind::classify("NOTE"), AuditEventKind::Other);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TicketStatus::parse("LISTO"), Some(TicketStatus::Ready));
        assert_eq!(TicketStatus::parse(""), None);
    }
}

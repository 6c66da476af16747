//! In-Memory Ticket Service
//!
//! Sample-data backend for demo builds (`COMANDA_API_MODE=mock`) and tests.
//! Mutations update the in-memory tickets and append audit events.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ApiError, ApiResult};
use crate::models::{
    AuditEvent, ItemStatus, SyncRunResult, TicketDetail, TicketFilter, TicketItem, TicketStatus,
    TicketSummary,
};
use crate::query::Scheduler;
use crate::service::{ItemCancel, ItemRef, ItemReplace, ItemStatusUpdate, TicketService};

/// One recorded service call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ListTickets(TicketFilter),
    GetTicketDetail(String),
    RunSync,
    UpdateItemStatus(ItemRef, ItemStatus),
    CancelItem(ItemRef),
    ReplaceItem(ItemRef),
    PrintTicket(String),
    GetTicketEvents(String),
}

#[derive(Default)]
pub struct MockTicketService {
    tickets: RefCell<Vec<TicketDetail>>,
    events: RefCell<Vec<AuditEvent>>,
    calls: RefCell<Vec<MockCall>>,
    failures: RefCell<VecDeque<ApiError>>,
    latency: Option<(Rc<dyn Scheduler>, Duration)>,
    next_event_id: Cell<u64>,
}

impl MockTicketService {
    pub fn new(tickets: Vec<TicketDetail>) -> Self {
        Self {
            tickets: RefCell::new(tickets),
            ..Default::default()
        }
    }

    /// The demo kitchen: three tickets placed relative to `now`
    pub fn with_samples(now: DateTime<Utc>) -> Self {
        Self::new(sample_tickets(now))
    }

    /// Delay every call, like a real network would
    pub fn with_latency(mut self, scheduler: Rc<dyn Scheduler>, latency: Duration) -> Self {
        self.latency = Some((scheduler, latency));
        self
    }

    pub fn push_ticket(&self, ticket: TicketDetail) {
        self.tickets.borrow_mut().push(ticket);
    }

    pub fn remove_ticket(&self, ticket_id: &str) {
        self.tickets.borrow_mut().retain(|t| t.summary.id != ticket_id);
    }

    /// The next call fails with `err` instead of running
    pub fn fail_next(&self, err: ApiError) {
        self.failures.borrow_mut().push_back(err);
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn ticket(&self, ticket_id: &str) -> Option<TicketDetail> {
        self.tickets
            .borrow()
            .iter()
            .find(|t| t.summary.id == ticket_id)
            .cloned()
    }

    async fn begin(&self, call: MockCall) -> ApiResult<()> {
        self.calls.borrow_mut().push(call);
        if let Some((scheduler, latency)) = &self.latency {
            scheduler.sleep(*latency).await;
        }
        match self.failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_item<R>(
        &self,
        item: &ItemRef,
        f: impl FnOnce(&mut TicketItem) -> R,
    ) -> ApiResult<R> {
        let mut tickets = self.tickets.borrow_mut();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.summary.id == item.ticket_id)
            .ok_or_else(|| ApiError::NotFound(format!("ticket {}", item.ticket_id)))?;
        let target = ticket
            .items
            .iter_mut()
            .find(|i| i.id == item.item_id)
            .ok_or_else(|| ApiError::NotFound(format!("item {}", item.item_id)))?;
        let result = f(target);
        ticket.summary.status = derive_ticket_status(&ticket.items);
        Ok(result)
    }

    fn record_event(&self, item: &ItemRef, event_type: &str, message: String, user_name: &str) {
        let id = self.next_event_id.get() + 1;
        self.next_event_id.set(id);
        self.events.borrow_mut().push(AuditEvent {
            id: format!("ev-{}", id),
            ticket_id: item.ticket_id.clone(),
            item_id: Some(item.item_id.clone()),
            event_type: event_type.to_string(),
            message,
            meta: None,
            user_name: Some(user_name.to_string()),
            created_at: Utc::now().to_rfc3339(),
        });
    }
}

#[async_trait(?Send)]
impl TicketService for MockTicketService {
    async fn list_tickets(&self, filter: &TicketFilter) -> ApiResult<Vec<TicketSummary>> {
        self.begin(MockCall::ListTickets(filter.clone())).await?;
        let needle = filter.query.trim().to_lowercase();
        Ok(self
            .tickets
            .borrow()
            .iter()
            .filter(|t| filter.status.map_or(true, |s| t.summary.status == s))
            .filter(|t| needle.is_empty() || haystack(&t.summary).contains(&needle))
            .map(|t| t.summary.clone())
            .collect())
    }

    async fn get_ticket_detail(&self, ticket_id: &str) -> ApiResult<TicketDetail> {
        self.begin(MockCall::GetTicketDetail(ticket_id.to_string())).await?;
        self.ticket(ticket_id)
            .ok_or_else(|| ApiError::NotFound("Comanda no encontrada".to_string()))
    }

    async fn run_sync(&self) -> ApiResult<SyncRunResult> {
        self.begin(MockCall::RunSync).await?;
        let now = Utc::now().to_rfc3339();
        Ok(SyncRunResult {
            run_id: Some(format!("mock-{}", self.calls.borrow().len())),
            mode: Some("MANUAL".to_string()),
            new_count: 0,
            updated_count: 0,
            error_count: 0,
            started_at: Some(now.clone()),
            ended_at: Some(now),
        })
    }

    async fn update_item_status(&self, item: &ItemRef, body: &ItemStatusUpdate) -> ApiResult<()> {
        self.begin(MockCall::UpdateItemStatus(item.clone(), body.status)).await?;
        let from = self.with_item(item, |target| {
            let from = target.status;
            target.status = body.status;
            from
        })?;
        self.record_event(
            item,
            "ITEM_STATUS",
            format!("Estado: {} → {}", from.as_str(), body.status.as_str()),
            &body.user_name,
        );
        Ok(())
    }

    async fn cancel_item(&self, item: &ItemRef, body: &ItemCancel) -> ApiResult<()> {
        self.begin(MockCall::CancelItem(item.clone())).await?;
        self.with_item(item, |target| target.status = ItemStatus::Cancelled)?;
        self.record_event(
            item,
            "ITEM_CANCEL",
            format!("Producto cancelado: {}", body.reason),
            &body.user_name,
        );
        Ok(())
    }

    async fn replace_item(&self, item: &ItemRef, body: &ItemReplace) -> ApiResult<()> {
        self.begin(MockCall::ReplaceItem(item.clone())).await?;
        let old = self.with_item(item, |target| {
            target.product_name.replace(body.new_product_name.clone())
        })?;
        self.record_event(
            item,
            "ITEM_REPLACE",
            format!(
                "Producto cambiado: {} → {} ({})",
                old.as_deref().unwrap_or("—"),
                body.new_product_name,
                body.reason
            ),
            &body.user_name,
        );
        Ok(())
    }

    async fn print_ticket(&self, ticket_id: &str, _width_mm: Option<u32>) -> ApiResult<String> {
        self.begin(MockCall::PrintTicket(ticket_id.to_string())).await?;
        let ticket = self
            .ticket(ticket_id)
            .ok_or_else(|| ApiError::NotFound("Comanda no encontrada".to_string()))?;
        Ok(render_print_html(&ticket))
    }

    async fn get_ticket_events(&self, ticket_id: &str) -> ApiResult<Vec<AuditEvent>> {
        self.begin(MockCall::GetTicketEvents(ticket_id.to_string())).await?;
        Ok(self
            .events
            .borrow()
            .iter()
            .filter(|e| e.ticket_id == ticket_id)
            .cloned()
            .collect())
    }
}

fn haystack(t: &TicketSummary) -> String {
    format!(
        "{} {} {} {}",
        t.table_ref.as_deref().unwrap_or(""),
        t.server_name.as_deref().unwrap_or(""),
        t.order_number.map(|n| n.to_string()).unwrap_or_default(),
        t.comanda_number.map(|n| n.to_string()).unwrap_or_default(),
    )
    .to_lowercase()
}

/// Ticket status implied by its items, as the backend computes it
fn derive_ticket_status(items: &[TicketItem]) -> TicketStatus {
    use ItemStatus::*;
    if items.is_empty() {
        return TicketStatus::Pending;
    }
    let all = |pred: fn(&ItemStatus) -> bool| items.iter().all(|i| pred(&i.status));
    let any = |pred: fn(&ItemStatus) -> bool| items.iter().any(|i| pred(&i.status));

    if all(|s| *s == Cancelled) {
        TicketStatus::Cancelled
    } else if all(|s| matches!(s, Delivered | Cancelled)) {
        TicketStatus::Ready
    } else if any(|s| *s == Delivered) && any(|s| matches!(s, Pending | InPreparation)) {
        TicketStatus::Partial
    } else if any(|s| *s == InPreparation) {
        TicketStatus::InPreparation
    } else {
        TicketStatus::Pending
    }
}

fn render_print_html(ticket: &TicketDetail) -> String {
    let t = &ticket.summary;
    let lines: String = ticket
        .items
        .iter()
        .map(|i| format!("<li>{} ({})</li>", i.label(), i.status.as_str()))
        .collect();
    let comanda = t.comanda_number.map(|n| n.to_string()).unwrap_or_default();
    format!(
        "<!doctype html><html><head><meta charset='utf-8'/><title>Comanda {comanda}</title></head><body>\
         <h2>Comanda #{comanda}</h2><div>Mesa: {}</div><div>Mesero: {}</div><hr/><ul>{lines}</ul>\
         <script>window.print()</script></body></html>",
        t.table_ref.as_deref().unwrap_or(""),
        t.server_name.as_deref().unwrap_or(""),
    )
}

fn sample_tickets(now: DateTime<Utc>) -> Vec<TicketDetail> {
    let ago = |minutes: i64| Some((now - chrono::Duration::minutes(minutes)).to_rfc3339());
    let item = |id: &str, name: &str, qty: f64, status: ItemStatus| TicketItem {
        id: id.to_string(),
        product_name: Some(name.to_string()),
        quantity: qty,
        unit: Some("UND".to_string()),
        status,
    };

    vec![
        TicketDetail {
            summary: TicketSummary {
                id: "6c4d7c80-1111-4a11-9d1b-000000000001".to_string(),
                table_ref: Some("12".to_string()),
                server_name: Some("Carlos".to_string()),
                order_number: Some(10452),
                comanda_number: Some(231),
                status: TicketStatus::Pending,
                ordered_at: ago(18),
                prep_started_at: None,
                delivered_at: None,
            },
            items: vec![
                item("i-1", "Hamburguesa clásica", 2.0, ItemStatus::Pending),
                item("i-2", "Papas francesas", 1.0, ItemStatus::Pending),
            ],
        },
        TicketDetail {
            summary: TicketSummary {
                id: "6c4d7c80-2222-4a11-9d1b-000000000002".to_string(),
                table_ref: Some("7".to_string()),
                server_name: Some("Laura".to_string()),
                order_number: Some(10453),
                comanda_number: Some(232),
                status: TicketStatus::InPreparation,
                ordered_at: ago(16),
                prep_started_at: ago(14),
                delivered_at: None,
            },
            items: vec![
                item("i-3", "Sopa del día", 1.0, ItemStatus::InPreparation),
                item("i-4", "Jugo natural", 2.0, ItemStatus::Pending),
            ],
        },
        TicketDetail {
            summary: TicketSummary {
                id: "6c4d7c80-3333-4a11-9d1b-000000000003".to_string(),
                table_ref: Some("2".to_string()),
                server_name: Some("Andrés".to_string()),
                order_number: Some(10454),
                comanda_number: Some(233),
                status: TicketStatus::Ready,
                ordered_at: ago(12),
                prep_started_at: ago(11),
                delivered_at: ago(2),
            },
            items: vec![
                item("i-5", "Pollo a la plancha", 1.0, ItemStatus::Delivered),
                item("i-6", "Ensalada", 1.0, ItemStatus::Delivered),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MockTicketService {
        MockTicketService::with_samples(Utc::now())
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_query() {
        let svc = service();

        let pending = svc
            .list_tickets(&TicketFilter::new(Some(TicketStatus::Pending), ""))
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].comanda_number, Some(231));

        let by_server = svc.list_tickets(&TicketFilter::new(None, "laura")).await.unwrap();
        assert_eq!(by_server.len(), 1);
        assert_eq!(by_server[0].table_ref.as_deref(), Some("7"));

        let by_order = svc.list_tickets(&TicketFilter::new(None, "10454")).await.unwrap();
        assert_eq!(by_order[0].status, TicketStatus::Ready);

        assert_eq!(svc.count_calls(|c| matches!(c, MockCall::ListTickets(_))), 3);
    }

    #[tokio::test]
    async fn test_unknown_ticket_is_not_found() {
        let err = service().get_ticket_detail("nope").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_item_updates_roll_up_to_ticket_status() {
        let svc = service();
        let ticket_id = "6c4d7c80-1111-4a11-9d1b-000000000001";
        let update = |status| ItemStatusUpdate {
            status,
            user_name: "Operario".to_string(),
        };

        svc.update_item_status(&ItemRef::new(ticket_id, "i-1"), &update(ItemStatus::Delivered))
            .await
            .unwrap();
        assert_eq!(svc.ticket(ticket_id).unwrap().summary.status, TicketStatus::Partial);

        svc.cancel_item(
            &ItemRef::new(ticket_id, "i-2"),
            &ItemCancel {
                reason: "Cliente se fue".to_string(),
                user_name: "Operario".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(svc.ticket(ticket_id).unwrap().summary.status, TicketStatus::Ready);

        let events = svc.get_ticket_events(ticket_id).await.unwrap();
        // Oldest first, like the backend's created_at ordering
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type, "ITEM_STATUS");
        assert_eq!(events[1].event_type, "ITEM_CANCEL");
        assert_eq!(events[1].actor(), "Operario");
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let svc = service();
        svc.fail_next(ApiError::Transport("offline".into()));
        assert!(svc.run_sync().await.is_err());
        assert!(svc.run_sync().await.is_ok());
    }

    #[tokio::test]
    async fn test_print_renders_items() {
        let html = service()
            .print_ticket("6c4d7c80-3333-4a11-9d1b-000000000003", Some(80))
            .await
            .unwrap();
        assert!(html.contains("Comanda #233"));
        assert!(html.contains("1 × Ensalada (ENTREGADO)"));
    }

    #[test]
    fn test_derive_status_empty_is_pending() {
        assert_eq!(derive_ticket_status(&[]), TicketStatus::Pending);
    }
}

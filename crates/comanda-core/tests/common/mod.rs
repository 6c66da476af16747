//! Shared test harness: a tokio-backed scheduler and fetchers over the mock service.

#![allow(dead_code)]

use std::rc::Rc;
use std::time::Duration;

use comanda_core::{
    ApiResult, Fetcher, LocalFuture, MockTicketService, Scheduler, TicketDetail, TicketFilter,
    TicketService, TicketSummary,
};

/// Runs poller tasks on the current `LocalSet` with tokio timers
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn spawn(&self, task: LocalFuture<()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, period: Duration) -> LocalFuture<()> {
        Box::pin(tokio::time::sleep(period))
    }
}

pub fn scheduler() -> Rc<dyn Scheduler> {
    Rc::new(TokioScheduler)
}

pub fn list_fetcher(svc: Rc<MockTicketService>) -> Fetcher<TicketFilter, Vec<TicketSummary>> {
    Rc::new(move |filter: TicketFilter| -> LocalFuture<ApiResult<Vec<TicketSummary>>> {
        let svc = svc.clone();
        Box::pin(async move { svc.list_tickets(&filter).await })
    })
}

pub fn detail_fetcher(svc: Rc<MockTicketService>) -> Fetcher<String, TicketDetail> {
    Rc::new(move |id: String| -> LocalFuture<ApiResult<TicketDetail>> {
        let svc = svc.clone();
        Box::pin(async move { svc.get_ticket_detail(&id).await })
    })
}

pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

use std::rc::Rc;

use comanda_core::{ApiResult, AuditEvent, Fetcher, LocalFuture, PollOptions, TicketService};
use leptos::prelude::*;

use super::{use_polled_query, Query};
use crate::context::use_app_context;

/// Audit trail of the selected ticket, fetched once per selection.
/// Callers refetch after mutations.
pub fn use_ticket_events(selected: Signal<Option<String>>) -> Query<String, Vec<AuditEvent>> {
    let service = use_app_context().service();
    let fetcher: Fetcher<String, Vec<AuditEvent>> = Rc::new(
        move |ticket_id: String| -> LocalFuture<ApiResult<Vec<AuditEvent>>> {
            let service = service.clone();
            Box::pin(async move { service.get_ticket_events(&ticket_id).await })
        },
    );

    use_polled_query(
        "ticket-events",
        selected,
        PollOptions::once().clear_data_on_error(),
        fetcher,
    )
}

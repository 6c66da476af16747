use std::rc::Rc;

use comanda_core::{
    ApiResult, Fetcher, LocalFuture, PollOptions, TicketFilter, TicketService, TicketSummary,
};
use leptos::prelude::*;

use super::{use_polled_query, Query};
use crate::context::use_app_context;

/// Ticket list for `filter`, refreshed on the list interval and on every
/// filter change.
pub fn use_tickets(filter: Signal<TicketFilter>) -> Query<TicketFilter, Vec<TicketSummary>> {
    let ctx = use_app_context();
    let service = ctx.service();
    let fetcher: Fetcher<TicketFilter, Vec<TicketSummary>> = Rc::new(
        move |filter: TicketFilter| -> LocalFuture<ApiResult<Vec<TicketSummary>>> {
            let service = service.clone();
            Box::pin(async move { service.list_tickets(&filter).await })
        },
    );

    use_polled_query(
        "tickets",
        Signal::derive(move || Some(filter.get())),
        PollOptions::every(ctx.config().list_interval),
        fetcher,
    )
}

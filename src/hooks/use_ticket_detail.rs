use std::rc::Rc;

use comanda_core::{ApiResult, Fetcher, LocalFuture, PollOptions, TicketDetail, TicketService};
use leptos::prelude::*;

use super::{use_polled_query, Query};
use crate::context::use_app_context;

/// Detail of the selected ticket; idle while nothing is selected
pub fn use_ticket_detail(selected: Signal<Option<String>>) -> Query<String, TicketDetail> {
    let ctx = use_app_context();
    let service = ctx.service();
    let fetcher: Fetcher<String, TicketDetail> = Rc::new(
        move |ticket_id: String| -> LocalFuture<ApiResult<TicketDetail>> {
            let service = service.clone();
            Box::pin(async move { service.get_ticket_detail(&ticket_id).await })
        },
    );

    use_polled_query(
        "ticket-detail",
        selected,
        PollOptions::every(ctx.config().detail_interval),
        fetcher,
    )
}

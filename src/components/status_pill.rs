//! Status Pills
//!
//! Coloured labels for ticket and item states.

use comanda_core::{ItemStatus, TicketStatus};
use leptos::prelude::*;

#[component]
pub fn TicketStatusPill(status: TicketStatus) -> impl IntoView {
    let class = format!("status-pill ticket-{}", status.as_str().to_lowercase());
    view! { <span class=class>{status.label()}</span> }
}

#[component]
pub fn ItemStatusPill(status: ItemStatus) -> impl IntoView {
    let class = format!("status-pill item-{}", status.as_str().to_lowercase());
    view! { <span class=class>{status.label()}</span> }
}

//! Ticket Grid
//!
//! Responsive grid of cards, or the empty-state message.

use comanda_core::TicketCard;
use leptos::prelude::*;

use super::TicketCardView;

#[component]
pub fn TicketGrid(
    #[prop(into)] cards: Signal<Vec<TicketCard>>,
    #[prop(into)] on_open: Callback<String>,
) -> impl IntoView {
    view! {
        <Show
            when=move || cards.with(|c| !c.is_empty())
            fallback=|| view! { <div class="panel-note">"No hay comandas para mostrar."</div> }
        >
            <div class="ticket-grid">
                // Keyed on everything a refresh can change, so updated cards re-render
                <For
                    each=move || cards.get()
                    key=|card| (
                        card.id.clone(),
                        card.status,
                        card.freshness.minutes,
                        card.prep_started_at.clone(),
                        card.delivered_at.clone(),
                    )
                    children=move |card| view! { <TicketCardView card=card on_open=on_open /> }
                />
            </div>
        </Show>
    }
}

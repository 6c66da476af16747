//! Ticket Card
//!
//! One comanda in the grid. Clicking opens the detail modal.

use comanda_core::TicketCard;
use leptos::prelude::*;

use super::{AgeBadge, TicketStatusPill};

#[component]
pub fn TicketCardView(card: TicketCard, #[prop(into)] on_open: Callback<String>) -> impl IntoView {
    let id = card.id.clone();
    let class = format!("ticket-card {}", card.accent_class());

    view! {
        <button class=class on:click=move |_| on_open.run(id.clone())>
            <div class="card-head">
                <div>
                    <div class="card-caption">"Mesa"</div>
                    <div class="card-table">"#" {card.table}</div>
                </div>
                <div class="card-badges">
                    <TicketStatusPill status=card.status />
                    <AgeBadge freshness=card.freshness />
                </div>
            </div>

            <div class="card-grid">
                <div>
                    <div class="card-caption">"Mesero"</div>
                    <div class="card-value">{card.server}</div>
                </div>
                <div>
                    <div class="card-caption">"Hora pedido"</div>
                    <div class="card-value">{card.ordered_at}</div>
                </div>
                <div>
                    <div class="card-caption">"No. Pedido"</div>
                    <div class="card-value">{card.order_number}</div>
                </div>
                <div>
                    <div class="card-caption">"No. Comanda"</div>
                    <div class="card-value">{card.comanda_number}</div>
                </div>
            </div>

            <div class="card-grid small">
                <div>
                    <div class="card-caption">"Prep."</div>
                    <div class="card-value">{card.prep_started_at}</div>
                </div>
                <div>
                    <div class="card-caption">"Entrega"</div>
                    <div class="card-value">{card.delivered_at}</div>
                </div>
            </div>
        </button>
    }
}

//! Kitchen Panel
//!
//! Wires the polling hooks to the views: filters drive the list query,
//! the selection drives the detail and events queries, and new tickets
//! in the displayed list trigger one beep per batch.

use std::time::Duration;

use chrono::Utc;
use comanda_core::{
    build_cards, visible_tickets, NewTicketDetector, Observation, TicketService, TicketStats,
};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{
    FlashBanner, PanelToolbar, SummaryBar, SyncButton, TicketDetailModal, TicketGrid,
};
use crate::context::use_app_context;
use crate::hooks::{use_ticket_detail, use_ticket_events, use_tickets};
use crate::sound;
use crate::store::{current_filter, use_panel_store, Flash, PanelStateStoreFields};

/// How long the sync outcome stays on screen
const FLASH_TTL: Duration = Duration::from_secs(4);
/// Age badges refresh even when the list itself does not change
const CLOCK_TICK_MS: u32 = 30_000;

#[component]
pub fn PanelPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_panel_store();
    let thresholds = ctx.config().urgency;
    let role = ctx.config().role;

    // Queries
    let filter = Memo::new(move |_| current_filter(&store));
    let tickets = use_tickets(filter.into());
    let selected = Signal::derive(move || store.selected_ticket().get());
    let detail = use_ticket_detail(selected);
    let events = use_ticket_events(selected);

    // Derived views of the list
    let visible = Memo::new(move |_| {
        let only_active = store.only_active().get();
        tickets.payload.with(|data| {
            data.as_deref()
                .map(|data| visible_tickets(data, only_active))
                .unwrap_or_default()
        })
    });
    let stats = Memo::new(move |_| visible.with(|v| TicketStats::from_tickets(v)));

    let clock = RwSignal::new(Utc::now());
    let ticker = Interval::new(CLOCK_TICK_MS, move || {
        clock.try_set(Utc::now());
    });
    // Dropped (and cleared) with the panel
    let _ticker = StoredValue::new_local(ticker);

    let cards = Memo::new(move |_| {
        let now = clock.get();
        visible.with(|v| build_cards(v, now, &thresholds))
    });

    // New-ticket alert
    let detector = StoredValue::new(NewTicketDetector::new());
    Effect::new(move |_| {
        let sound_enabled = store.sound_enabled().get();
        let observation = visible.with(|v| {
            detector.try_update_value(|d| d.observe(v.iter().map(|t| t.id.as_str()), sound_enabled))
        });
        match observation {
            Some(Observation::NewTickets { ids, notify }) => {
                log::info!("[PANEL] {} new ticket(s): {:?}", ids.len(), ids);
                if notify {
                    sound::play_new_ticket_beep();
                }
            }
            Some(Observation::Primed { recorded }) => {
                log::debug!("[PANEL] detector primed with {} ticket(s)", recorded)
            }
            _ => {}
        }
    });

    // Manual sync
    let on_sync = move |_: ()| {
        if !role.can_run_sync() {
            log::warn!("[PANEL] sync refused for role {}", role.as_str());
            return;
        }
        if store.sync_busy().get_untracked() {
            return;
        }
        let service = ctx.service();
        store.flash().set(None);
        store.sync_busy().set(true);
        spawn_local(async move {
            let flash = match service.run_sync().await {
                Ok(result) => {
                    log::info!(
                        "[PANEL] sync {} ok: {} new, {} updated",
                        result.run_id.as_deref().unwrap_or("-"),
                        result.new_count,
                        result.updated_count
                    );
                    tickets.refetch();
                    Flash::info(result.summary_message())
                }
                Err(err) => {
                    log::error!("[PANEL] sync failed: {}", err);
                    Flash::error(err.to_string())
                }
            };
            store.sync_busy().set(false);
            store.flash().set(Some(flash.clone()));

            gloo_timers::future::sleep(FLASH_TTL).await;
            store.flash().update(|current| {
                if current.as_ref() == Some(&flash) {
                    *current = None;
                }
            });
        });
    };

    let open_ticket = move |id: String| store.selected_ticket().set(Some(id));
    let close_ticket = move |_: ()| store.selected_ticket().set(None);
    let refresh_all = move |_: ()| {
        detail.refetch();
        events.refetch();
        tickets.refetch();
    };

    view! {
        <div class="panel">
            <PanelToolbar />

            <div class="panel-row">
                <SummaryBar stats=stats />
                <span
                    class=move || if tickets.loading() { "poll-dot active" } else { "poll-dot" }
                    title="Actualizando"
                ></span>
                <div class="panel-actions">
                    <span class="role-badge">"Rol: " <strong>{role.as_str()}</strong></span>
                    <Show when=move || role.can_run_sync()>
                        <SyncButton busy=Signal::derive(move || store.sync_busy().get()) on_click=on_sync />
                    </Show>
                </div>
            </div>

            <FlashBanner />

            {move || {
                let state = tickets.state.get();
                if let Some(msg) = state.error_message() {
                    let msg = if msg.is_empty() { "Error cargando comandas".to_string() } else { msg };
                    view! { <div class="panel-note error">{msg}</div> }.into_any()
                } else if state.data.is_none() {
                    view! { <div class="panel-note">"Cargando…"</div> }.into_any()
                } else {
                    ().into_any()
                }
            }}

            <Show when=move || tickets.payload.with(Option::is_some)>
                <TicketGrid cards=cards on_open=open_ticket />
            </Show>

            <Show when=move || selected.with(Option::is_some)>
                <TicketDetailModal
                    detail=detail
                    events=events
                    on_close=close_ticket
                    on_refresh=refresh_all
                />
            </Show>
        </div>
    }
}

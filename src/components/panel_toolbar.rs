//! Panel Toolbar
//!
//! Filters (active only, status, free text), sound toggle and operator name.

use comanda_core::TicketStatus;
use leptos::prelude::*;

use crate::store::{self, use_panel_store, PanelStateStoreFields};

const ALL_STATUSES: &str = "ALL";

#[component]
pub fn PanelToolbar() -> impl IntoView {
    let store = use_panel_store();

    let status_value = move || {
        store
            .status_filter()
            .get()
            .map(|s| s.as_str())
            .unwrap_or(ALL_STATUSES)
    };

    view! {
        <div class="panel-toolbar">
            <div class="toolbar-filters">
                <label class="toolbar-check">
                    <input
                        type="checkbox"
                        prop:checked=move || store.only_active().get()
                        on:change=move |ev| store.only_active().set(event_target_checked(&ev))
                    />
                    "Solo activos"
                </label>

                <select
                    class="toolbar-select"
                    prop:value=status_value
                    on:change=move |ev| {
                        store.status_filter().set(TicketStatus::parse(&event_target_value(&ev)))
                    }
                >
                    <option value=ALL_STATUSES>"Todos"</option>
                    {TicketStatus::ALL.iter().map(|status| view! {
                        <option value=status.as_str()>{status.label()}</option>
                    }).collect_view()}
                </select>

                <input
                    type="search"
                    class="toolbar-search"
                    placeholder="Buscar mesa, mesero, #comanda…"
                    prop:value=move || store.query().get()
                    on:input=move |ev| store.query().set(event_target_value(&ev))
                />
            </div>

            <div class="toolbar-prefs">
                <label class="toolbar-actor">
                    "Operario"
                    <input
                        type="text"
                        prop:value=move || store.actor_name().get()
                        on:change=move |ev| store::set_actor_name(&store, event_target_value(&ev))
                    />
                </label>
                <label class="toolbar-check">
                    <input
                        type="checkbox"
                        prop:checked=move || store.sound_enabled().get()
                        on:change=move |ev| store::set_sound_enabled(&store, event_target_checked(&ev))
                    />
                    "Sonido nuevas comandas"
                </label>
            </div>
        </div>
    }
}

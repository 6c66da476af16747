//! Summary Bar
//!
//! Status counters over the tickets currently shown.

use comanda_core::TicketStats;
use leptos::prelude::*;

#[component]
pub fn SummaryBar(#[prop(into)] stats: Signal<TicketStats>) -> impl IntoView {
    view! {
        <div class="summary-bar">
            <div class="summary-title">"Resumen"</div>
            <div class="summary-badges">
                <Badge label="Total" value=Signal::derive(move || stats.get().total) />
                <Badge label="Pend." value=Signal::derive(move || stats.get().pending) />
                <Badge label="Prep." value=Signal::derive(move || stats.get().in_preparation) />
                <Badge label="Parcial" value=Signal::derive(move || stats.get().partial) />
                <Badge label="Listo" value=Signal::derive(move || stats.get().ready) />
            </div>
        </div>
    }
}

#[component]
fn Badge(label: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <span class="summary-badge">
            <span class="summary-label">{label}</span>
            <span class="summary-value">{move || value.get()}</span>
        </span>
    }
}

//! Events Timeline
//!
//! Audit trail of a ticket, oldest first as the backend returns it.

use chrono::Local;
use comanda_core::freshness::parse_timestamp;
use comanda_core::AuditEvent;
use leptos::prelude::*;

fn format_date_time(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|t| t.with_timezone(&Local).format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[component]
pub fn EventsTimeline(#[prop(into)] events: Signal<Vec<AuditEvent>>) -> impl IntoView {
    view! {
        <Show
            when=move || events.with(|e| !e.is_empty())
            fallback=|| view! { <div class="timeline-empty">"Aún no hay eventos registrados."</div> }
        >
            <ol class="timeline">
                <For
                    each=move || events.get()
                    key=|ev| ev.id.clone()
                    children=move |ev| view! { <EventRow event=ev /> }
                />
            </ol>
        </Show>
    }
}

#[component]
fn EventRow(event: AuditEvent) -> impl IntoView {
    let dot = format!("timeline-dot {}", event.kind().css_class());
    let byline = format!(
        "{} · {} · ",
        format_date_time(&event.created_at),
        event.actor()
    );
    let item_suffix = if event.item_id.is_some() { " · item" } else { "" };
    let meta = event
        .meta
        .as_ref()
        .map(|m| serde_json::to_string_pretty(m).unwrap_or_else(|_| m.to_string()));

    view! {
        <li class="timeline-row">
            <span class=dot></span>
            <div class="timeline-body">
                <div class="timeline-message">{event.message}</div>
                <div class="timeline-byline">
                    {byline}
                    <strong>{event.event_type}</strong>
                    {item_suffix}
                </div>
                {meta.map(|json| view! {
                    <details class="timeline-meta">
                        <summary>"Ver detalles"</summary>
                        <pre>{json}</pre>
                    </details>
                })}
            </div>
        </li>
    }
}

use comanda_core::Freshness;
use leptos::prelude::*;

/// Minutes since the order, coloured by urgency; overdue active tickets pulse
#[component]
pub fn AgeBadge(freshness: Freshness) -> impl IntoView {
    let mut class = format!("age-badge age-{}", freshness.tier.as_str());
    if freshness.alarming {
        class.push_str(" pulse");
    }
    view! { <span class=class>{format!("{} min", freshness.minutes)}</span> }
}

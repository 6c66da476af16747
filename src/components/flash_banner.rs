use leptos::prelude::*;

use crate::store::{FlashKind, use_panel_store, PanelStateStoreFields};

/// Sync outcome banner; cleared by the panel after a few seconds
#[component]
pub fn FlashBanner() -> impl IntoView {
    let store = use_panel_store();

    move || {
        store.flash().get().map(|flash| {
            let class = match flash.kind {
                FlashKind::Info => "panel-note",
                FlashKind::Error => "panel-note error",
            };
            view! { <div class=class>{flash.message}</div> }
        })
    }
}

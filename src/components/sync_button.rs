use leptos::prelude::*;

/// Manual sync trigger; disabled while a run is in progress
#[component]
pub fn SyncButton(#[prop(into)] busy: Signal<bool>, #[prop(into)] on_click: Callback<()>) -> impl IntoView {
    view! {
        <button
            class=move || if busy.get() { "sync-btn busy" } else { "sync-btn" }
            disabled=move || busy.get()
            on:click=move |_| on_click.run(())
        >
            {move || if busy.get() { "Sincronizando…" } else { "Sincronizar ahora" }}
        </button>
    }
}

//! Comanda Panel App
//!
//! Root component: provides context and the panel store, then renders the
//! kitchen panel.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::config;
use crate::context::AppContext;
use crate::panel::PanelPage;
use crate::store::PanelState;

#[component]
pub fn App() -> impl IntoView {
    let config = config::api_config();
    log::info!(
        "[APP] Starting panel ({:?} mode, list every {:?}, detail every {:?})",
        config.mode,
        config.list_interval,
        config.detail_interval
    );

    // Provide context to all children
    provide_context(AppContext::new(config));
    provide_context(Store::new(PanelState::from_prefs()));

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Comandas"</h1>
                <span class="app-subtitle">"Panel de cocina"</span>
            </header>
            <main class="main-content">
                <PanelPage />
            </main>
        </div>
    }
}

//! Panel State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use comanda_core::{TicketFilter, TicketStatus};
use leptos::prelude::*;
use reactive_stores::Store;

use crate::prefs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Error,
}

/// Transient banner under the summary
#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }
}

/// Panel state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct PanelState {
    /// `None` means "Todos"
    pub status_filter: Option<TicketStatus>,
    /// Free text: table, server or comanda number
    pub query: String,
    /// Hide ready and cancelled tickets (client-side)
    pub only_active: bool,
    /// Beep on new tickets; persisted
    pub sound_enabled: bool,
    /// Name sent as `user_name` on item mutations; persisted
    pub actor_name: String,
    /// Ticket open in the detail modal
    pub selected_ticket: Option<String>,
    /// Manual sync in progress
    pub sync_busy: bool,
    pub flash: Option<Flash>,
}

impl PanelState {
    pub fn from_prefs() -> Self {
        Self {
            only_active: true,
            sound_enabled: prefs::load_sound_enabled(),
            actor_name: prefs::load_actor_name(),
            ..Default::default()
        }
    }
}

pub type PanelStore = Store<PanelState>;

pub fn use_panel_store() -> PanelStore {
    expect_context::<PanelStore>()
}

/// Server-side filter derived from the toolbar fields
pub fn current_filter(store: &PanelStore) -> TicketFilter {
    TicketFilter::new(store.status_filter().get(), store.query().get())
}

pub fn set_sound_enabled(store: &PanelStore, enabled: bool) {
    store.sound_enabled().set(enabled);
    prefs::save_sound_enabled(enabled);
}

pub fn set_actor_name(store: &PanelStore, name: String) {
    prefs::save_actor_name(&name);
    store.actor_name().set(name);
}

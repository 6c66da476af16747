//! Application Context
//!
//! Shared services provided via Leptos Context API.

use std::rc::Rc;
use std::time::Duration;

use chrono::Utc;
use comanda_core::{ApiConfig, ApiMode, HttpTicketService, MockTicketService, TicketService};
use leptos::prelude::*;

use crate::hooks::WebScheduler;

/// Latency of the demo backend, so loading states are visible
const MOCK_LATENCY: Duration = Duration::from_millis(180);

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Ticket backend (HTTP or in-memory); `Rc` so it stays on the UI thread
    service: StoredValue<Rc<dyn TicketService>, LocalStorage>,
    /// Resolved build-time configuration
    config: StoredValue<ApiConfig>,
}

impl AppContext {
    pub fn new(config: ApiConfig) -> Self {
        let service: Rc<dyn TicketService> = match config.mode {
            ApiMode::Live => {
                log::info!("[APP] Using ticket API at {}", config.base_url);
                Rc::new(HttpTicketService::new(config.clone()))
            }
            ApiMode::Mock => {
                log::info!("[APP] Using in-memory sample tickets");
                Rc::new(
                    MockTicketService::with_samples(Utc::now())
                        .with_latency(Rc::new(WebScheduler), MOCK_LATENCY),
                )
            }
        };
        Self {
            service: StoredValue::new_local(service),
            config: StoredValue::new(config),
        }
    }

    pub fn service(&self) -> Rc<dyn TicketService> {
        self.service.get_value()
    }

    pub fn config(&self) -> ApiConfig {
        self.config.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

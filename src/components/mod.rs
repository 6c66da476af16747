//! UI Components
//!
//! Leptos components of the kitchen panel.

mod age_badge;
mod events_timeline;
mod flash_banner;
mod item_action_modal;
mod panel_toolbar;
mod status_pill;
mod summary_bar;
mod sync_button;
mod ticket_card;
mod ticket_detail_modal;
mod ticket_grid;

pub use age_badge::AgeBadge;
pub use events_timeline::EventsTimeline;
pub use flash_banner::FlashBanner;
pub use item_action_modal::{ItemActionModal, ItemActionMode};
pub use panel_toolbar::PanelToolbar;
pub use status_pill::{ItemStatusPill, TicketStatusPill};
pub use summary_bar::SummaryBar;
pub use sync_button::SyncButton;
pub use ticket_card::TicketCardView;
pub use ticket_detail_modal::TicketDetailModal;
pub use ticket_grid::TicketGrid;

//! Ticket Detail Modal
//!
//! Header, items with status and cancel/replace actions, print and the
//! audit timeline for the selected ticket. Mutation errors are shown inline;
//! after a successful mutation the caller refreshes detail, list and events.

use comanda_core::{
    format_clock, AuditEvent, ItemCommand, ItemRef, ItemStatus, TicketDetail, TicketItem,
    TicketService,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{EventsTimeline, ItemActionModal, ItemActionMode, ItemStatusPill, TicketStatusPill};
use crate::context::use_app_context;
use crate::hooks::Query;
use crate::print::{self, RECEIPT_WIDTH_MM};
use crate::store::{use_panel_store, PanelStateStoreFields};

/// Cancel/replace waiting for its reason
#[derive(Clone, Debug, PartialEq)]
struct PendingAction {
    mode: ItemActionMode,
    item: ItemRef,
    label: String,
}

#[component]
pub fn TicketDetailModal(
    detail: Query<String, TicketDetail>,
    events: Query<String, Vec<AuditEvent>>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_refresh: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_panel_store();

    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let action = RwSignal::new(None::<PendingAction>);

    let run_command = Callback::new(move |(item, command): (ItemRef, ItemCommand)| {
        let actor = store.actor_name().get_untracked();
        let service = ctx.service();
        error.set(None);
        busy.set(true);
        spawn_local(async move {
            match command.dispatch(service.as_ref(), &item, &actor).await {
                Ok(()) => {
                    action.set(None);
                    on_refresh.run(());
                }
                Err(err) => {
                    log::warn!("[ACTION] {} failed: {}", item.item_id, err);
                    error.set(Some(err.to_string()));
                }
            }
            busy.set(false);
        });
    });

    let open_action = Callback::new(move |pending: PendingAction| {
        error.set(None);
        action.set(Some(pending));
    });

    let on_print = move |_| {
        let Some(ticket_id) = detail
            .state
            .with_untracked(|s| s.data.as_ref().map(|d| d.summary.id.clone()))
        else {
            return;
        };
        let service = ctx.service();
        error.set(None);
        busy.set(true);
        spawn_local(async move {
            let printed = match service.print_ticket(&ticket_id, Some(RECEIPT_WIDTH_MM)).await {
                Ok(html) => print::open_print_window(&html),
                Err(err) => Err(err.to_string()),
            };
            match printed {
                Ok(()) => events.refetch(),
                Err(msg) => error.set(Some(msg)),
            }
            busy.set(false);
        });
    };

    // Rows rebuild only when the payload changes, not on each poll tick
    let body = move || match detail.payload.get() {
        Some(ticket) => {
            let ticket_id = ticket.summary.id.clone();
            view! {
                <div class="modal-header">
                    <DetailHeader ticket=ticket.clone() />
                </div>
                <div class="modal-body">
                    {move || error.get().map(|msg| view! { <div class="panel-note error">{msg}</div> })}

                    <div class="modal-section-head">
                        <h2>"Productos"</h2>
                        <div class="modal-buttons">
                            <button class="btn" disabled=move || busy.get() on:click=on_print>
                                "Imprimir"
                            </button>
                            <button class="btn dark" on:click=move |_| on_close.run(())>
                                "Cerrar"
                            </button>
                        </div>
                    </div>

                    <div class="item-list">
                        {ticket.items.into_iter().map(|item| view! {
                            <ItemRow
                                ticket_id=ticket_id.clone()
                                item=item
                                busy=busy
                                on_command=run_command
                                on_action=open_action
                            />
                        }).collect_view()}
                    </div>

                    <Show when=move || busy.get()>
                        <div class="modal-hint">"Procesando…"</div>
                    </Show>

                    <h2 class="modal-section-title">"Historial"</h2>
                    {move || match events.error_message() {
                        Some(msg) => view! { <div class="panel-note error">{msg}</div> }.into_any(),
                        None => view! {
                            <EventsTimeline events=Signal::derive(move || events.data().unwrap_or_default()) />
                        }.into_any(),
                    }}
                </div>
            }
            .into_any()
        }
        None => {
            let note = move || {
                detail
                    .error_message()
                    .unwrap_or_else(|| "Cargando…".to_string())
            };
            view! {
                <div class="modal-body">
                    <div class="panel-note">{note}</div>
                    <div class="modal-buttons">
                        <button class="btn dark" on:click=move |_| on_close.run(())>"Cerrar"</button>
                    </div>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <div class="modal-layer">
            <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
            <div class="modal-card">{body}</div>
        </div>

        {move || action.get().map(|pending| {
            let PendingAction { mode, item, label } = pending;
            view! {
                <ItemActionModal
                    mode=mode
                    item_label=label
                    busy=busy
                    on_close=move |_: ()| action.set(None)
                    on_submit=move |command: ItemCommand| run_command.run((item.clone(), command))
                />
            }
        })}
    }
}

#[component]
fn DetailHeader(ticket: TicketDetail) -> impl IntoView {
    let s = ticket.summary;
    let or_dash = |v: Option<String>| v.unwrap_or_else(|| "—".to_string());
    let number = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_else(|| "—".to_string());

    view! {
        <div class="detail-header">
            <div>
                <div class="card-caption">"Mesa"</div>
                <div class="card-table">"#" {or_dash(s.table_ref)}</div>
                <div class="detail-line"><strong>"Mesero: "</strong>{or_dash(s.server_name)}</div>
                <div class="detail-line">
                    <strong>"Pedido: "</strong>{number(s.order_number)}
                    " · "
                    <strong>"Comanda: "</strong>{number(s.comanda_number)}
                </div>
            </div>
            <div class="detail-times">
                <TicketStatusPill status=s.status />
                <div>"Pedido: " <strong>{format_clock(s.ordered_at.as_deref())}</strong></div>
                <div>"Prep.: " <strong>{format_clock(s.prep_started_at.as_deref())}</strong></div>
                <div>"Entrega: " <strong>{format_clock(s.delivered_at.as_deref())}</strong></div>
            </div>
        </div>
    }
}

#[component]
fn ItemRow(
    ticket_id: String,
    item: TicketItem,
    busy: RwSignal<bool>,
    on_command: Callback<(ItemRef, ItemCommand)>,
    on_action: Callback<PendingAction>,
) -> impl IntoView {
    let item_ref = ItemRef::new(ticket_id, item.id.clone());
    let label = item.label();
    let cancelled = item.is_cancelled();
    let locked = move || cancelled || busy.get();

    let status_buttons = ItemStatus::SETTABLE
        .iter()
        .map(|&status| {
            let target = item_ref.clone();
            view! {
                <button
                    class="btn small"
                    disabled=locked
                    on:click=move |_| on_command.run((target.clone(), ItemCommand::SetStatus(status)))
                >
                    {status.label()}
                </button>
            }
        })
        .collect_view();

    let action_button = |mode: ItemActionMode, class: &'static str, text: &'static str| {
        let pending = PendingAction {
            mode,
            item: item_ref.clone(),
            label: label.clone(),
        };
        view! {
            <button class=class disabled=locked on:click=move |_| on_action.run(pending.clone())>
                {text}
            </button>
        }
    };

    view! {
        <div class="item-row">
            <div class="item-head">
                <div>
                    <div class="item-name">{label.clone()}</div>
                    <div class="item-unit">"Unidad: " {item.unit.clone().unwrap_or_else(|| "—".to_string())}</div>
                </div>
                <ItemStatusPill status=item.status />
            </div>
            <div class="item-actions">
                {status_buttons}
                <div class="spacer"></div>
                {action_button(ItemActionMode::Replace, "btn small", "Cambiar")}
                {action_button(ItemActionMode::Cancel, "btn small danger", "Cancelar")}
            </div>
        </div>
    }
}

//! Item Action Modal
//!
//! Collects the reason (and replacement product) for cancelling or changing
//! one item. Escape closes, Ctrl/Cmd+Enter submits.

use comanda_core::ItemCommand;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemActionMode {
    Cancel,
    Replace,
}

impl ItemActionMode {
    fn title(&self) -> &'static str {
        match self {
            ItemActionMode::Cancel => "Cancelar producto",
            ItemActionMode::Replace => "Cambiar producto",
        }
    }

    fn confirm_label(&self) -> &'static str {
        match self {
            ItemActionMode::Cancel => "Confirmar cancelación",
            ItemActionMode::Replace => "Confirmar cambio",
        }
    }

    fn reason_placeholder(&self) -> &'static str {
        match self {
            ItemActionMode::Cancel => "Ej: Cliente canceló el pedido",
            ItemActionMode::Replace => "Ej: Cambio solicitado por el cliente",
        }
    }
}

#[component]
pub fn ItemActionModal(
    mode: ItemActionMode,
    /// e.g. "2 × Hamburguesa"
    #[prop(into)]
    item_label: String,
    #[prop(into)] busy: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_submit: Callback<ItemCommand>,
) -> impl IntoView {
    let reason = RwSignal::new(String::new());
    let new_name = RwSignal::new(String::new());
    let touched = RwSignal::new(false);

    let command = move || match mode {
        ItemActionMode::Cancel => ItemCommand::Cancel { reason: reason.get() },
        ItemActionMode::Replace => ItemCommand::Replace {
            new_product_name: new_name.get(),
            reason: reason.get(),
        },
    };
    let can_submit = move || command().problems().is_empty() && !busy.get();

    let submit = move || {
        touched.set(true);
        if can_submit() {
            on_submit.run(command());
        }
    };
    let close = move || {
        if !busy.get_untracked() {
            on_close.run(());
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let key = ev.key();
        if key == "Escape" {
            ev.stop_propagation();
            close();
        } else if key == "Enter" && (ev.ctrl_key() || ev.meta_key()) {
            ev.prevent_default();
            submit();
        }
    };

    view! {
        <div class="modal-layer top" on:keydown=on_keydown>
            <div class="modal-backdrop" on:click=move |_| close()></div>
            <div class="modal-card narrow">
                <div class="modal-header">
                    <div class="modal-title">{mode.title()}</div>
                    <div class="modal-subtitle">{item_label}</div>
                    <button
                        class="modal-x"
                        title="Cerrar"
                        disabled=move || busy.get()
                        on:click=move |_| close()
                    >
                        "✕"
                    </button>
                </div>

                <div class="modal-body">
                    <Show when=move || mode == ItemActionMode::Replace>
                        <label class="field-label">"Nuevo producto"</label>
                        <input
                            type="text"
                            class="field"
                            placeholder="Ej: Hamburguesa sin cebolla"
                            autofocus
                            prop:value=move || new_name.get()
                            on:input=move |ev| {
                                new_name.set(event_target_value(&ev));
                                touched.set(true);
                            }
                        />
                    </Show>

                    <label class="field-label">"Motivo"</label>
                    <textarea
                        class="field"
                        rows="3"
                        placeholder=mode.reason_placeholder()
                        autofocus=move || mode == ItemActionMode::Cancel
                        prop:value=move || reason.get()
                        on:input=move |ev| {
                            reason.set(event_target_value(&ev));
                            touched.set(true);
                        }
                    ></textarea>

                    <Show when=move || touched.get()>
                        <ul class="field-problems">
                            {move || command().problems().into_iter().map(|p| view! { <li>{p}</li> }).collect_view()}
                        </ul>
                    </Show>
                    <div class="field-tip">"Tip: usa " <strong>"Ctrl+Enter"</strong> " para confirmar rápido."</div>

                    <div class="modal-actions">
                        <button class="btn" disabled=move || busy.get() on:click=move |_| close()>
                            "Volver"
                        </button>
                        <button
                            class="btn primary"
                            disabled=move || !can_submit()
                            on:click=move |_| submit()
                        >
                            {move || if busy.get() { "Procesando…" } else { mode.confirm_label() }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

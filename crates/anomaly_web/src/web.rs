use anomaly_demo::prelude::*;
use leptos::prelude::*;
use leptos::task::spawn_local;

mod module;
mod storage;
mod views;

use crate::ui_model::{describe_error, PageElement, DEFAULT_INPUT};
use module::WasmModule;
use views::{SignalResultView, SignalStatusView};

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let config = storage::load_config();

    let (status, set_status) = signal(Badge::initializing());
    let (trigger_enabled, set_trigger_enabled) = signal(false);
    let (raw_value, set_raw_value) = signal(DEFAULT_INPUT.to_string());
    let (result, set_result) = signal(Rendered::default());

    let module = WasmModule::new(config.module.clone());
    let module_for_clicks = StoredValue::new_local(module.clone());
    let handler = StoredValue::new_local(TriggerHandler::from_config(
        SignalResultView { result: set_result },
        &config,
    ));

    let status_view = SignalStatusView {
        status: set_status,
        trigger_enabled: set_trigger_enabled,
    };
    spawn_local(async move {
        let mut initializer = Initializer::new(status_view);
        if let Err(e) = initializer.run(&module).await {
            web_sys::console::error_1(&describe_error(&e).into());
        }
    });

    let on_run = move || {
        if !trigger_enabled.get_untracked() {
            return;
        }
        let raw = raw_value.get_untracked();
        let res = handler
            .try_update_value(|h| module_for_clicks.with_value(|m| h.handle(m, &raw)));
        // Only unguarded detection faults come back as errors.
        if let Some(Err(e)) = res {
            wasm_bindgen::throw_str(&describe_error(&e));
        }
    };

    view! {
        <main class="demo">
            <h1>"Anomaly detection"</h1>

            <section class="row">
                <span class="label">{PageElement::Status.label()}</span>
                <span id=PageElement::Status.id() class=move || status.get().class()>
                    {move || status.get().text}
                </span>
            </section>

            <section class="row">
                <label class="label">
                    {PageElement::Input.label()}
                </label>
                <input
                    id=PageElement::Input.id()
                    type="text"
                    inputmode="decimal"
                    prop:value=move || raw_value.get()
                    on:input=move |ev| set_raw_value.set(event_target_value(&ev))
                />
                <button
                    id=PageElement::Trigger.id()
                    prop:disabled=move || !trigger_enabled.get()
                    on:click=move |_| on_run()
                >
                    {PageElement::Trigger.label()}
                </button>
            </section>

            <section class="row">
                <span class="label">{PageElement::Output.label()}</span>
                <span id=PageElement::Output.id() class=move || result.get().class()>
                    {move || result.get().text}
                </span>
            </section>
        </main>
    }
}

use anomaly_demo::error::ModuleFault;
use anomaly_demo::view::{Badge, Rendered, ResultView, StatusView};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(super) struct SignalStatusView {
    pub(super) status: WriteSignal<Badge>,
    pub(super) trigger_enabled: WriteSignal<bool>,
}

impl StatusView for SignalStatusView {
    fn show_status(&mut self, badge: &Badge) {
        self.status.set(badge.clone());
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled.set(enabled);
    }
}

#[derive(Clone, Copy)]
pub(super) struct SignalResultView {
    pub(super) result: WriteSignal<Rendered>,
}

impl ResultView for SignalResultView {
    fn show_result(&mut self, rendered: &Rendered) {
        self.result.set(rendered.clone());
    }

    fn report_fault(&mut self, fault: &ModuleFault) {
        web_sys::console::error_1(&format!("detection call failed: {fault}").into());
    }
}

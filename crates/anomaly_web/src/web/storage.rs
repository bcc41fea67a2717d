use anomaly_demo::config::DemoConfig;

use crate::ui_model::{parse_stored_config, LOCALSTORAGE_CONFIG_KEY};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn local_storage_get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

/// Stored config if present and valid, defaults otherwise.
pub(super) fn load_config() -> DemoConfig {
    let raw = local_storage_get_string(LOCALSTORAGE_CONFIG_KEY);
    match parse_stored_config(raw.as_deref()) {
        Ok(Some(cfg)) => cfg,
        Ok(None) => DemoConfig::default(),
        Err(e) => {
            web_sys::console::warn_1(&format!("ignoring stored config: {e}").into());
            DemoConfig::default()
        }
    }
}

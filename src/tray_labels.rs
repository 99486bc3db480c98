use serde_json::{Map, Value};
use tauri::{menu::CheckMenuItem, AppHandle, Manager};

use crate::{
    preference_store::{PreferenceStore, LAUNCH_ON_STARTUP, MINIMIZE_TO_TRAY, START_MINIMIZED},
    TrayMenuState,
};

fn set_checked_safe<F>(item: &CheckMenuItem<tauri::Wry>, checked: bool, item_name: &str, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = item.set_checked(checked) {
        log(&format!(
            "failed to update tray check state for {}: {}",
            item_name, error
        ));
    }
}

fn is_checked(preferences: &Map<String, Value>, key: &str) -> bool {
    preferences
        .get(key)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Mirrors the stored tray preferences onto the tray check items.
pub fn sync_tray_preference_checks<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(tray_state) = app_handle.try_state::<TrayMenuState>() else {
        return;
    };
    let Some(store) = app_handle.try_state::<PreferenceStore>() else {
        return;
    };
    let preferences = store.tray_preferences();

    for (item, key) in [
        (&tray_state.start_minimized_item, START_MINIMIZED),
        (&tray_state.minimize_to_tray_item, MINIMIZE_TO_TRAY),
        (&tray_state.launch_on_startup_item, LAUNCH_ON_STARTUP),
    ] {
        set_checked_safe(item, is_checked(&preferences, key), key, &log);
    }
}

use serde::Serialize;
use serde_json::Value;
use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_shutdown_log, append_update_log, autostart, exit_events,
    preference_store::{PreferenceStore, LAUNCH_ON_STARTUP, TRAY_PREFERENCE_KEYS},
    surface_dispatch, tray_actions, tray_labels, update_channel, window_actions,
    TRAY_PREFERENCE_CHANGED_EVENT,
};

#[derive(Debug, Clone, Serialize)]
struct TrayPreferenceChanged<'a> {
    key: &'a str,
    value: bool,
}

pub(crate) fn is_tray_preference_key(key: &str) -> bool {
    TRAY_PREFERENCE_KEYS.contains(&key)
}

/// Persists one tray preference and propagates it to autostart, the tray check
/// items and the open surfaces. Returns false for keys outside the tray set.
pub fn apply_tray_preference<F>(app_handle: &AppHandle, key: &str, value: bool, log: F) -> bool
where
    F: Fn(&str),
{
    if !is_tray_preference_key(key) {
        log(&format!("rejected unknown tray preference '{key}'"));
        return false;
    }
    let Some(store) = app_handle.try_state::<PreferenceStore>() else {
        log("preference store is not ready");
        return false;
    };
    if !store.set(key, Value::Bool(value)) {
        return false;
    }

    if key == LAUNCH_ON_STARTUP {
        autostart::apply_launch_on_startup(app_handle, value, &log);
    }
    tray_labels::sync_tray_preference_checks(app_handle, &log);
    surface_dispatch::emit_to_main_surfaces(
        app_handle,
        TRAY_PREFERENCE_CHANGED_EVENT,
        TrayPreferenceChanged { key, value },
        &log,
    );
    log(&format!("tray preference {key} set to {value}"));
    true
}

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match tray_actions::action_from_menu_id(menu_id) {
        Some(tray_actions::TrayMenuAction::Open) => {
            window_actions::restore_main_window(app_handle, append_desktop_log)
        }
        Some(tray_actions::TrayMenuAction::TogglePreference(key)) => {
            let current = app_handle
                .try_state::<PreferenceStore>()
                .map(|store| store.get_bool(key))
                .unwrap_or(false);
            apply_tray_preference(app_handle, key, !current, append_desktop_log);
        }
        Some(tray_actions::TrayMenuAction::CheckForUpdates) => {
            append_update_log("tray requested update check");
            let app_handle_cloned = app_handle.clone();
            tauri::async_runtime::spawn(async move {
                let result = update_channel::check_now(&app_handle_cloned).await;
                if let Some(error) = result.error {
                    append_update_log(&format!("tray update check failed: {error}"));
                }
            });
        }
        Some(tray_actions::TrayMenuAction::Quit) => {
            append_shutdown_log("tray quit requested");
            exit_events::quit_app(app_handle, "tray quit", append_shutdown_log);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_three_tray_keys_are_tray_preferences() {
        assert!(is_tray_preference_key("startMinimized"));
        assert!(is_tray_preference_key("minimizeToTray"));
        assert!(is_tray_preference_key("launchOnStartup"));
        assert!(!is_tray_preference_key("fpsLimit"));
        assert!(!is_tray_preference_key("hasShownTrayNotification"));
    }

    #[test]
    fn tray_preference_payload_serializes_key_and_value() {
        let payload = serde_json::to_value(TrayPreferenceChanged {
            key: "minimizeToTray",
            value: false,
        })
        .expect("serialize payload");
        assert_eq!(payload, serde_json::json!({ "key": "minimizeToTray", "value": false }));
    }
}

use serde_json::Value;
use tauri::{AppHandle, Manager};
use tauri_plugin_notification::NotificationExt;

use crate::{
    lifecycle::{self, CloseDecision},
    preference_store::{PreferenceStore, HAS_SHOWN_TRAY_NOTIFICATION},
    APP_NAME,
};

pub fn show_notification<F>(app_handle: &AppHandle, title: &str, body: &str, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = app_handle
        .notification()
        .builder()
        .title(title)
        .body(body)
        .show()
    {
        log(&format!("failed to show notification '{title}': {error}"));
    }
}

/// Raises the "still running in the tray" notice the first time the window is
/// hidden instead of closed.
pub fn show_tray_notice_once<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(store) = app_handle.try_state::<PreferenceStore>() else {
        return;
    };
    let already_shown = store.get_bool(HAS_SHOWN_TRAY_NOTIFICATION);
    if !lifecycle::should_show_tray_notice(CloseDecision::HideToTray, already_shown) {
        return;
    }

    show_notification(
        app_handle,
        &format!("{APP_NAME} is still running"),
        "Gangio has been minimized to the system tray. Click the tray icon to restore.",
        &log,
    );
    store.set(HAS_SHOWN_TRAY_NOTIFICATION, Value::Bool(true));
}

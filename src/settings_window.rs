use tauri::{AppHandle, Manager};

use crate::{webview_setup, SETTINGS_PAGE, SETTINGS_WINDOW_LABEL, SETTINGS_WINDOW_SIZE};

/// Opens the settings window, or focuses it when it is already open.
pub fn build_settings<F>(app_handle: &AppHandle, log: F) -> Result<(), String>
where
    F: Fn(&str),
{
    if let Some(existing) = app_handle.get_webview_window(SETTINGS_WINDOW_LABEL) {
        if let Err(error) = existing.show() {
            log(&format!("failed to show settings window: {error}"));
        }
        if let Err(error) = existing.set_focus() {
            log(&format!("failed to focus settings window: {error}"));
        }
        return Ok(());
    }

    webview_setup::shell_window_builder(
        app_handle,
        SETTINGS_WINDOW_LABEL,
        SETTINGS_PAGE,
        SETTINGS_WINDOW_SIZE,
    )?
    .focused(true)
    .build()
    .map(|_| ())
    .map_err(|error| format!("Failed to create settings window: {error}"))
}

pub fn close_settings<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(settings) = app_handle.get_webview_window(SETTINGS_WINDOW_LABEL) else {
        return;
    };
    if let Err(error) = settings.close() {
        log(&format!("failed to close settings window: {error}"));
    }
}

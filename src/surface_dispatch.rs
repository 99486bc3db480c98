use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager};

use crate::{CHROME_WEBVIEW_LABEL, CONTENT_WEBVIEW_LABEL};

pub fn is_surface_alive(app_handle: &AppHandle, label: &str) -> bool {
    app_handle.get_webview(label).is_some()
}

/// Sends an event to one surface if it still exists. Returns whether the event
/// was handed to the surface.
pub fn emit_to_surface<S, F>(
    app_handle: &AppHandle,
    label: &str,
    event: &str,
    payload: S,
    log: F,
) -> bool
where
    S: Serialize + Clone,
    F: Fn(&str),
{
    if !is_surface_alive(app_handle, label) {
        return false;
    }

    match app_handle.emit_to(label, event, payload) {
        Ok(()) => true,
        Err(error) => {
            log(&format!("failed to emit {event} to {label}: {error}"));
            false
        }
    }
}

pub fn emit_to_main_surfaces<S, F>(app_handle: &AppHandle, event: &str, payload: S, log: F)
where
    S: Serialize + Clone,
    F: Fn(&str),
{
    for label in [CHROME_WEBVIEW_LABEL, CONTENT_WEBVIEW_LABEL] {
        emit_to_surface(app_handle, label, event, payload.clone(), &log);
    }
}

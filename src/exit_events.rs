use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{
    append_shutdown_log,
    lifecycle::{LifecycleEvent, LifecycleState},
    ShellState, TRAY_ID,
};

fn enter_closing<F>(state: &ShellState, log: F)
where
    F: Fn(&str),
{
    state.mark_quitting();
    state.cancel_fade();
    if state.lifecycle_state() != LifecycleState::Closing {
        state.apply_lifecycle(LifecycleEvent::QuitRequested, &log);
    }
}

fn release_surfaces<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if app_handle.remove_tray_by_id(TRAY_ID).is_some() {
        log("tray icon removed");
    }
    for (label, window) in app_handle.windows() {
        if let Err(error) = window.destroy() {
            log(&format!("failed to release window {label}: {error}"));
        }
    }
}

pub fn quit_app<F>(app_handle: &AppHandle, reason: &str, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    log(&format!("{reason}, exiting desktop process"));
    enter_closing(&state, &log);
    release_surfaces(app_handle, &log);
    app_handle.exit(0);
}

/// Leaves the process ready for the updater to relaunch it.
pub fn prepare_for_restart<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    enter_closing(&state, &log);
    if app_handle.remove_tray_by_id(TRAY_ID).is_some() {
        log("tray icon removed before restart");
    }
}

/// Windows closing on their own (splash hand-off, hidden main window) must not
/// end the process; only explicit exits do.
pub fn handle_exit_requested(app_handle: &AppHandle, code: Option<i32>, api: &ExitRequestApi) {
    let state = app_handle.state::<ShellState>();
    if code.is_none() && !state.is_quitting() {
        api.prevent_exit();
        return;
    }
    enter_closing(&state, append_shutdown_log);
}

pub fn handle_exit_event(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    enter_closing(&state, append_shutdown_log);
    if app_handle.remove_tray_by_id(TRAY_ID).is_some() {
        append_shutdown_log("tray icon removed");
    }
    append_shutdown_log(&format!(
        "desktop process exit after {:?}",
        state.lifecycle_history()
    ));
}

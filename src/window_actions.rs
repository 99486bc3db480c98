use tauri::{AppHandle, Manager};

use crate::{
    exit_events,
    lifecycle::{decide_close, CloseDecision, LifecycleEvent, LifecycleState},
    main_window, notifications,
    preference_store::{PreferenceStore, MINIMIZE_TO_TRAY},
    surface_dispatch, ShellState, CHROME_WEBVIEW_LABEL, MAXIMIZED_STATE_EVENT,
};

/// Brings the main window back from the tray (or to the front). Ignored while
/// startup has not revealed the window yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RestoreDecision {
    ShowFromTray,
    Refocus,
    Skip,
}

/// Tray clicks, a second launch and the macOS dock all land here.
pub(crate) fn restore_decision(state: LifecycleState) -> RestoreDecision {
    match state {
        LifecycleState::HiddenToTray => RestoreDecision::ShowFromTray,
        LifecycleState::Visible => RestoreDecision::Refocus,
        _ => RestoreDecision::Skip,
    }
}

pub fn restore_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    let current = state.lifecycle_state();
    match restore_decision(current) {
        RestoreDecision::ShowFromTray => {
            state.apply_lifecycle(LifecycleEvent::Restored, &log);
        }
        RestoreDecision::Refocus => {}
        RestoreDecision::Skip => {
            log(&format!("restore_main_window skipped in state {current:?}"));
            return;
        }
    }

    main_window::set_surface_opacity(app_handle, 1.0);
    main_window::show_main_window(app_handle, &log);
}

pub fn hide_main_window_to_tray<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    state.cancel_fade();
    main_window::set_surface_opacity(app_handle, 1.0);
    main_window::hide_main_window(app_handle, &log);

    if state.lifecycle_state() == LifecycleState::Visible {
        state.apply_lifecycle(LifecycleEvent::HiddenToTray, &log);
    }
    notifications::show_tray_notice_once(app_handle, &log);
}

/// Resolves a close request on the main window: hide to tray, or quit.
pub fn request_main_close<F>(app_handle: &AppHandle, log: F) -> CloseDecision
where
    F: Fn(&str),
{
    let state = app_handle.state::<ShellState>();
    let minimize_to_tray = app_handle
        .try_state::<PreferenceStore>()
        .map(|store| store.get_bool(MINIMIZE_TO_TRAY))
        .unwrap_or(true);

    let decision = decide_close(state.is_quitting(), minimize_to_tray);
    match decision {
        CloseDecision::HideToTray => hide_main_window_to_tray(app_handle, &log),
        CloseDecision::ProceedWithClose => {
            if !state.is_quitting() {
                exit_events::quit_app(app_handle, "main window closed", &log);
            }
        }
    }
    decision
}

/// Tells the title bar about maximize changes; unchanged states are not sent.
pub fn sync_maximized_state<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let maximized = main_window::is_main_window_maximized(app_handle);
    let Some(changed) = app_handle
        .state::<ShellState>()
        .observe_maximized(maximized)
    else {
        return;
    };
    surface_dispatch::emit_to_surface(
        app_handle,
        CHROME_WEBVIEW_LABEL,
        MAXIMIZED_STATE_EVENT,
        changed,
        &log,
    );
}

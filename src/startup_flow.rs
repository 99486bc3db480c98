//! Drives startup from splash to the revealed main window.

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::{
    append_startup_log, current_log_path, fade_task,
    lifecycle::{LifecycleEvent, LifecycleState},
    main_window,
    preference_store::{PreferenceStore, START_MINIMIZED},
    splash_window, ui_dispatch, ShellState, APP_NAME, CONTENT_SETTLE_DELAY,
    MAIN_WINDOW_LABEL, SPLASH_HANDSHAKE_TIMEOUT,
};

fn show_startup_error(app_handle: &AppHandle, message: &str) {
    append_startup_log(&format!("startup failed: {message}"));
    let exit_app = app_handle.clone();
    app_handle
        .dialog()
        .message(format!(
            "{APP_NAME} could not open its main window.\n\n{message}\n\nLog file: {}",
            current_log_path().display()
        ))
        .title(format!("{APP_NAME} failed to start"))
        .kind(MessageDialogKind::Error)
        .show(move |_| exit_app.exit(1));
}

pub fn start(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    match splash_window::build_splash(app_handle, append_startup_log) {
        Ok(_) => {
            state.apply_lifecycle(LifecycleEvent::SplashShown, append_startup_log);
            spawn_splash_watchdog(app_handle);
        }
        Err(error) => {
            append_startup_log(&format!("{error}; continuing without splash"));
            if state
                .apply_lifecycle(LifecycleEvent::SplashFailed, append_startup_log)
                .is_some()
            {
                open_main_window(app_handle);
            }
        }
    }
}

/// Splash handshake: the splash page reports it is interactive.
pub fn on_splash_ready(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    if state
        .apply_lifecycle(LifecycleEvent::SplashReady, append_startup_log)
        .is_some()
    {
        open_main_window(app_handle);
    }
}

/// The splash went away before handing off (closed, crashed or never loaded).
/// Runs from a window event, so the main window is built off the event loop.
pub fn on_splash_destroyed(app_handle: &AppHandle) {
    let fallback_app = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        let state = fallback_app.state::<ShellState>();
        if state.skip_splash(append_startup_log) {
            append_startup_log("splash closed before hand-off; creating main window directly");
            open_main_window(&fallback_app);
        }
    });
}

fn spawn_splash_watchdog(app_handle: &AppHandle) {
    let watchdog_app = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(SPLASH_HANDSHAKE_TIMEOUT).await;
        let state = watchdog_app.state::<ShellState>();
        if state.skip_splash(append_startup_log) {
            append_startup_log(&format!(
                "splash did not report ready within {}s; creating main window directly",
                SPLASH_HANDSHAKE_TIMEOUT.as_secs()
            ));
            open_main_window(&watchdog_app);
        }
    });
}

fn open_main_window(app_handle: &AppHandle) {
    let state = app_handle.state::<ShellState>();
    loop {
        match main_window::build_main(app_handle, append_startup_log) {
            Ok(_) => return,
            Err(error) => {
                append_startup_log(&error);
                if !state.record_main_build_failure() {
                    show_startup_error(app_handle, &error);
                    return;
                }
                append_startup_log("retrying main window construction once");
                if let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) {
                    let _ = window.destroy();
                }
            }
        }
    }
}

pub fn on_content_loaded(app_handle: &AppHandle, url: &str) {
    let state = app_handle.state::<ShellState>();
    if state.lifecycle_state() != LifecycleState::ContentLoading {
        return;
    }
    if state
        .apply_lifecycle(LifecycleEvent::ContentLoaded, append_startup_log)
        .is_none()
    {
        return;
    }
    append_startup_log(&format!("content surface finished loading {url}"));

    let settle_app = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(CONTENT_SETTLE_DELAY).await;
        if let Err(error) = ui_dispatch::run_on_main_thread_dispatch(
            &settle_app,
            "reveal main window",
            finish_startup,
        ) {
            append_startup_log(&error);
        }
    });
}

fn finish_startup(app_handle: &AppHandle) {
    splash_window::close_splash(app_handle, append_startup_log);

    let start_minimized = app_handle
        .try_state::<PreferenceStore>()
        .map(|store| store.get_bool(START_MINIMIZED))
        .unwrap_or(false);
    let state = app_handle.state::<ShellState>();
    match state.apply_lifecycle(
        LifecycleEvent::Revealed { start_minimized },
        append_startup_log,
    ) {
        Some(LifecycleState::Visible) => reveal_with_fade(app_handle),
        Some(_) => {
            main_window::set_surface_opacity(app_handle, 1.0);
            append_startup_log("starting minimized to tray");
        }
        None => {}
    }
}

fn reveal_with_fade(app_handle: &AppHandle) {
    let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) else {
        append_startup_log("reveal skipped: main window not found");
        return;
    };

    main_window::set_surface_opacity(app_handle, 0.0);
    if let Err(error) = window.show() {
        append_startup_log(&format!("failed to show main window: {error}"));
    }

    let cancel = app_handle.state::<ShellState>().start_fade();
    let fade_app = app_handle.clone();
    fade_task::spawn_fade_in(
        cancel,
        move |opacity| main_window::set_surface_opacity(&fade_app, opacity),
        move || {
            if let Err(error) = window.set_focus() {
                append_startup_log(&format!("failed to focus main window: {error}"));
            }
        },
    );
}

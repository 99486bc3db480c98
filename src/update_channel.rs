//! Bridges the updater plugin to the shell surfaces, notifications and the
//! tray.

use std::time::Instant;

use serde::Serialize;
use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::{
    append_update_log, exit_events, notifications, runtime_paths, splash_window,
    surface_dispatch,
    update_tracker::{DownloadProgress, UpdateCheckResult},
    AtomicFlagGuard, PendingUpdate, TrayMenuState, UpdateState, APP_NAME,
    CHECKING_FOR_UPDATE_EVENT, SPLASH_UPDATE_PROGRESS_EVENT, SPLASH_UPDATE_STATUS_EVENT,
    SPLASH_WINDOW_LABEL, UPDATE_AVAILABLE_EVENT, UPDATE_CHECK_INTERVAL,
    UPDATE_CHECK_RESULT_EVENT, UPDATE_DOWNLOADED_EVENT, UPDATE_ERROR_EVENT,
    UPDATE_NOT_AVAILABLE_EVENT,
};

#[derive(Debug, Clone, Serialize)]
struct UpdateInfo {
    version: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct DevModeCheckResult {
    in_dev_mode: bool,
    message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct SplashStatus {
    message: String,
    version: String,
}

#[derive(Debug, Clone, Serialize)]
struct SplashProgress {
    percent: f64,
}

#[derive(Debug, Clone, Serialize)]
struct UpdateError {
    message: String,
}

fn set_check_item_enabled(app_handle: &AppHandle, enabled: bool) {
    let Some(tray_state) = app_handle.try_state::<TrayMenuState>() else {
        return;
    };
    if let Err(error) = tray_state.check_updates_item.set_enabled(enabled) {
        append_update_log(&format!("failed to toggle tray update item: {error}"));
    }
}

fn report_error(app_handle: &AppHandle, message: String) -> String {
    append_update_log(&message);
    surface_dispatch::emit_to_main_surfaces(
        app_handle,
        UPDATE_ERROR_EVENT,
        UpdateError {
            message: message.clone(),
        },
        append_update_log,
    );
    message
}

fn sticky_update_available(app_handle: &AppHandle) -> bool {
    app_handle
        .state::<UpdateState>()
        .tracker
        .lock()
        .map(|tracker| tracker.update_available())
        .unwrap_or(false)
}

/// Runs one update check. Development builds never touch the network.
pub async fn check_now(app_handle: &AppHandle) -> UpdateCheckResult {
    if !runtime_paths::is_packaged_build() {
        append_update_log("skipping update check in development mode");
        surface_dispatch::emit_to_main_surfaces(
            app_handle,
            UPDATE_CHECK_RESULT_EVENT,
            DevModeCheckResult {
                in_dev_mode: true,
                message: "Update checking disabled in development mode",
            },
            append_update_log,
        );
        return UpdateCheckResult::dev_mode();
    }

    set_check_item_enabled(app_handle, false);
    let result = run_check(app_handle).await;
    set_check_item_enabled(app_handle, true);
    result
}

async fn run_check(app_handle: &AppHandle) -> UpdateCheckResult {
    let current_version = app_handle.package_info().version.to_string();
    surface_dispatch::emit_to_main_surfaces(
        app_handle,
        CHECKING_FOR_UPDATE_EVENT,
        (),
        append_update_log,
    );

    let updater = match app_handle.updater() {
        Ok(updater) => updater,
        Err(error) => {
            let message = report_error(
                app_handle,
                format!("Failed to initialize updater: {error}"),
            );
            return UpdateCheckResult::failed(message);
        }
    };

    let check_started = Instant::now();
    match updater.check().await {
        Ok(Some(update)) => {
            append_update_log(&format!(
                "update check finished: current_version={} latest_version={} elapsed_ms={}",
                current_version,
                update.version,
                check_started.elapsed().as_millis()
            ));
            announce_update(app_handle, &update.version);
            download_update(app_handle, update).await;
            UpdateCheckResult::checked(true)
        }
        Ok(None) => {
            append_update_log(&format!(
                "update check finished: no update for {} elapsed_ms={}",
                current_version,
                check_started.elapsed().as_millis()
            ));
            surface_dispatch::emit_to_main_surfaces(
                app_handle,
                UPDATE_NOT_AVAILABLE_EVENT,
                (),
                append_update_log,
            );
            UpdateCheckResult::checked(sticky_update_available(app_handle))
        }
        Err(error) => {
            let message = report_error(app_handle, format!("Failed to check for updates: {error}"));
            UpdateCheckResult::failed(message)
        }
    }
}

fn announce_update(app_handle: &AppHandle, version: &str) {
    let first_sighting = app_handle
        .state::<UpdateState>()
        .tracker
        .lock()
        .map(|mut tracker| tracker.should_announce(version))
        .unwrap_or(false);
    if !first_sighting {
        append_update_log(&format!("update {version} already announced"));
        return;
    }

    notifications::show_notification(
        app_handle,
        APP_NAME,
        &format!("A new version ({version}) is available. Downloading now..."),
        append_update_log,
    );
    surface_dispatch::emit_to_main_surfaces(
        app_handle,
        UPDATE_AVAILABLE_EVENT,
        UpdateInfo {
            version: version.to_string(),
        },
        append_update_log,
    );
    surface_dispatch::emit_to_surface(
        app_handle,
        SPLASH_WINDOW_LABEL,
        SPLASH_UPDATE_STATUS_EVENT,
        SplashStatus {
            message: format!("Update v{version} found, downloading..."),
            version: version.to_string(),
        },
        append_update_log,
    );
}

async fn download_update(app_handle: &AppHandle, update: Update) {
    let state = app_handle.state::<UpdateState>();
    let version = update.version.clone();

    let Some(_download_guard) = AtomicFlagGuard::try_set(&state.is_downloading) else {
        append_update_log("update download already in progress");
        return;
    };
    let already_downloaded = state
        .tracker
        .lock()
        .map(|tracker| tracker.is_downloaded(&version))
        .unwrap_or(false);
    if already_downloaded {
        append_update_log(&format!("update {version} already downloaded"));
        return;
    }

    let mut progress = DownloadProgress::default();
    let download = update
        .download(
            |chunk_len, content_length| {
                let Some(percent) = progress.record(chunk_len, content_length) else {
                    return;
                };
                if splash_window::is_splash_alive(app_handle) {
                    surface_dispatch::emit_to_surface(
                        app_handle,
                        SPLASH_WINDOW_LABEL,
                        SPLASH_UPDATE_PROGRESS_EVENT,
                        SplashProgress { percent },
                        append_update_log,
                    );
                }
            },
            || append_update_log(&format!("update {version} download finished")),
        )
        .await;

    let bytes = match download {
        Ok(bytes) => bytes,
        Err(error) => {
            report_error(app_handle, format!("Failed to download update {version}: {error}"));
            return;
        }
    };

    append_update_log(&format!(
        "update {version} received {} bytes",
        progress.downloaded()
    ));
    if let Ok(mut tracker) = state.tracker.lock() {
        tracker.mark_downloaded(&version);
    }
    if let Ok(mut pending) = state.pending.lock() {
        *pending = Some(PendingUpdate { update, bytes });
    }
    drop(_download_guard);

    on_update_downloaded(app_handle, &version);
}

fn on_update_downloaded(app_handle: &AppHandle, version: &str) {
    append_update_log(&format!("update {version} downloaded and pending"));
    surface_dispatch::emit_to_main_surfaces(
        app_handle,
        UPDATE_DOWNLOADED_EVENT,
        UpdateInfo {
            version: version.to_string(),
        },
        append_update_log,
    );

    let should_install = app_handle
        .dialog()
        .message(format!(
            "Version {version} has been downloaded and is ready to install.\nRestart and install now?"
        ))
        .title(APP_NAME)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::YesNo)
        .blocking_show();
    if should_install {
        install_pending(app_handle);
    } else {
        append_update_log("user postponed update installation");
    }
}

/// Installs the downloaded update, if any, and relaunches the process either
/// way.
pub fn install_pending(app_handle: &AppHandle) {
    let pending = app_handle
        .state::<UpdateState>()
        .pending
        .lock()
        .ok()
        .and_then(|mut pending| pending.take());

    match pending {
        Some(PendingUpdate { update, bytes }) => match update.install(&bytes) {
            Ok(()) => append_update_log(&format!("update {} installed", update.version)),
            Err(error) => append_update_log(&format!(
                "failed to install update {}: {error}",
                update.version
            )),
        },
        None => append_update_log("no downloaded update pending, restarting anyway"),
    }

    exit_events::prepare_for_restart(app_handle, append_update_log);
    app_handle.restart();
}

/// Checks immediately, then on a fixed interval for the life of the process.
pub fn spawn_update_schedule(app_handle: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let mut interval = tokio::time::interval(UPDATE_CHECK_INTERVAL);
        loop {
            interval.tick().await;
            let result = check_now(&app_handle).await;
            if result.is_dev {
                return;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_mode_result_uses_camel_case_fields() {
        let payload = serde_json::to_value(DevModeCheckResult {
            in_dev_mode: true,
            message: "Update checking disabled in development mode",
        })
        .expect("serialize payload");
        assert_eq!(payload["inDevMode"], serde_json::json!(true));
    }

    #[test]
    fn splash_payloads_match_splash_page_fields() {
        let status = serde_json::to_value(SplashStatus {
            message: "Update v1.3.0 found, downloading...".to_string(),
            version: "1.3.0".to_string(),
        })
        .expect("serialize status");
        assert_eq!(status["version"], "1.3.0");

        let progress = serde_json::to_value(SplashProgress { percent: 42.5 })
            .expect("serialize progress");
        assert_eq!(progress["percent"], 42.5);
    }
}

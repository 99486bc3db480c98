use serde_json::{Map, Value};
use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_startup_log, main_window, origin_policy,
    preference_store::{
        PreferenceStore, BACKGROUND_THROTTLING, FPS_LIMIT, HARDWARE_ACCELERATION, MEMORY_LIMIT,
        MIC_LEVEL, SELECTED_CAMERA, SELECTED_MICROPHONE,
    },
    settings_window, startup_flow, tray_menu_handler, update_channel,
    update_tracker::UpdateCheckResult,
    window_actions, BridgeResult, MAIN_WINDOW_LABEL,
};

fn save_preference(app_handle: &AppHandle, key: &str, value: Value) -> bool {
    let Some(store) = app_handle.try_state::<PreferenceStore>() else {
        append_desktop_log("preference store is not ready");
        return false;
    };
    let saved = store.set(key, value);
    if saved {
        append_desktop_log(&format!(
            "preference {key} saved; launch-time settings apply after restart"
        ));
    }
    saved
}

pub(crate) fn normalize_fps_value(fps: &Value) -> Option<Value> {
    match fps {
        Value::Number(number) => number.as_u64().map(|fps| Value::String(fps.to_string())),
        Value::String(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .map(|fps| Value::String(fps.to_string())),
        _ => None,
    }
}

pub(crate) fn normalize_mic_level(level: f64) -> Value {
    if !level.is_finite() {
        return Value::from(0_u64);
    }
    Value::from(level.round().clamp(0.0, 100.0) as u64)
}

#[tauri::command]
pub(crate) fn is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn minimize_window(app_handle: AppHandle) {
    if let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) {
        if let Err(error) = window.minimize() {
            append_desktop_log(&format!("failed to minimize main window: {error}"));
        }
    }
}

#[tauri::command]
pub(crate) fn maximize_window(app_handle: AppHandle) -> bool {
    let maximized = main_window::toggle_maximize(&app_handle, append_desktop_log).unwrap_or(false);
    window_actions::sync_maximized_state(&app_handle, append_desktop_log);
    maximized
}

#[tauri::command]
pub(crate) fn close_window(app_handle: AppHandle) {
    window_actions::request_main_close(&app_handle, append_desktop_log);
}

#[tauri::command]
pub(crate) fn is_window_maximized(app_handle: AppHandle) -> bool {
    main_window::is_main_window_maximized(&app_handle)
}

#[tauri::command]
pub(crate) async fn open_settings(app_handle: AppHandle) -> BridgeResult {
    match settings_window::build_settings(&app_handle, append_desktop_log) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => {
            append_desktop_log(&error);
            BridgeResult::failed(error)
        }
    }
}

#[tauri::command]
pub(crate) fn close_settings(app_handle: AppHandle) {
    settings_window::close_settings(&app_handle, append_desktop_log);
}

#[tauri::command]
pub(crate) fn get_app_version(app_handle: AppHandle) -> String {
    app_handle.package_info().version.to_string()
}

#[tauri::command]
pub(crate) async fn splash_screen_ready(app_handle: AppHandle) {
    append_startup_log("splash reported ready");
    startup_flow::on_splash_ready(&app_handle);
}

#[tauri::command]
pub(crate) async fn check_for_updates(app_handle: AppHandle) -> UpdateCheckResult {
    update_channel::check_now(&app_handle).await
}

#[tauri::command]
pub(crate) fn install_update(app_handle: AppHandle) {
    update_channel::install_pending(&app_handle);
}

#[tauri::command]
pub(crate) fn get_tray_preferences(app_handle: AppHandle) -> Map<String, Value> {
    app_handle
        .try_state::<PreferenceStore>()
        .map(|store| store.tray_preferences())
        .unwrap_or_default()
}

#[tauri::command]
pub(crate) fn set_tray_preference(app_handle: AppHandle, key: String, value: bool) -> bool {
    tray_menu_handler::apply_tray_preference(&app_handle, &key, value, append_desktop_log)
}

#[tauri::command]
pub(crate) fn get_settings(app_handle: AppHandle) -> Map<String, Value> {
    app_handle
        .try_state::<PreferenceStore>()
        .map(|store| store.device_settings())
        .unwrap_or_default()
}

#[tauri::command]
pub(crate) fn save_setting(app_handle: AppHandle, key: String, value: Value) -> bool {
    if tray_menu_handler::is_tray_preference_key(&key) {
        return match value.as_bool() {
            Some(value) => {
                tray_menu_handler::apply_tray_preference(&app_handle, &key, value, append_desktop_log)
            }
            None => {
                append_desktop_log(&format!("rejected non-boolean value for {key}"));
                false
            }
        };
    }
    save_preference(&app_handle, &key, value)
}

#[tauri::command]
pub(crate) fn set_fps_limit(app_handle: AppHandle, fps: Value) -> bool {
    match normalize_fps_value(&fps) {
        Some(fps) => save_preference(&app_handle, FPS_LIMIT, fps),
        None => {
            append_desktop_log(&format!("rejected fps limit {fps}"));
            false
        }
    }
}

#[tauri::command]
pub(crate) fn set_hardware_acceleration(app_handle: AppHandle, enabled: bool) -> bool {
    save_preference(&app_handle, HARDWARE_ACCELERATION, Value::Bool(enabled))
}

#[tauri::command]
pub(crate) fn set_background_throttling(app_handle: AppHandle, enabled: bool) -> bool {
    save_preference(&app_handle, BACKGROUND_THROTTLING, Value::Bool(enabled))
}

#[tauri::command]
pub(crate) fn set_memory_limit(app_handle: AppHandle, enabled: bool) -> bool {
    save_preference(&app_handle, MEMORY_LIMIT, Value::Bool(enabled))
}

#[tauri::command]
pub(crate) fn set_selected_microphone(app_handle: AppHandle, device_id: String) -> bool {
    save_preference(&app_handle, SELECTED_MICROPHONE, Value::String(device_id))
}

#[tauri::command]
pub(crate) fn set_selected_camera(app_handle: AppHandle, device_id: String) -> bool {
    save_preference(&app_handle, SELECTED_CAMERA, Value::String(device_id))
}

#[tauri::command]
pub(crate) fn set_mic_level(app_handle: AppHandle, level: f64) -> bool {
    save_preference(&app_handle, MIC_LEVEL, normalize_mic_level(level))
}

#[tauri::command]
pub(crate) fn open_external(url: String) -> BridgeResult {
    match origin_policy::open_external(&url) {
        Ok(()) => BridgeResult::ok(),
        Err(error) => {
            append_desktop_log(&format!("failed to open external link: {error}"));
            BridgeResult::failed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn fps_values_are_stored_as_strings() {
        assert_eq!(normalize_fps_value(&json!(60)), Some(json!("60")));
        assert_eq!(normalize_fps_value(&json!(" 144 ")), Some(json!("144")));
        assert_eq!(normalize_fps_value(&json!("fast")), None);
        assert_eq!(normalize_fps_value(&json!(true)), None);
    }

    #[test]
    fn mic_level_is_rounded_into_percent_range() {
        assert_eq!(normalize_mic_level(74.6), json!(75));
        assert_eq!(normalize_mic_level(-3.0), json!(0));
        assert_eq!(normalize_mic_level(180.0), json!(100));
        assert_eq!(normalize_mic_level(f64::NAN), json!(0));
    }
}

use tauri::AppHandle;
use tauri_plugin_autostart::ManagerExt;

pub fn apply_launch_on_startup<F>(app_handle: &AppHandle, enabled: bool, log: F)
where
    F: Fn(&str),
{
    let autostart_manager = app_handle.autolaunch();
    let result = if enabled {
        autostart_manager.enable()
    } else {
        autostart_manager.disable()
    };

    match result {
        Ok(()) => log(&format!(
            "launch on startup {}",
            if enabled { "enabled" } else { "disabled" }
        )),
        Err(error) => log(&format!("failed to update launch on startup: {error}")),
    }
}

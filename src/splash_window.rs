use tauri::{AppHandle, Manager, WebviewWindow};

use crate::{
    resource_locator::ResourceLocator, webview_setup, SPLASH_PAGE, SPLASH_WINDOW_LABEL,
    SPLASH_WINDOW_SIZE,
};

pub fn build_splash<F>(app_handle: &AppHandle, log: F) -> Result<WebviewWindow, String>
where
    F: Fn(&str),
{
    if let Some(locator) = app_handle.try_state::<ResourceLocator>() {
        let located = locator.locate(SPLASH_PAGE);
        if !located.found {
            return Err(format!(
                "splash page not found (best guess {})",
                located.path.display()
            ));
        }
        log(&format!("loading splash from {}", located.path.display()));
    }

    webview_setup::shell_window_builder(
        app_handle,
        SPLASH_WINDOW_LABEL,
        SPLASH_PAGE,
        SPLASH_WINDOW_SIZE,
    )?
    .always_on_top(true)
    .skip_taskbar(true)
    .build()
    .map_err(|error| format!("Failed to create splash window: {error}"))
}

pub fn is_splash_alive(app_handle: &AppHandle) -> bool {
    app_handle.get_webview_window(SPLASH_WINDOW_LABEL).is_some()
}

pub fn close_splash<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(splash) = app_handle.get_webview_window(SPLASH_WINDOW_LABEL) else {
        return;
    };
    if let Err(error) = splash.destroy() {
        log(&format!("failed to close splash window: {error}"));
    }
}

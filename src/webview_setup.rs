use tauri::{webview::WebviewBuilder, AppHandle, Manager, Url, WebviewUrl, WebviewWindowBuilder};

use crate::{
    append_desktop_log,
    browser_args::{self, LaunchBrowserArgs},
    desktop_bridge::{DESKTOP_BRIDGE_SCRIPT, NO_SPELLCHECK_SCRIPT},
    origin_policy::{self, NavigationDecision},
    preference_store::{default_preferences, PreferenceStore},
};

pub fn launch_browser_args(app_handle: &AppHandle) -> String {
    if let Some(args) = app_handle.try_state::<LaunchBrowserArgs>() {
        return args.0.clone();
    }
    let preferences = app_handle
        .try_state::<PreferenceStore>()
        .map(|store| store.snapshot())
        .unwrap_or_else(default_preferences);
    browser_args::browser_args(&preferences)
}

pub fn guard_shell_navigation(url: &Url) -> bool {
    match origin_policy::shell_navigation_decision(url) {
        NavigationDecision::Allow => true,
        NavigationDecision::OpenExternally => {
            append_desktop_log(&format!("opening shell link externally: {url}"));
            if let Err(error) = origin_policy::open_external(url.as_str()) {
                append_desktop_log(&format!("failed to open external link: {error}"));
            }
            false
        }
        NavigationDecision::Block => {
            append_desktop_log(&format!("blocked shell navigation to {url}"));
            false
        }
    }
}

pub fn shell_page(page: &str) -> Result<WebviewUrl, String> {
    origin_policy::shell_page_url(page).map(WebviewUrl::External)
}

/// Child webview serving a local shell page with the desktop bridge.
pub fn shell_webview_builder(
    label: &str,
    page: &str,
    browser_args: &str,
) -> Result<WebviewBuilder<tauri::Wry>, String> {
    Ok(WebviewBuilder::new(label, shell_page(page)?)
        .initialization_script(DESKTOP_BRIDGE_SCRIPT)
        .initialization_script(NO_SPELLCHECK_SCRIPT)
        .additional_browser_args(browser_args)
        .on_navigation(guard_shell_navigation))
}

/// Standalone frameless window serving a local shell page.
pub fn shell_window_builder<'a>(
    app_handle: &'a AppHandle,
    label: &str,
    page: &str,
    size: (f64, f64),
) -> Result<WebviewWindowBuilder<'a, tauri::Wry, AppHandle>, String> {
    Ok(WebviewWindowBuilder::new(app_handle, label, shell_page(page)?)
        .title(crate::APP_NAME)
        .inner_size(size.0, size.1)
        .decorations(false)
        .resizable(false)
        .center()
        .initialization_script(DESKTOP_BRIDGE_SCRIPT)
        .initialization_script(NO_SPELLCHECK_SCRIPT)
        .additional_browser_args(&launch_browser_args(app_handle))
        .on_navigation(guard_shell_navigation))
}

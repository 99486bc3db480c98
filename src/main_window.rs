use tauri::{
    window::WindowBuilder, AppHandle, LogicalPosition, LogicalSize, Manager, Url, Webview,
    WebviewUrl, Window,
};

use crate::{
    desktop_bridge::{DESKTOP_BRIDGE_SCRIPT, EXTERNAL_LINKS_SCRIPT, NO_SPELLCHECK_SCRIPT},
    surface_layout::{compute_surface_layout, SurfaceRect},
    webview_setup, ShellState, APP_NAME, CHROME_WEBVIEW_LABEL, CONTENT_WEBVIEW_LABEL, ERROR_PAGE,
    MAIN_WINDOW_LABEL, MAIN_WINDOW_MIN_SIZE, MAIN_WINDOW_SIZE, TITLEBAR_PAGE,
};

fn position(rect: SurfaceRect) -> LogicalPosition<f64> {
    LogicalPosition::new(rect.x, rect.y)
}

fn size(rect: SurfaceRect) -> LogicalSize<f64> {
    LogicalSize::new(rect.width, rect.height)
}

fn add_content_surface<F>(
    window: &Window,
    app_url: &str,
    browser_args: &str,
    rect: SurfaceRect,
    log: F,
) -> Result<Webview, String>
where
    F: Fn(&str),
{
    let remote = Url::parse(app_url)
        .map_err(|error| format!("Invalid app URL {app_url}: {error}"))
        .map(WebviewUrl::External);

    let content = remote.and_then(|url| {
        let builder = tauri::webview::WebviewBuilder::new(CONTENT_WEBVIEW_LABEL, url)
            .initialization_script(DESKTOP_BRIDGE_SCRIPT)
            .initialization_script(EXTERNAL_LINKS_SCRIPT)
            .initialization_script(NO_SPELLCHECK_SCRIPT)
            .additional_browser_args(browser_args);
        window
            .add_child(builder, position(rect), size(rect))
            .map_err(|error| format!("Failed to create content surface: {error}"))
    });

    match content {
        Ok(webview) => Ok(webview),
        Err(error) => {
            log(&format!("{error}; loading local error page instead"));
            let builder = webview_setup::shell_webview_builder(
                CONTENT_WEBVIEW_LABEL,
                ERROR_PAGE,
                browser_args,
            )?;
            window
                .add_child(builder, position(rect), size(rect))
                .map_err(|error| format!("Failed to create error surface: {error}"))
        }
    }
}

/// Builds the hidden host window with its title bar and content surfaces.
pub fn build_main<F>(app_handle: &AppHandle, log: F) -> Result<Window, String>
where
    F: Fn(&str),
{
    if let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) {
        return Ok(window);
    }

    let (width, height) = MAIN_WINDOW_SIZE;
    let (min_width, min_height) = MAIN_WINDOW_MIN_SIZE;
    let window = WindowBuilder::new(app_handle, MAIN_WINDOW_LABEL)
        .title(APP_NAME)
        .inner_size(width, height)
        .min_inner_size(min_width, min_height)
        .decorations(false)
        .visible(false)
        .center()
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;

    let browser_args = webview_setup::launch_browser_args(app_handle);
    let layout = compute_surface_layout(width, height);

    let chrome =
        webview_setup::shell_webview_builder(CHROME_WEBVIEW_LABEL, TITLEBAR_PAGE, &browser_args)?;
    if let Err(error) = window.add_child(chrome, position(layout.chrome), size(layout.chrome)) {
        log(&format!("failed to create title bar surface: {error}"));
    }

    let app_url = app_handle.state::<ShellState>().app_url.clone();
    add_content_surface(&window, &app_url, &browser_args, layout.content, &log)?;
    log(&format!("main window created, loading {app_url}"));

    apply_surface_layout(&window, &log);
    Ok(window)
}

/// Recomputes title bar and content bounds from the host's current size.
pub fn apply_surface_layout<F>(window: &Window, log: F)
where
    F: Fn(&str),
{
    let inner_size = match window.inner_size() {
        Ok(size) => size,
        Err(error) => {
            log(&format!("failed to read main window size: {error}"));
            return;
        }
    };
    let scale_factor = window.scale_factor().unwrap_or(1.0);
    let logical = inner_size.to_logical::<f64>(scale_factor);
    let layout = compute_surface_layout(logical.width, logical.height);

    let app_handle = window.app_handle();
    for (label, rect) in [
        (CHROME_WEBVIEW_LABEL, layout.chrome),
        (CONTENT_WEBVIEW_LABEL, layout.content),
    ] {
        let Some(webview) = app_handle.get_webview(label) else {
            continue;
        };
        if let Err(error) = webview.set_position(position(rect)) {
            log(&format!("failed to position {label}: {error}"));
        }
        if let Err(error) = webview.set_size(size(rect)) {
            log(&format!("failed to resize {label}: {error}"));
        }
    }
}

pub fn set_surface_opacity(app_handle: &AppHandle, opacity: f64) {
    let script = crate::fade_task::opacity_script(opacity);
    for label in [CHROME_WEBVIEW_LABEL, CONTENT_WEBVIEW_LABEL] {
        if let Some(webview) = app_handle.get_webview(label) {
            let _ = webview.eval(&script);
        }
    }
}

pub fn show_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) else {
        log("show_main_window skipped: main window not found");
        return;
    };
    if let Err(error) = window.unminimize() {
        log(&format!("failed to unminimize main window: {error}"));
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

pub fn hide_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) else {
        log("hide_main_window skipped: main window not found");
        return;
    };
    if let Err(error) = window.hide() {
        log(&format!("failed to hide main window: {error}"));
    }
}

pub fn toggle_maximize<F>(app_handle: &AppHandle, log: F) -> Option<bool>
where
    F: Fn(&str),
{
    let window = app_handle.get_window(MAIN_WINDOW_LABEL)?;
    let result = match window.is_maximized() {
        Ok(true) => window.unmaximize(),
        Ok(false) => window.maximize(),
        Err(error) => Err(error),
    };
    if let Err(error) = result {
        log(&format!("failed to toggle maximize state: {error}"));
    }
    window.is_maximized().ok()
}

pub fn is_main_window_maximized(app_handle: &AppHandle) -> bool {
    app_handle
        .get_window(MAIN_WINDOW_LABEL)
        .and_then(|window| window.is_maximized().ok())
        .unwrap_or(false)
}

use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};
use tauri_plugin_autostart::MacosLauncher;

use crate::{
    append_desktop_log, append_startup_log, browser_args, current_log_path,
    desktop_bridge_commands, exit_events, main_window, origin_policy,
    preference_store::PreferenceStore,
    resource_locator::ResourceLocator, runtime_paths, shell_protocol, startup_flow, tray_setup,
    update_channel, window_actions, ShellState, UpdateState, CONTENT_WEBVIEW_LABEL,
    MAIN_WINDOW_LABEL, SHELL_SCHEME, SPLASH_WINDOW_LABEL,
};

fn handle_main_window_event(window: &tauri::Window, event: &WindowEvent) {
    let app_handle = window.app_handle();
    match event {
        WindowEvent::CloseRequested { api, .. } => {
            let state = app_handle.state::<ShellState>();
            if state.is_quitting() {
                return;
            }

            api.prevent_close();
            window_actions::request_main_close(app_handle, append_desktop_log);
        }
        WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
            main_window::apply_surface_layout(window, append_desktop_log);
            window_actions::sync_maximized_state(app_handle, append_desktop_log);
        }
        WindowEvent::Destroyed => {
            app_handle.state::<ShellState>().forget_main_window();
        }
        _ => {}
    }
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!("desktop log path: {}", current_log_path().display()));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            append_desktop_log("second instance launched, restoring main window");
            window_actions::restore_main_window(app, append_desktop_log);
        }))
        .plugin(tauri_plugin_updater::Builder::new().build())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_autostart::init(
            MacosLauncher::LaunchAgent,
            None,
        ))
        .manage(ShellState::default())
        .manage(UpdateState::default())
        .register_uri_scheme_protocol(SHELL_SCHEME, shell_protocol::handle_shell_request)
        .invoke_handler(tauri::generate_handler![
            desktop_bridge_commands::is_desktop_runtime,
            desktop_bridge_commands::minimize_window,
            desktop_bridge_commands::maximize_window,
            desktop_bridge_commands::close_window,
            desktop_bridge_commands::is_window_maximized,
            desktop_bridge_commands::open_settings,
            desktop_bridge_commands::close_settings,
            desktop_bridge_commands::get_app_version,
            desktop_bridge_commands::splash_screen_ready,
            desktop_bridge_commands::check_for_updates,
            desktop_bridge_commands::install_update,
            desktop_bridge_commands::get_tray_preferences,
            desktop_bridge_commands::set_tray_preference,
            desktop_bridge_commands::get_settings,
            desktop_bridge_commands::save_setting,
            desktop_bridge_commands::set_fps_limit,
            desktop_bridge_commands::set_hardware_acceleration,
            desktop_bridge_commands::set_background_throttling,
            desktop_bridge_commands::set_memory_limit,
            desktop_bridge_commands::set_selected_microphone,
            desktop_bridge_commands::set_selected_camera,
            desktop_bridge_commands::set_mic_level,
            desktop_bridge_commands::open_external,
        ])
        .on_window_event(|window, event| match window.label() {
            MAIN_WINDOW_LABEL => handle_main_window_event(window, event),
            SPLASH_WINDOW_LABEL => {
                if let WindowEvent::Destroyed = event {
                    startup_flow::on_splash_destroyed(window.app_handle());
                }
            }
            _ => {}
        })
        .on_page_load(|webview, payload| {
            if webview.label() != CONTENT_WEBVIEW_LABEL {
                return;
            }
            match payload.event() {
                PageLoadEvent::Started => {
                    append_desktop_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_desktop_log(&format!("page-load finished: {}", payload.url()));
                    let state = webview.app_handle().state::<ShellState>();
                    if let Ok(app_url) = url::Url::parse(&state.app_url) {
                        if !origin_policy::is_same_origin(&app_url, payload.url()) {
                            append_desktop_log("content surface is outside the app origin");
                        }
                    }
                    startup_flow::on_content_loaded(webview.app_handle(), payload.url().as_str());
                }
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();

            let settings_path = runtime_paths::resolve_settings_path(&app_handle);
            let store = PreferenceStore::load(settings_path, append_desktop_log);
            if let Some(path) = store.path() {
                append_startup_log(&format!("preferences loaded from {}", path.display()));
            }
            let launch_args = browser_args::LaunchBrowserArgs(browser_args::browser_args(
                &store.snapshot(),
            ));
            append_startup_log(&format!("browser args: {}", launch_args.0));
            app.manage(store);
            app.manage(launch_args);
            app.manage(ResourceLocator::new(
                runtime_paths::locator_roots(&app_handle),
                runtime_paths::is_packaged_build(),
            ));

            if let Err(error) = tray_setup::setup_tray(&app_handle) {
                append_startup_log(&format!("failed to initialize tray: {error}"));
            }
            startup_flow::start(&app_handle);
            update_channel::spawn_update_schedule(app_handle);

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { code, api, .. } => {
                exit_events::handle_exit_requested(app_handle, code, &api);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                window_actions::restore_main_window(app_handle, append_desktop_log);
            }
            _ => {}
        });
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_helpers;
mod app_runtime;
mod app_types;
mod autostart;
mod browser_args;
mod desktop_bridge;
mod desktop_bridge_commands;
mod exit_events;
mod fade_task;
mod lifecycle;
mod logging;
mod main_window;
mod notifications;
mod origin_policy;
mod preference_store;
mod resource_locator;
mod runtime_paths;
mod settings_window;
mod shell_protocol;
mod splash_window;
mod startup_flow;
mod surface_dispatch;
mod surface_layout;
mod tray_actions;
mod tray_labels;
mod tray_menu_handler;
mod tray_setup;
mod ui_dispatch;
mod update_channel;
mod update_tracker;
mod webview_setup;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{
    append_desktop_log, append_shutdown_log, append_startup_log, append_update_log,
    current_log_path,
};
pub(crate) use app_types::{
    AtomicFlagGuard, BridgeResult, PendingUpdate, ShellState, TrayMenuState, UpdateState,
};

fn main() {
    app_runtime::run();
}

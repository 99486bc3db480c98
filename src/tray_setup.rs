use tauri::{
    image::Image,
    menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager,
};

use crate::{
    append_desktop_log,
    preference_store::{PreferenceStore, LAUNCH_ON_STARTUP, MINIMIZE_TO_TRAY, START_MINIMIZED},
    resource_locator::ResourceLocator,
    tray_actions, tray_labels, tray_menu_handler, window_actions, TrayMenuState, APP_NAME,
    TRAY_ICON_RESOURCE, TRAY_ID,
};

fn load_tray_icon(app_handle: &AppHandle) -> Option<Image<'static>> {
    if let Some(locator) = app_handle.try_state::<ResourceLocator>() {
        let located = locator.locate(TRAY_ICON_RESOURCE);
        if located.found {
            match Image::from_path(&located.path) {
                Ok(image) => return Some(image),
                Err(error) => append_desktop_log(&format!(
                    "failed to load tray icon {}: {error}",
                    located.path.display()
                )),
            }
        }
    }

    append_desktop_log("tray icon resource not found, using the window icon");
    app_handle
        .default_window_icon()
        .map(|icon| icon.clone().to_owned())
}

fn check_item(
    app_handle: &AppHandle,
    id: &str,
    text: &str,
    checked: bool,
) -> Result<CheckMenuItem<tauri::Wry>, String> {
    CheckMenuItem::with_id(app_handle, id, text, true, checked, None::<&str>)
        .map_err(|error| format!("Failed to create tray menu item {id}: {error}"))
}

pub fn setup_tray(app_handle: &AppHandle) -> Result<(), String> {
    let preference = |key: &str| {
        app_handle
            .try_state::<PreferenceStore>()
            .map(|store| store.get_bool(key))
            .unwrap_or(false)
    };

    let open_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_OPEN,
        "Open Gangio",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray open menu item: {error}"))?;
    let start_minimized_item = check_item(
        app_handle,
        tray_actions::TRAY_MENU_START_MINIMIZED,
        "Start Minimized",
        preference(START_MINIMIZED),
    )?;
    let minimize_to_tray_item = check_item(
        app_handle,
        tray_actions::TRAY_MENU_MINIMIZE_TO_TRAY,
        "Minimize to Tray on Close",
        preference(MINIMIZE_TO_TRAY),
    )?;
    let launch_on_startup_item = check_item(
        app_handle,
        tray_actions::TRAY_MENU_LAUNCH_ON_STARTUP,
        "Launch on Startup",
        preference(LAUNCH_ON_STARTUP),
    )?;
    let preferences_menu = Submenu::with_items(
        app_handle,
        "Preferences",
        true,
        &[
            &start_minimized_item,
            &minimize_to_tray_item,
            &launch_on_startup_item,
        ],
    )
    .map_err(|error| format!("Failed to create tray preferences submenu: {error}"))?;
    let check_updates_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_CHECK_UPDATES,
        "Check for Updates",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray update menu item: {error}"))?;
    let quit_item = MenuItem::with_id(
        app_handle,
        tray_actions::TRAY_MENU_QUIT,
        "Quit",
        true,
        None::<&str>,
    )
    .map_err(|error| format!("Failed to create tray quit menu item: {error}"))?;
    let separator = PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create tray separator menu item: {error}"))?;

    let menu = Menu::with_items(
        app_handle,
        &[
            &open_item,
            &preferences_menu,
            &check_updates_item,
            &separator,
            &quit_item,
        ],
    )
    .map_err(|error| format!("Failed to build tray menu: {error}"))?;

    if !app_handle.manage(TrayMenuState {
        start_minimized_item: start_minimized_item.clone(),
        minimize_to_tray_item: minimize_to_tray_item.clone(),
        launch_on_startup_item: launch_on_startup_item.clone(),
        check_updates_item: check_updates_item.clone(),
    }) {
        append_desktop_log("tray menu state already exists, skipping manage");
    }

    let mut tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(APP_NAME)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                window_actions::restore_main_window(tray.app_handle(), append_desktop_log);
            }
        });

    if let Some(icon) = load_tray_icon(app_handle) {
        tray_builder = tray_builder.icon(icon);
    }

    tray_builder
        .build(app_handle)
        .map_err(|error| format!("Failed to create tray icon: {error}"))?;

    tray_labels::sync_tray_preference_checks(app_handle, append_desktop_log);
    Ok(())
}

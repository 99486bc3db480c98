use std::{env, path::PathBuf};

use tauri::{AppHandle, Manager};

use crate::{resource_locator::LocatorRoots, DATA_DIR_ENV, LOG_DIR_ENV, SETTINGS_FILE};

fn env_dir(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

pub fn default_log_dir() -> Option<PathBuf> {
    env_dir(LOG_DIR_ENV).or_else(|| home::home_dir().map(|home| home.join(".gangio-desktop").join("logs")))
}

pub fn resolve_data_dir(app_handle: &AppHandle) -> Option<PathBuf> {
    if let Some(dir) = env_dir(DATA_DIR_ENV) {
        return Some(dir);
    }
    app_handle.path().app_data_dir().ok()
}

pub fn resolve_settings_path(app_handle: &AppHandle) -> Option<PathBuf> {
    resolve_data_dir(app_handle).map(|dir| dir.join(SETTINGS_FILE))
}

pub fn is_packaged_build() -> bool {
    !cfg!(debug_assertions)
}

pub fn locator_roots(app_handle: &AppHandle) -> LocatorRoots {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));

    LocatorRoots {
        resource_dir: app_handle.path().resource_dir().ok(),
        exe_dir,
        manifest_dir: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
        current_dir: env::current_dir().ok(),
        data_dir: resolve_data_dir(app_handle),
    }
}

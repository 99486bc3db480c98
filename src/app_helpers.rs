use std::sync::OnceLock;

use crate::{logging, runtime_paths, DESKTOP_LOG_FILE};

fn desktop_log_path() -> &'static std::path::Path {
    static LOG_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();
    LOG_PATH.get_or_init(|| {
        logging::resolve_desktop_log_path(runtime_paths::default_log_dir(), DESKTOP_LOG_FILE)
    })
}

fn append_log(category: &str, message: &str) {
    if cfg!(debug_assertions) {
        eprintln!("[{category}] {message}");
    }
    if let Err(error) = logging::append_log_line(desktop_log_path(), category, message) {
        eprintln!("{error}");
    }
}

pub fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub fn append_update_log(message: &str) {
    append_log("update", message);
}

pub fn append_shutdown_log(message: &str) {
    append_log("shutdown", message);
}

pub fn current_log_path() -> std::path::PathBuf {
    desktop_log_path().to_path_buf()
}

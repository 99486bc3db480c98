use std::time::Duration;

pub const APP_NAME: &str = "Gangio Desktop";
pub const DEFAULT_APP_URL: &str = "https://gangio.vercel.app/";
pub const APP_URL_ENV: &str = "GANGIO_DESKTOP_APP_URL";
pub const DATA_DIR_ENV: &str = "GANGIO_DESKTOP_DATA_DIR";
pub const LOG_DIR_ENV: &str = "GANGIO_DESKTOP_LOG_DIR";

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const SPLASH_WINDOW_LABEL: &str = "splash";
pub const SETTINGS_WINDOW_LABEL: &str = "settings";
pub const CHROME_WEBVIEW_LABEL: &str = "chrome";
pub const CONTENT_WEBVIEW_LABEL: &str = "content";
pub const TRAY_ID: &str = "gangio-tray";

pub const SHELL_SCHEME: &str = "shell";
pub const SPLASH_PAGE: &str = "splash.html";
pub const TITLEBAR_PAGE: &str = "titlebar.html";
pub const SETTINGS_PAGE: &str = "settings.html";
pub const ERROR_PAGE: &str = "error.html";
pub const TRAY_ICON_RESOURCE: &str = "tray-icon";

pub const DESKTOP_LOG_FILE: &str = "desktop.log";
pub const SETTINGS_FILE: &str = "settings.json";

pub const TITLEBAR_HEIGHT: f64 = 32.0;
pub const MAIN_WINDOW_SIZE: (f64, f64) = (1200.0, 800.0);
pub const MAIN_WINDOW_MIN_SIZE: (f64, f64) = (800.0, 600.0);
pub const SPLASH_WINDOW_SIZE: (f64, f64) = (1000.0, 600.0);
pub const SETTINGS_WINDOW_SIZE: (f64, f64) = (650.0, 650.0);

pub const CONTENT_SETTLE_DELAY: Duration = Duration::from_millis(800);
pub const SPLASH_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(15);
pub const FADE_STEP_INTERVAL: Duration = Duration::from_millis(30);
pub const FADE_STEPS: u32 = 10;
pub const UPDATE_CHECK_INTERVAL: Duration = Duration::from_secs(60 * 60);

pub const MAXIMIZED_STATE_EVENT: &str = "maximized-state-changed";
pub const TRAY_PREFERENCE_CHANGED_EVENT: &str = "tray-preference-changed";
pub const CHECKING_FOR_UPDATE_EVENT: &str = "checking-for-update";
pub const UPDATE_AVAILABLE_EVENT: &str = "update-available";
pub const UPDATE_NOT_AVAILABLE_EVENT: &str = "update-not-available";
pub const UPDATE_DOWNLOADED_EVENT: &str = "update-downloaded";
pub const UPDATE_ERROR_EVENT: &str = "update-error";
pub const UPDATE_CHECK_RESULT_EVENT: &str = "update-check-result";
pub const SPLASH_UPDATE_STATUS_EVENT: &str = "splash-update-status";
pub const SPLASH_UPDATE_PROGRESS_EVENT: &str = "splash-update-progress";

use serde_json::{Map, Value};

use crate::preference_store::{BACKGROUND_THROTTLING, FPS_LIMIT, HARDWARE_ACCELERATION, MEMORY_LIMIT};

const DEFAULT_FPS_LIMIT: u32 = 30;
const MAX_FPS_LIMIT: u32 = 240;
// WebView2 drops its own defaults once extra arguments are supplied.
const WEBVIEW2_DEFAULT_FEATURES: &str =
    "msWebOOUI,msPdfOOUI,msSmartScreenProtection,HardwareMediaKeyHandling,MediaSessionService";

pub(crate) fn parse_fps_limit(value: Option<&Value>) -> u32 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_u64().and_then(|fps| u32::try_from(fps).ok()),
        Some(Value::String(raw)) => raw.trim().parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(fps) if fps > 0 => fps.min(MAX_FPS_LIMIT),
        _ => DEFAULT_FPS_LIMIT,
    }
}

/// Arguments fixed at launch. Preference changes apply on the next start.
#[derive(Debug, Clone)]
pub struct LaunchBrowserArgs(pub String);

fn flag(preferences: &Map<String, Value>, key: &str, default: bool) -> bool {
    preferences.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Chromium switches derived from the performance preferences. Every webview
/// in the process must be created with the same string.
pub fn browser_args(preferences: &Map<String, Value>) -> String {
    let mut args = vec![
        format!("--disable-features={WEBVIEW2_DEFAULT_FEATURES}"),
        "--disable-blink-features=AutomationControlled".to_string(),
        "--disable-smooth-scrolling".to_string(),
        format!("--force-max-fps={}", parse_fps_limit(preferences.get(FPS_LIMIT))),
    ];

    if !flag(preferences, HARDWARE_ACCELERATION, false) {
        args.push("--disable-gpu".to_string());
    }
    if flag(preferences, MEMORY_LIMIT, true) {
        args.push("--js-flags=--max-old-space-size=256".to_string());
    }
    if !flag(preferences, BACKGROUND_THROTTLING, true) {
        args.push("--disable-background-timer-throttling".to_string());
        args.push("--disable-renderer-backgrounding".to_string());
    }

    args.join(" ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::preference_store::default_preferences;

    #[test]
    fn parse_fps_limit_accepts_strings_and_numbers() {
        assert_eq!(parse_fps_limit(Some(&json!("60"))), 60);
        assert_eq!(parse_fps_limit(Some(&json!(144))), 144);
        assert_eq!(parse_fps_limit(Some(&json!("fast"))), 30);
        assert_eq!(parse_fps_limit(Some(&json!(0))), 30);
        assert_eq!(parse_fps_limit(Some(&json!(1000))), 240);
        assert_eq!(parse_fps_limit(None), 30);
    }

    #[test]
    fn default_preferences_produce_conservative_args() {
        let args = browser_args(&default_preferences());
        assert!(args.contains("--force-max-fps=30"));
        assert!(args.contains("--disable-gpu"));
        assert!(args.contains("--max-old-space-size=256"));
        assert!(!args.contains("--disable-background-timer-throttling"));
        assert!(args.contains("AutomationControlled"));
    }

    #[test]
    fn preferences_toggle_optional_switches() {
        let mut preferences = default_preferences();
        preferences.insert(HARDWARE_ACCELERATION.to_string(), json!(true));
        preferences.insert(MEMORY_LIMIT.to_string(), json!(false));
        preferences.insert(BACKGROUND_THROTTLING.to_string(), json!(false));

        let args = browser_args(&preferences);
        assert!(!args.contains("--disable-gpu"));
        assert!(!args.contains("--max-old-space-size"));
        assert!(args.contains("--disable-background-timer-throttling"));
    }
}

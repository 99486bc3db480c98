use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde_json::{json, Map, Value};

pub const START_MINIMIZED: &str = "startMinimized";
pub const MINIMIZE_TO_TRAY: &str = "minimizeToTray";
pub const LAUNCH_ON_STARTUP: &str = "launchOnStartup";
pub const HAS_SHOWN_TRAY_NOTIFICATION: &str = "hasShownTrayNotification";
pub const FPS_LIMIT: &str = "fpsLimit";
pub const HARDWARE_ACCELERATION: &str = "hardwareAcceleration";
pub const BACKGROUND_THROTTLING: &str = "backgroundThrottling";
pub const MEMORY_LIMIT: &str = "memoryLimit";
pub const SELECTED_MICROPHONE: &str = "selectedMicrophone";
pub const SELECTED_CAMERA: &str = "selectedCamera";
pub const MIC_LEVEL: &str = "micLevel";

pub const TRAY_PREFERENCE_KEYS: [&str; 3] = [START_MINIMIZED, MINIMIZE_TO_TRAY, LAUNCH_ON_STARTUP];
const DEVICE_SETTING_KEYS: [&str; 7] = [
    FPS_LIMIT,
    HARDWARE_ACCELERATION,
    BACKGROUND_THROTTLING,
    MEMORY_LIMIT,
    SELECTED_MICROPHONE,
    SELECTED_CAMERA,
    MIC_LEVEL,
];

pub fn default_preferences() -> Map<String, Value> {
    let defaults = json!({
        START_MINIMIZED: false,
        MINIMIZE_TO_TRAY: true,
        LAUNCH_ON_STARTUP: true,
        HAS_SHOWN_TRAY_NOTIFICATION: false,
        FPS_LIMIT: "30",
        HARDWARE_ACCELERATION: false,
        BACKGROUND_THROTTLING: true,
        MEMORY_LIMIT: true,
        SELECTED_MICROPHONE: "default",
        SELECTED_CAMERA: "default",
        MIC_LEVEL: 75,
    });
    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

pub fn is_known_key(key: &str) -> bool {
    default_preferences().contains_key(key)
}

/// Shallow merge of a stored document over the defaults. Keys the defaults do
/// not know are dropped.
pub(crate) fn merge_over_defaults(stored: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = default_preferences();
    for (key, value) in merged.iter_mut() {
        if let Some(stored_value) = stored.get(key) {
            *value = stored_value.clone();
        }
    }
    merged
}

fn read_document<F>(path: &Path, log: F) -> Map<String, Value>
where
    F: Fn(&str),
{
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return default_preferences();
        }
        Err(error) => {
            log(&format!(
                "failed to read settings {}: {}. using defaults",
                path.display(),
                error
            ));
            return default_preferences();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(stored)) => merge_over_defaults(&stored),
        Ok(_) => {
            log(&format!(
                "settings {} has non-object root; using defaults",
                path.display()
            ));
            default_preferences()
        }
        Err(error) => {
            log(&format!(
                "failed to parse settings {}: {}. using defaults",
                path.display(),
                error
            ));
            default_preferences()
        }
    }
}

fn write_document(path: &Path, document: &Map<String, Value>) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create settings directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }

    let serialized = serde_json::to_string_pretty(document)
        .map_err(|error| format!("Failed to serialize settings: {error}"))?;
    fs::write(path, serialized)
        .map_err(|error| format!("Failed to write settings {}: {}", path.display(), error))
}

pub struct PreferenceStore {
    path: Option<PathBuf>,
    data: Mutex<Map<String, Value>>,
    log: fn(&str),
}

impl PreferenceStore {
    pub fn load(path: Option<PathBuf>, log: fn(&str)) -> Self {
        let data = match path.as_deref() {
            Some(path) => read_document(path, log),
            None => {
                log("settings path is unavailable; preferences will not persist");
                default_preferences()
            }
        };

        Self {
            path,
            data: Mutex::new(data),
            log,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.data
            .lock()
            .ok()
            .and_then(|data| data.get(key).cloned())
    }

    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    pub fn get_bool(&self, key: &str) -> bool {
        let fallback = default_preferences()
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false);
        match self.get_or(key, Value::Bool(fallback)) {
            Value::Bool(value) => value,
            _ => fallback,
        }
    }

    pub fn snapshot(&self) -> Map<String, Value> {
        self.data
            .lock()
            .map(|data| data.clone())
            .unwrap_or_else(|_| default_preferences())
    }

    /// Updates one known key and rewrites the whole document. Unknown keys are
    /// rejected. Write failures are logged and the in-memory value is kept.
    pub fn set(&self, key: &str, value: Value) -> bool {
        if !is_known_key(key) {
            (self.log)(&format!("ignored unknown preference key '{key}'"));
            return false;
        }

        let snapshot = match self.data.lock() {
            Ok(mut data) => {
                data.insert(key.to_string(), value);
                data.clone()
            }
            Err(_) => {
                (self.log)("preference store lock poisoned; dropping update");
                return false;
            }
        };

        if let Some(path) = self.path.as_deref() {
            if let Err(error) = write_document(path, &snapshot) {
                (self.log)(&error);
            }
        }
        true
    }

    fn pick(&self, keys: &[&str]) -> Map<String, Value> {
        let snapshot = self.snapshot();
        keys.iter()
            .filter_map(|key| snapshot.get(*key).map(|value| (key.to_string(), value.clone())))
            .collect()
    }

    pub fn tray_preferences(&self) -> Map<String, Value> {
        let mut preferences = self.pick(&TRAY_PREFERENCE_KEYS);
        preferences.extend(self.device_settings());
        preferences
    }

    pub fn device_settings(&self) -> Map<String, Value> {
        self.pick(&DEVICE_SETTING_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(_: &str) {}

    #[test]
    fn set_value_survives_reload_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");

        let store = PreferenceStore::load(Some(path.clone()), quiet);
        assert!(store.set(START_MINIMIZED, Value::Bool(true)));
        assert_eq!(store.get(START_MINIMIZED), Some(Value::Bool(true)));

        let reloaded = PreferenceStore::load(Some(path), quiet);
        assert_eq!(reloaded.get(START_MINIMIZED), Some(Value::Bool(true)));
        assert_eq!(reloaded.get(MIC_LEVEL), Some(json!(75)));
    }

    #[test]
    fn missing_file_yields_exact_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = PreferenceStore::load(Some(dir.path().join("absent.json")), quiet);
        assert_eq!(store.snapshot(), default_preferences());
    }

    #[test]
    fn corrupted_file_yields_exact_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write corrupt file");

        let store = PreferenceStore::load(Some(path.clone()), quiet);
        assert_eq!(store.snapshot(), default_preferences());

        fs::write(&path, "[1, 2, 3]").expect("write array root");
        let store = PreferenceStore::load(Some(path), quiet);
        assert_eq!(store.snapshot(), default_preferences());
    }

    #[test]
    fn load_ignores_unknown_keys_and_overrides_known_ones() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"minimizeToTray": false, "fpsLimit": "60", "legacyTheme": "dark"}"#,
        )
        .expect("write settings");

        let store = PreferenceStore::load(Some(path), quiet);
        let snapshot = store.snapshot();
        assert_eq!(snapshot.get(MINIMIZE_TO_TRAY), Some(&Value::Bool(false)));
        assert_eq!(snapshot.get(FPS_LIMIT), Some(&json!("60")));
        assert!(!snapshot.contains_key("legacyTheme"));
        assert_eq!(snapshot.len(), default_preferences().len());
    }

    #[test]
    fn set_rejects_unknown_keys_without_writing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        let store = PreferenceStore::load(Some(path.clone()), quiet);

        assert!(!store.set("legacyTheme", json!("dark")));
        assert!(!path.exists());
        assert_eq!(store.get("legacyTheme"), None);
    }

    #[test]
    fn set_writes_pretty_printed_document_every_time() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.json");
        let store = PreferenceStore::load(Some(path.clone()), quiet);

        store.set(MIC_LEVEL, json!(40));
        store.set(MIC_LEVEL, json!(40));

        let raw = fs::read_to_string(&path).expect("read settings");
        assert!(raw.contains("\n  \"micLevel\": 40"));
        let parsed: Map<String, Value> = serde_json::from_str(&raw).expect("parse settings");
        assert_eq!(parsed.len(), default_preferences().len());
    }

    #[test]
    fn get_or_returns_fallback_only_for_missing_keys() {
        let store = PreferenceStore::load(None, quiet);
        assert_eq!(store.get_or("windowZoom", json!(1.25)), json!(1.25));
        assert_eq!(store.get_or(MIC_LEVEL, json!(10)), json!(75));

        assert!(store.set(SELECTED_CAMERA, json!("cam-2")));
        assert_eq!(store.get_or(SELECTED_CAMERA, json!("")), json!("cam-2"));
    }

    #[test]
    fn get_bool_falls_back_to_default_for_mistyped_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"minimizeToTray": "yes"}"#).expect("write settings");

        let store = PreferenceStore::load(Some(path), quiet);
        assert!(store.get_bool(MINIMIZE_TO_TRAY));
    }

    #[test]
    fn store_without_path_keeps_values_in_memory() {
        let store = PreferenceStore::load(None, quiet);
        assert!(store.set(SELECTED_CAMERA, json!("cam-1")));
        assert_eq!(store.get(SELECTED_CAMERA), Some(json!("cam-1")));
    }

    #[test]
    fn tray_preferences_include_device_settings() {
        let store = PreferenceStore::load(None, quiet);
        let preferences = store.tray_preferences();
        assert_eq!(preferences.get(LAUNCH_ON_STARTUP), Some(&Value::Bool(true)));
        assert_eq!(preferences.get(SELECTED_MICROPHONE), Some(&json!("default")));
        assert!(!preferences.contains_key(HAS_SHOWN_TRAY_NOTIFICATION));
    }
}

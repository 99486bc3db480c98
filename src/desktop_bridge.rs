pub const DESKTOP_BRIDGE_SCRIPT: &str = include_str!("../bridge/desktop-bridge.js");
pub const EXTERNAL_LINKS_SCRIPT: &str = include_str!("../bridge/external-links.js");
pub const NO_SPELLCHECK_SCRIPT: &str = include_str!("../bridge/no-spellcheck.js");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_script_invokes_registered_commands() {
        for command in [
            "is_desktop_runtime",
            "minimize_window",
            "maximize_window",
            "close_window",
            "is_window_maximized",
            "open_settings",
            "close_settings",
            "get_app_version",
            "splash_screen_ready",
            "check_for_updates",
            "install_update",
            "get_tray_preferences",
            "set_tray_preference",
            "get_settings",
            "save_setting",
            "set_fps_limit",
            "set_hardware_acceleration",
            "set_background_throttling",
            "set_memory_limit",
            "set_selected_microphone",
            "set_selected_camera",
            "set_mic_level",
            "open_external",
        ] {
            assert!(
                DESKTOP_BRIDGE_SCRIPT.contains(&format!("'{command}'")),
                "bridge script does not call {command}"
            );
        }
    }

    #[test]
    fn bridge_script_listens_for_shell_events() {
        for event in [
            crate::MAXIMIZED_STATE_EVENT,
            crate::TRAY_PREFERENCE_CHANGED_EVENT,
            crate::UPDATE_AVAILABLE_EVENT,
            crate::UPDATE_DOWNLOADED_EVENT,
            crate::UPDATE_CHECK_RESULT_EVENT,
            crate::SPLASH_UPDATE_STATUS_EVENT,
            crate::SPLASH_UPDATE_PROGRESS_EVENT,
        ] {
            assert!(DESKTOP_BRIDGE_SCRIPT.contains(event), "missing listener for {event}");
        }
    }

    #[test]
    fn external_links_script_routes_blank_targets_to_open_external() {
        assert!(EXTERNAL_LINKS_SCRIPT.contains("'_blank'"));
        assert!(EXTERNAL_LINKS_SCRIPT.contains("'open_external'"));
        assert!(EXTERNAL_LINKS_SCRIPT.contains("window.open"));
    }

    #[test]
    fn spellcheck_script_covers_editable_elements_added_later() {
        assert!(NO_SPELLCHECK_SCRIPT.contains("document.documentElement.spellcheck = false"));
        assert!(NO_SPELLCHECK_SCRIPT.contains("setAttribute('spellcheck', 'false')"));
        for selector in ["input", "textarea", "[contenteditable]"] {
            assert!(NO_SPELLCHECK_SCRIPT.contains(selector), "missing selector {selector}");
        }
        assert!(NO_SPELLCHECK_SCRIPT.contains("MutationObserver"));
    }
}

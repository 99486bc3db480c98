use crate::preference_store::{LAUNCH_ON_STARTUP, MINIMIZE_TO_TRAY, START_MINIMIZED};

pub const TRAY_MENU_OPEN: &str = "tray_open";
pub const TRAY_MENU_START_MINIMIZED: &str = "tray_start_minimized";
pub const TRAY_MENU_MINIMIZE_TO_TRAY: &str = "tray_minimize_to_tray";
pub const TRAY_MENU_LAUNCH_ON_STARTUP: &str = "tray_launch_on_startup";
pub const TRAY_MENU_CHECK_UPDATES: &str = "tray_check_updates";
pub const TRAY_MENU_QUIT: &str = "tray_quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    Open,
    TogglePreference(&'static str),
    CheckForUpdates,
    Quit,
}

pub fn action_from_menu_id(menu_id: &str) -> Option<TrayMenuAction> {
    match menu_id {
        TRAY_MENU_OPEN => Some(TrayMenuAction::Open),
        TRAY_MENU_START_MINIMIZED => Some(TrayMenuAction::TogglePreference(START_MINIMIZED)),
        TRAY_MENU_MINIMIZE_TO_TRAY => Some(TrayMenuAction::TogglePreference(MINIMIZE_TO_TRAY)),
        TRAY_MENU_LAUNCH_ON_STARTUP => Some(TrayMenuAction::TogglePreference(LAUNCH_ON_STARTUP)),
        TRAY_MENU_CHECK_UPDATES => Some(TrayMenuAction::CheckForUpdates),
        TRAY_MENU_QUIT => Some(TrayMenuAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_all_known_actions() {
        assert_eq!(action_from_menu_id(TRAY_MENU_OPEN), Some(TrayMenuAction::Open));
        assert_eq!(
            action_from_menu_id(TRAY_MENU_START_MINIMIZED),
            Some(TrayMenuAction::TogglePreference(START_MINIMIZED))
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_MINIMIZE_TO_TRAY),
            Some(TrayMenuAction::TogglePreference(MINIMIZE_TO_TRAY))
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_LAUNCH_ON_STARTUP),
            Some(TrayMenuAction::TogglePreference(LAUNCH_ON_STARTUP))
        );
        assert_eq!(
            action_from_menu_id(TRAY_MENU_CHECK_UPDATES),
            Some(TrayMenuAction::CheckForUpdates)
        );
        assert_eq!(action_from_menu_id(TRAY_MENU_QUIT), Some(TrayMenuAction::Quit));
    }

    #[test]
    fn action_from_menu_id_returns_none_for_unknown_menu_id() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
    }
}

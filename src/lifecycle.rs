//! Application lifecycle state machine.
//!
//! Startup moves strictly forward (`Starting` through `ContentReady`), after
//! which the window toggles between `Visible` and `HiddenToTray` until the
//! process enters `Closing`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Starting,
    SplashVisible,
    ContentLoading,
    ContentReady,
    Visible,
    HiddenToTray,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    SplashShown,
    SplashReady,
    SplashFailed,
    ContentLoaded,
    Revealed { start_minimized: bool },
    HiddenToTray,
    Restored,
    QuitRequested,
}

pub fn next_state(current: LifecycleState, event: LifecycleEvent) -> Option<LifecycleState> {
    use LifecycleEvent as E;
    use LifecycleState as S;

    match (current, event) {
        (S::Closing, _) => None,
        (_, E::QuitRequested) => Some(S::Closing),
        (S::Starting, E::SplashShown) => Some(S::SplashVisible),
        (S::SplashVisible, E::SplashReady) => Some(S::ContentLoading),
        (S::Starting | S::SplashVisible, E::SplashFailed) => Some(S::ContentLoading),
        (S::ContentLoading, E::ContentLoaded) => Some(S::ContentReady),
        (S::ContentReady, E::Revealed { start_minimized }) => Some(if start_minimized {
            S::HiddenToTray
        } else {
            S::Visible
        }),
        (S::Visible, E::HiddenToTray) => Some(S::HiddenToTray),
        (S::HiddenToTray, E::Restored) => Some(S::Visible),
        _ => None,
    }
}

#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
    history: Vec<LifecycleState>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            state: LifecycleState::Starting,
            history: Vec::new(),
        }
    }
}

impl Lifecycle {
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// States entered since `Starting`, in order.
    pub fn history(&self) -> &[LifecycleState] {
        &self.history
    }

    pub fn apply(&mut self, event: LifecycleEvent) -> Result<LifecycleState, String> {
        let next = next_state(self.state, event).ok_or_else(|| {
            format!(
                "lifecycle event {:?} is not valid in state {:?}",
                event, self.state
            )
        })?;
        self.state = next;
        self.history.push(next);
        Ok(next)
    }

    pub fn has_main_window(&self) -> bool {
        !matches!(
            self.state,
            LifecycleState::Starting | LifecycleState::SplashVisible
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    HideToTray,
    ProceedWithClose,
}

pub fn decide_close(force_quit: bool, minimize_to_tray: bool) -> CloseDecision {
    if !force_quit && minimize_to_tray {
        CloseDecision::HideToTray
    } else {
        CloseDecision::ProceedWithClose
    }
}

pub fn should_show_tray_notice(decision: CloseDecision, already_shown: bool) -> bool {
    decision == CloseDecision::HideToTray && !already_shown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_startup(start_minimized: bool) -> Lifecycle {
        let mut lifecycle = Lifecycle::default();
        lifecycle.apply(LifecycleEvent::SplashShown).expect("splash shown");
        lifecycle.apply(LifecycleEvent::SplashReady).expect("splash ready");
        lifecycle.apply(LifecycleEvent::ContentLoaded).expect("content loaded");
        lifecycle
            .apply(LifecycleEvent::Revealed { start_minimized })
            .expect("revealed");
        lifecycle
    }

    #[test]
    fn startup_sequence_ends_visible_when_not_start_minimized() {
        let lifecycle = run_startup(false);
        assert_eq!(
            lifecycle.history(),
            &[
                LifecycleState::SplashVisible,
                LifecycleState::ContentLoading,
                LifecycleState::ContentReady,
                LifecycleState::Visible,
            ]
        );
    }

    #[test]
    fn startup_sequence_ends_hidden_when_start_minimized() {
        let lifecycle = run_startup(true);
        assert_eq!(
            lifecycle.history(),
            &[
                LifecycleState::SplashVisible,
                LifecycleState::ContentLoading,
                LifecycleState::ContentReady,
                LifecycleState::HiddenToTray,
            ]
        );
    }

    #[test]
    fn splash_failure_skips_straight_to_content_loading() {
        let mut lifecycle = Lifecycle::default();
        assert_eq!(
            lifecycle.apply(LifecycleEvent::SplashFailed),
            Ok(LifecycleState::ContentLoading)
        );
        assert!(lifecycle.has_main_window());
    }

    #[test]
    fn duplicate_splash_ready_is_rejected() {
        let mut lifecycle = Lifecycle::default();
        lifecycle.apply(LifecycleEvent::SplashShown).expect("splash shown");
        lifecycle.apply(LifecycleEvent::SplashReady).expect("first ready");
        assert!(lifecycle.apply(LifecycleEvent::SplashReady).is_err());
        assert!(lifecycle.apply(LifecycleEvent::SplashFailed).is_err());
        assert_eq!(lifecycle.state(), LifecycleState::ContentLoading);
    }

    #[test]
    fn visible_and_hidden_toggle_until_quit() {
        let mut lifecycle = run_startup(false);
        assert_eq!(
            lifecycle.apply(LifecycleEvent::HiddenToTray),
            Ok(LifecycleState::HiddenToTray)
        );
        assert_eq!(
            lifecycle.apply(LifecycleEvent::Restored),
            Ok(LifecycleState::Visible)
        );
        assert_eq!(
            lifecycle.apply(LifecycleEvent::QuitRequested),
            Ok(LifecycleState::Closing)
        );
        assert!(lifecycle.apply(LifecycleEvent::Restored).is_err());
        assert!(lifecycle.apply(LifecycleEvent::QuitRequested).is_err());
    }

    #[test]
    fn quit_is_accepted_from_any_live_state() {
        let mut lifecycle = Lifecycle::default();
        assert_eq!(
            lifecycle.apply(LifecycleEvent::QuitRequested),
            Ok(LifecycleState::Closing)
        );
    }

    #[test]
    fn backward_transitions_are_rejected() {
        let mut lifecycle = run_startup(false);
        assert!(lifecycle.apply(LifecycleEvent::ContentLoaded).is_err());
        assert!(lifecycle.apply(LifecycleEvent::SplashShown).is_err());
        assert!(lifecycle.apply(LifecycleEvent::Restored).is_err());
    }

    #[test]
    fn close_with_minimize_to_tray_hides_instead_of_exiting() {
        assert_eq!(decide_close(false, true), CloseDecision::HideToTray);
        assert_eq!(decide_close(false, false), CloseDecision::ProceedWithClose);
        assert_eq!(decide_close(true, true), CloseDecision::ProceedWithClose);
    }

    #[test]
    fn close_to_tray_then_disabled_tray_reaches_closing() {
        let mut lifecycle = run_startup(false);
        let decision = decide_close(false, true);
        assert_eq!(decision, CloseDecision::HideToTray);
        lifecycle.apply(LifecycleEvent::HiddenToTray).expect("hide");
        assert_eq!(lifecycle.state(), LifecycleState::HiddenToTray);

        let mut lifecycle = run_startup(false);
        assert_eq!(decide_close(false, false), CloseDecision::ProceedWithClose);
        lifecycle.apply(LifecycleEvent::QuitRequested).expect("quit");
        assert_eq!(lifecycle.state(), LifecycleState::Closing);
    }

    #[test]
    fn tray_notice_is_one_shot() {
        assert!(should_show_tray_notice(CloseDecision::HideToTray, false));
        assert!(!should_show_tray_notice(CloseDecision::HideToTray, true));
        assert!(!should_show_tray_notice(CloseDecision::ProceedWithClose, false));
    }
}

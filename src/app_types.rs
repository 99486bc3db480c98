use std::{
    env,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};
use tauri::menu::{CheckMenuItem, MenuItem};

use crate::{
    fade_task::FadeCancel,
    lifecycle::{Lifecycle, LifecycleEvent, LifecycleState},
    origin_policy,
    surface_layout::MaximizeTracker,
    update_tracker::UpdateTracker,
    APP_URL_ENV, DEFAULT_APP_URL,
};

#[derive(Clone)]
pub(crate) struct TrayMenuState {
    pub(crate) start_minimized_item: CheckMenuItem<tauri::Wry>,
    pub(crate) minimize_to_tray_item: CheckMenuItem<tauri::Wry>,
    pub(crate) launch_on_startup_item: CheckMenuItem<tauri::Wry>,
    pub(crate) check_updates_item: MenuItem<tauri::Wry>,
}

#[derive(Debug)]
pub(crate) struct ShellState {
    pub(crate) app_url: String,
    pub(crate) lifecycle: Mutex<Lifecycle>,
    pub(crate) force_quit: AtomicBool,
    pub(crate) main_build_failures: Mutex<u32>,
    pub(crate) fade_cancel: Mutex<Option<FadeCancel>>,
    pub(crate) maximize_tracker: Mutex<MaximizeTracker>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            app_url: origin_policy::normalize_app_url(
                &env::var(APP_URL_ENV).unwrap_or_else(|_| DEFAULT_APP_URL.to_string()),
                DEFAULT_APP_URL,
            ),
            lifecycle: Mutex::new(Lifecycle::default()),
            force_quit: AtomicBool::new(false),
            main_build_failures: Mutex::new(0),
            fade_cancel: Mutex::new(None),
            maximize_tracker: Mutex::new(MaximizeTracker::default()),
        }
    }
}

impl ShellState {
    pub(crate) fn is_quitting(&self) -> bool {
        self.force_quit.load(Ordering::Relaxed)
    }

    pub(crate) fn mark_quitting(&self) {
        self.force_quit.store(true, Ordering::Relaxed);
    }

    pub(crate) fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle
            .lock()
            .map(|lifecycle| lifecycle.state())
            .unwrap_or(LifecycleState::Closing)
    }

    pub(crate) fn has_main_window(&self) -> bool {
        self.lifecycle
            .lock()
            .map(|lifecycle| lifecycle.has_main_window())
            .unwrap_or(true)
    }

    pub(crate) fn lifecycle_history(&self) -> Vec<LifecycleState> {
        self.lifecycle
            .lock()
            .map(|lifecycle| lifecycle.history().to_vec())
            .unwrap_or_default()
    }

    /// Moves startup past a splash that never handed off (closed, crashed or
    /// silent). Returns true only for the call that should build the main
    /// window.
    pub(crate) fn skip_splash<F>(&self, log: F) -> bool
    where
        F: Fn(&str),
    {
        if self.is_quitting() || self.has_main_window() {
            return false;
        }
        self.apply_lifecycle(LifecycleEvent::SplashFailed, log)
            .is_some()
    }

    /// Applies a lifecycle event; rejected transitions are logged and reported
    /// as `None`.
    pub(crate) fn apply_lifecycle<F>(&self, event: LifecycleEvent, log: F) -> Option<LifecycleState>
    where
        F: Fn(&str),
    {
        let mut lifecycle = match self.lifecycle.lock() {
            Ok(guard) => guard,
            Err(_) => {
                log("lifecycle lock poisoned");
                return None;
            }
        };
        match lifecycle.apply(event) {
            Ok(state) => {
                log(&format!("lifecycle -> {state:?}"));
                Some(state)
            }
            Err(error) => {
                log(&error);
                None
            }
        }
    }

    pub(crate) fn start_fade(&self) -> FadeCancel {
        let cancel = FadeCancel::default();
        if let Ok(mut slot) = self.fade_cancel.lock() {
            if let Some(previous) = slot.replace(cancel.clone()) {
                previous.cancel();
            }
        }
        cancel
    }

    pub(crate) fn cancel_fade(&self) {
        if let Ok(mut slot) = self.fade_cancel.lock() {
            if let Some(cancel) = slot.take() {
                cancel.cancel();
            }
        }
    }

    /// Drops per-window state once the main window is gone.
    pub(crate) fn forget_main_window(&self) {
        self.cancel_fade();
        if let Ok(mut tracker) = self.maximize_tracker.lock() {
            tracker.reset();
        }
    }

    pub(crate) fn observe_maximized(&self, maximized: bool) -> Option<bool> {
        self.maximize_tracker
            .lock()
            .ok()
            .and_then(|mut tracker| tracker.observe(maximized))
    }

    /// Counts a failed main window construction and reports whether another
    /// attempt is allowed.
    pub(crate) fn record_main_build_failure(&self) -> bool {
        match self.main_build_failures.lock() {
            Ok(mut failures) => {
                *failures += 1;
                *failures < 2
            }
            Err(_) => false,
        }
    }
}

pub(crate) struct PendingUpdate {
    pub(crate) update: tauri_plugin_updater::Update,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Default)]
pub(crate) struct UpdateState {
    pub(crate) tracker: Mutex<UpdateTracker>,
    pub(crate) pending: Mutex<Option<PendingUpdate>>,
    pub(crate) is_downloading: AtomicBool,
}

#[derive(Debug, serde::Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[test]
    fn atomic_flag_guard_try_set_rejects_double_set_until_drop() {
        let flag = AtomicBool::new(false);

        let guard = AtomicFlagGuard::try_set(&flag).expect("first set should succeed");
        assert!(flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Relaxed));
        assert!(AtomicFlagGuard::try_set(&flag).is_some());
    }

    #[test]
    fn shell_state_rejects_invalid_transitions_without_changing_state() {
        let state = ShellState::default();
        assert_eq!(state.apply_lifecycle(LifecycleEvent::ContentLoaded, |_| {}), None);
        assert_eq!(state.lifecycle_state(), LifecycleState::Starting);
        assert_eq!(
            state.apply_lifecycle(LifecycleEvent::SplashShown, |_| {}),
            Some(LifecycleState::SplashVisible)
        );
    }

    #[test]
    fn starting_a_new_fade_cancels_the_previous_one() {
        let state = ShellState::default();
        let first = state.start_fade();
        let second = state.start_fade();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        state.cancel_fade();
        assert!(second.is_cancelled());
    }

    #[test]
    fn closing_the_splash_builds_the_main_window_once() {
        let state = ShellState::default();
        state.apply_lifecycle(LifecycleEvent::SplashShown, |_| {});

        assert!(state.skip_splash(|_| {}));
        assert!(!state.skip_splash(|_| {}));
        assert_eq!(state.lifecycle_state(), LifecycleState::ContentLoading);
        assert_eq!(state.apply_lifecycle(LifecycleEvent::SplashReady, |_| {}), None);
    }

    #[test]
    fn splash_fallback_is_a_no_op_after_the_handshake_or_quit() {
        let ready = ShellState::default();
        ready.apply_lifecycle(LifecycleEvent::SplashShown, |_| {});
        ready.apply_lifecycle(LifecycleEvent::SplashReady, |_| {});
        assert!(!ready.skip_splash(|_| {}));

        let quitting = ShellState::default();
        quitting.apply_lifecycle(LifecycleEvent::SplashShown, |_| {});
        quitting.mark_quitting();
        assert!(!quitting.skip_splash(|_| {}));
        assert_eq!(quitting.lifecycle_state(), LifecycleState::SplashVisible);
    }

    #[test]
    fn main_window_construction_is_retried_once() {
        let state = ShellState::default();
        assert!(state.record_main_build_failure());
        assert!(!state.record_main_build_failure());
    }
}

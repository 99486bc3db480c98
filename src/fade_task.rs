use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{FADE_STEPS, FADE_STEP_INTERVAL};

#[derive(Debug, Clone, Default)]
pub struct FadeCancel(Arc<AtomicBool>);

impl FadeCancel {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Opacity values applied after each tick, ending at exactly 1.0.
pub fn fade_opacity_steps(steps: u32) -> Vec<f64> {
    let steps = steps.max(1);
    (1..=steps)
        .map(|step| f64::from(step) / f64::from(steps))
        .collect()
}

pub fn opacity_script(opacity: f64) -> String {
    let opacity = opacity.clamp(0.0, 1.0);
    format!(
        "document.documentElement && (document.documentElement.style.opacity = '{opacity:.2}');"
    )
}

/// Steps `apply` through the fade on the async runtime. `finish` runs only if
/// the fade was not cancelled.
pub fn spawn_fade_in<A, F>(cancel: FadeCancel, apply: A, finish: F)
where
    A: Fn(f64) + Send + 'static,
    F: FnOnce() + Send + 'static,
{
    tauri::async_runtime::spawn(async move {
        for opacity in fade_opacity_steps(FADE_STEPS) {
            tokio::time::sleep(FADE_STEP_INTERVAL).await;
            if cancel.is_cancelled() {
                return;
            }
            apply(opacity);
        }
        if !cancel.is_cancelled() {
            finish();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_steps_ramp_in_fixed_increments_to_full_opacity() {
        let steps = fade_opacity_steps(10);
        assert_eq!(steps.len(), 10);
        assert!((steps[0] - 0.1).abs() < f64::EPSILON);
        assert_eq!(steps.last().copied(), Some(1.0));
        assert!(steps.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn fade_steps_never_empty() {
        assert_eq!(fade_opacity_steps(0), vec![1.0]);
    }

    #[test]
    fn cancel_is_shared_between_clones() {
        let cancel = FadeCancel::default();
        let observer = cancel.clone();
        assert!(!observer.is_cancelled());
        cancel.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn opacity_script_clamps_values() {
        assert!(opacity_script(1.7).contains("'1.00'"));
        assert!(opacity_script(-0.2).contains("'0.00'"));
    }
}

use crate::TITLEBAR_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub chrome: SurfaceRect,
    pub content: SurfaceRect,
}

/// Splits the host's logical inner area into the title bar strip and the
/// content region below it.
pub fn compute_surface_layout(host_width: f64, host_height: f64) -> SurfaceLayout {
    let width = host_width.max(0.0);
    let height = host_height.max(0.0);

    SurfaceLayout {
        chrome: SurfaceRect {
            x: 0.0,
            y: 0.0,
            width,
            height: TITLEBAR_HEIGHT,
        },
        content: SurfaceRect {
            x: 0.0,
            y: TITLEBAR_HEIGHT,
            width,
            height: (height - TITLEBAR_HEIGHT).max(0.0),
        },
    }
}

/// Remembers the last maximized state sent to the chrome surface so that
/// resize bursts only produce a broadcast when the state actually flips.
#[derive(Debug, Default)]
pub struct MaximizeTracker {
    last: Option<bool>,
}

impl MaximizeTracker {
    pub fn observe(&mut self, maximized: bool) -> Option<bool> {
        if self.last == Some(maximized) {
            return None;
        }
        self.last = Some(maximized);
        Some(maximized)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_keeps_fixed_height_and_content_fills_the_rest() {
        for host_height in [100.0, 600.0, 4000.0] {
            let layout = compute_surface_layout(1200.0, host_height);
            assert_eq!(layout.chrome.height, 32.0);
            assert_eq!(layout.chrome.y, 0.0);
            assert_eq!(layout.content.y, 32.0);
            assert_eq!(layout.content.height, host_height - 32.0);
            assert_eq!(layout.chrome.width, 1200.0);
            assert_eq!(layout.content.width, 1200.0);
        }
    }

    #[test]
    fn content_height_never_goes_negative() {
        let layout = compute_surface_layout(300.0, 20.0);
        assert_eq!(layout.chrome.height, 32.0);
        assert_eq!(layout.content.height, 0.0);
    }

    #[test]
    fn maximize_tracker_reports_only_changes() {
        let mut tracker = MaximizeTracker::default();
        assert_eq!(tracker.observe(false), Some(false));
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), Some(true));
        assert_eq!(tracker.observe(true), None);

        tracker.reset();
        assert_eq!(tracker.observe(true), Some(true));
    }
}

//! Frame bookkeeping shared by the browser driver
//!
//! `requestAnimationFrame` only runs a callback once; the engine asks for the
//! next one at the end of every frame. [`AnimationFrameScheduler`] records
//! that ask in a flag the driver consumes after each callback, so at most one
//! browser request is outstanding per driver.

use std::cell::Cell;
use std::fmt::Debug;
use std::rc::Rc;

use kalaa_fire::{FrameScheduler, SurfaceSize};
use log::debug;

/// Shared flag between an engine's scheduler and the driver
#[derive(Debug, Clone, Default)]
pub struct FrameRequests {
    requested: Rc<Cell<bool>>,
    total: Rc<Cell<u64>>,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler feeding this flag, for a new engine
    pub fn scheduler(&self) -> AnimationFrameScheduler {
        AnimationFrameScheduler {
            requests: self.clone(),
        }
    }

    /// Consume the outstanding request, if any
    pub fn take(&self) -> bool {
        self.requested.replace(false)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.get()
    }

    /// Requests made by every scheduler sharing this flag
    pub fn total(&self) -> u64 {
        self.total.get()
    }
}

/// [`FrameScheduler`] that defers to the browser's animation frames
#[derive(Debug, Clone)]
pub struct AnimationFrameScheduler {
    requests: FrameRequests,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        self.requests.requested.set(true);
        self.requests.total.set(self.requests.total.get() + 1);
    }
}

/// Surface size for a window's `innerWidth` x `innerHeight`
///
/// CSS pixel sizes may be fractional; the canvas backing store truncates them
/// the same way. Missing or invalid values give zero.
pub fn viewport_size(width: Option<f64>, height: Option<f64>) -> SurfaceSize {
    let pixels = |value: Option<f64>| match value {
        Some(v) if v.is_finite() && v > 0.0 => v.min(f64::from(u32::MAX)) as u32,
        _ => 0,
    };
    SurfaceSize::new(pixels(width), pixels(height))
}

/// 64-bit seed from two `Math.random()` draws
pub fn seed_from_units(high: f64, low: f64) -> u64 {
    let bits = |unit: f64| (unit.clamp(0.0, 1.0) * f64::from(u32::MAX)) as u64;
    (bits(high) << 32) | bits(low)
}

/// Log a canvas call that threw; returns the logged message
///
/// Context methods such as `ellipse` or `rotate` throw on bad arguments. A
/// failed call only spoils the current stroke, so the frame goes on.
pub fn report_canvas_error<E: Debug>(operation: &str, result: Result<(), E>) -> Option<String> {
    let err = result.err()?;
    let message = format!("Canvas {operation} failed: {err:?}");
    debug!("{message}");
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scheduler_sets_shared_flag() {
        let requests = FrameRequests::new();
        let mut scheduler = requests.scheduler();
        assert!(!requests.take());

        scheduler.request_frame();
        scheduler.request_frame();
        assert!(requests.is_requested());
        assert!(requests.take());
        assert!(!requests.take());
        assert_eq!(requests.total(), 2);
    }

    #[test]
    fn test_scheduler_drives_engine() {
        use kalaa_fire::{FireConfig, FireEngine, RecordingSurface};
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let requests = FrameRequests::new();
        let mut engine = FireEngine::attach(
            Some(RecordingSurface::default()),
            SurfaceSize::new(320, 240),
            requests.scheduler(),
            StdRng::seed_from_u64(seed_from_units(0.25, 0.75)),
            FireConfig::default(),
        )
        .expect("surface present");

        let mut now = 0.0;
        while requests.take() && engine.frame_index() < 10 {
            now += 16.0;
            engine.frame(now);
        }
        assert_eq!(engine.frame_index(), 10);
        assert_eq!(requests.total(), 11);
    }

    #[test]
    fn test_viewport_size() {
        assert_eq!(
            viewport_size(Some(1280.0), Some(719.5)),
            SurfaceSize::new(1280, 719)
        );
        assert_eq!(viewport_size(None, Some(100.0)), SurfaceSize::new(0, 100));
        assert_eq!(
            viewport_size(Some(f64::NAN), Some(-3.0)),
            SurfaceSize::new(0, 0)
        );
    }

    #[test]
    fn test_report_canvas_error() {
        assert_eq!(report_canvas_error::<String>("rotate", Ok(())), None);
        assert_eq!(
            report_canvas_error("ellipse", Err("IndexSizeError")),
            Some(r#"Canvas ellipse failed: "IndexSizeError""#.to_string())
        );
    }

    #[test]
    fn test_seed_from_units() {
        assert_eq!(seed_from_units(0.0, 0.0), 0);
        assert_eq!(seed_from_units(0.0, 1.0), u64::from(u32::MAX));
        assert_eq!(seed_from_units(1.0, 0.0), u64::from(u32::MAX) << 32);
        assert_ne!(seed_from_units(0.3, 0.6), seed_from_units(0.6, 0.3));
    }
}

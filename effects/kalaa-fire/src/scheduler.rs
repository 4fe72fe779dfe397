//! Frame scheduling
//!
//! The engine never loops on its own. At the end of every frame it asks the
//! host for another one through [`FrameScheduler::request_frame`]; the host
//! decides when (or whether) that frame is granted. In a browser this is
//! `requestAnimationFrame`; tests and the CLI use [`ManualScheduler`] and pull
//! frames one at a time.

/// Host primitive that grants the next display frame
pub trait FrameScheduler {
    /// Ask for one more frame callback
    fn request_frame(&mut self);
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for &mut F {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }
}

impl<F: FrameScheduler + ?Sized> FrameScheduler for Box<F> {
    fn request_frame(&mut self) {
        (**self).request_frame();
    }
}

/// Scheduler that only counts requests
///
/// Requests are granted explicitly with [`take_request`](Self::take_request),
/// which makes frame stepping fully deterministic.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: usize,
    requested: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet granted
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Requests made since creation
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Grant one pending request, returning whether there was one
    pub fn take_request(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.requested += 1;
    }
}

/// Deterministic frame timestamps for hosts without a display clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    interval_ms: f64,
    now_ms: f64,
}

impl FrameClock {
    /// A clock ticking at `fps` frames per second, starting at zero
    pub fn with_fps(fps: f64) -> Self {
        let interval_ms = if fps > 0.0 && fps.is_finite() {
            1000.0 / fps
        } else {
            0.0
        };
        Self {
            interval_ms,
            now_ms: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance by one interval and return the new timestamp
    pub fn tick(&mut self) -> f64 {
        self.now_ms += self.interval_ms;
        self.now_ms
    }
}

impl Default for FrameClock {
    /// 60 Hz
    fn default() -> Self {
        Self::with_fps(60.0)
    }
}

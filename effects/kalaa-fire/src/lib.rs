//! Ember particle engine for the Kalaa site backdrop.
//!
//! The engine owns a pool of embers that drift upward, sway, rotate and fade
//! while being painted as flame-like brushstrokes in a slowly shifting
//! five-color palette. It holds no thread of its own: the host grants frames
//! through a [`FrameScheduler`] and the engine paints onto any [`Surface`].
//!
//! # Architecture
//!
//! - [`Ember`]: a single particle with kinematics, sway and lifespan
//! - [`Palette`]: base colors plus the per-frame oscillated palette
//! - [`FireEngine`]: pool ownership, per-frame update/render/reschedule
//! - [`FireHost`]: page lifecycle (content ready, navigation, resize, detach)
//! - [`Surface`] implementations: [`RecordingSurface`] and [`RasterSurface`]
//!
//! # Usage
//!
//! ```rust
//! use kalaa_fire::{FireConfig, FireEngine, FrameClock, ManualScheduler, RasterSurface, SurfaceSize};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let viewport = SurfaceSize::new(640, 480);
//! let mut engine = FireEngine::attach(
//!     Some(RasterSurface::new(viewport)),
//!     viewport,
//!     ManualScheduler::new(),
//!     StdRng::seed_from_u64(7),
//!     FireConfig::default(),
//! )?;
//!
//! let mut clock = FrameClock::default();
//! engine.run_pending(&mut clock, 10);
//! assert_eq!(engine.frame_index(), 10);
//! # Ok::<(), kalaa_fire::FireError>(())
//! ```

#![forbid(unsafe_code)]

pub mod brush;
pub mod config;
pub mod ember;
pub mod engine;
pub mod error;
pub mod host;
pub mod palette;
pub mod scheduler;
pub mod surface;

pub use brush::{Brushstroke, paint_brushstroke};
pub use config::{FireConfig, MAX_EMBERS, SpawnRange};
pub use ember::{Ember, SpawnKind};
pub use engine::{FireEngine, FrameStats};
pub use error::{FireError, Result};
pub use host::{EngineState, FireEnvironment, FireHost};
pub use palette::{Palette, Rgb};
pub use scheduler::{FrameClock, FrameScheduler, ManualScheduler};
pub use surface::{
    DrawCommand, Paint, Path, PathCommand, RasterSurface, RecordingSurface, Rgba, Surface,
    SurfaceSize,
};

/// Identifier of the canvas element the site renders the effect into
pub const FIRE_CANVAS_ID: &str = "fire-canvas";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Page lifecycle around the engine
//!
//! The site restarts the effect whenever a page becomes ready: on the initial
//! content load and again after every client-side navigation. [`FireHost`]
//! maps those signals, plus viewport resizes and granted frames, onto the
//! engine, and keeps it in one of two states.

use log::{debug, info};

use crate::FIRE_CANVAS_ID;
use crate::config::FireConfig;
use crate::engine::{FireEngine, FrameStats};
use crate::error::FireError;
use crate::scheduler::FrameScheduler;
use crate::surface::{Surface, SurfaceSize};

/// Everything the host environment provides to a fresh engine
pub trait FireEnvironment {
    type Surface: Surface;
    type Scheduler: FrameScheduler;
    type Rng: rand::Rng;

    /// Resolve the drawing surface named `id`, if the page has one
    fn locate_surface(&mut self, id: &str) -> Option<Self::Surface>;

    /// Current viewport dimensions
    fn viewport(&self) -> SurfaceSize;

    /// Frame scheduler for a new engine
    fn scheduler(&mut self) -> Self::Scheduler;

    /// Random source for a new engine
    fn rng(&mut self) -> Self::Rng;
}

type EnvEngine<E> = FireEngine<
    <E as FireEnvironment>::Surface,
    <E as FireEnvironment>::Scheduler,
    <E as FireEnvironment>::Rng,
>;

/// Engine lifecycle state
#[derive(Debug, Default)]
pub enum EngineState<S, F, R> {
    /// No engine: never started, surface missing, or torn down
    #[default]
    Detached,
    /// Attached and stepping on every granted frame
    Active(FireEngine<S, F, R>),
}

impl<S, F, R> EngineState<S, F, R> {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Drives engines through the page lifecycle
#[derive(Debug)]
pub struct FireHost<E: FireEnvironment> {
    env: E,
    config: FireConfig,
    surface_id: String,
    state: EngineState<E::Surface, E::Scheduler, E::Rng>,
    starts: u64,
}

impl<E: FireEnvironment> FireHost<E> {
    /// A detached host looking for the site canvas
    pub fn new(env: E, config: FireConfig) -> Self {
        Self::with_surface_id(env, config, FIRE_CANVAS_ID)
    }

    pub fn with_surface_id(env: E, config: FireConfig, surface_id: impl Into<String>) -> Self {
        Self {
            env,
            config,
            surface_id: surface_id.into(),
            state: EngineState::Detached,
            starts: 0,
        }
    }

    /// Initial document content is ready
    pub fn content_ready(&mut self) -> bool {
        self.start()
    }

    /// A client-side navigation finished loading its page
    pub fn page_load(&mut self) -> bool {
        self.start()
    }

    /// Build a fresh engine, discarding any previous one
    ///
    /// A missing surface is not an error for the page: the host simply stays
    /// detached and no frame is requested. Returns whether an engine is now
    /// active.
    fn start(&mut self) -> bool {
        self.state = EngineState::Detached;

        let surface = self.env.locate_surface(&self.surface_id);
        if surface.is_none() {
            debug!("No '{}' surface on this page, fire stays detached", self.surface_id);
            return false;
        }

        let viewport = self.env.viewport();
        let scheduler = self.env.scheduler();
        let rng = self.env.rng();
        match FireEngine::attach(surface, viewport, scheduler, rng, self.config.clone()) {
            Ok(engine) => {
                self.starts += 1;
                info!(
                    "Fire engine #{} started with {} embers",
                    self.starts,
                    engine.ember_count()
                );
                self.state = EngineState::Active(engine);
                true
            }
            Err(FireError::SurfaceNotFound) => false,
            Err(err) => {
                log::warn!("Fire engine not started: {err}");
                false
            }
        }
    }

    /// The viewport changed; the surface follows before the next frame
    pub fn viewport_resized(&mut self) {
        let viewport = self.env.viewport();
        if let EngineState::Active(engine) = &mut self.state {
            engine.resize(viewport);
        }
    }

    /// A frame granted by the host scheduler
    pub fn animation_frame(&mut self, timestamp_ms: f64) -> Option<FrameStats> {
        match &mut self.state {
            EngineState::Active(engine) => Some(engine.frame(timestamp_ms)),
            EngineState::Detached => None,
        }
    }

    /// The surface went away; drop the engine
    pub fn detach(&mut self) {
        if self.state.is_active() {
            debug!("Fire engine detached");
        }
        self.state = EngineState::Detached;
    }

    pub fn state(&self) -> &EngineState<E::Surface, E::Scheduler, E::Rng> {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn engine(&self) -> Option<&EnvEngine<E>> {
        match &self.state {
            EngineState::Active(engine) => Some(engine),
            EngineState::Detached => None,
        }
    }

    pub fn engine_mut(&mut self) -> Option<&mut EnvEngine<E>> {
        match &mut self.state {
            EngineState::Active(engine) => Some(engine),
            EngineState::Detached => None,
        }
    }

    /// Engines successfully started so far
    pub fn starts(&self) -> u64 {
        self.starts
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }
}

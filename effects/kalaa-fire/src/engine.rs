//! Fire engine runtime state

use log::{debug, trace};
use rand::Rng;
use rand::rngs::StdRng;

use crate::brush::{Brushstroke, paint_brushstroke};
use crate::config::FireConfig;
use crate::ember::{Ember, SpawnKind};
use crate::error::{FireError, Result};
use crate::palette::Palette;
use crate::scheduler::{FrameClock, FrameScheduler, ManualScheduler};
use crate::surface::{Surface, SurfaceSize};

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    /// Zero-based index of the frame
    pub frame: u64,
    /// Milliseconds since the previous frame timestamp (informational)
    pub delta_ms: f64,
    /// Embers painted
    pub painted: usize,
    /// Embers replaced in place after expiring
    pub respawned: usize,
    /// Embers appended by the top-up rule
    pub topped_up: usize,
    /// Pool size at the end of the frame
    pub pool_size: usize,
}

/// Ember pool plus everything needed to advance and paint it
///
/// Created by [`attach`](Self::attach), which requests the first frame; the
/// host then calls [`frame`](Self::frame) once per granted frame and each call
/// requests the next one. There is no stop method: dropping the engine (or no
/// longer granting frames) ends the effect.
#[derive(Debug)]
pub struct FireEngine<S, F, R = StdRng> {
    surface: S,
    scheduler: F,
    rng: R,
    config: FireConfig,
    embers: Vec<Ember>,
    palette: Palette,
    /// Animation time, advanced by a fixed step per frame
    time: f64,
    last_frame_ms: f64,
    last_delta_ms: f64,
    frame_index: u64,
}

impl<S: Surface, F: FrameScheduler, R: Rng> FireEngine<S, F, R> {
    /// Attach to a surface resolved by the host and request the first frame
    ///
    /// With no surface this returns [`FireError::SurfaceNotFound`] before
    /// touching the scheduler or the random source.
    pub fn attach(
        surface: Option<S>,
        viewport: SurfaceSize,
        scheduler: F,
        rng: R,
        config: FireConfig,
    ) -> Result<Self> {
        let Some(mut surface) = surface else {
            return Err(FireError::SurfaceNotFound);
        };
        config.validate()?;

        surface.set_size(viewport);
        let palette = Palette::new(config.base_palette.clone());

        let mut engine = Self {
            surface,
            scheduler,
            rng,
            config,
            embers: Vec::new(),
            palette,
            time: 0.0,
            last_frame_ms: 0.0,
            last_delta_ms: 0.0,
            frame_index: 0,
        };
        let seeded = engine.seed_embers();
        debug!(
            "Fire engine attached to {} surface with {} embers",
            viewport, seeded
        );

        engine.scheduler.request_frame();
        Ok(engine)
    }

    /// Resynchronize the surface with a new viewport
    ///
    /// Embers in flight keep their position and size; only later spawns use
    /// the new bounds.
    pub fn resize(&mut self, viewport: SurfaceSize) {
        if self.surface.size() == viewport {
            return;
        }
        debug!("Fire surface resized to {}", viewport);
        self.surface.set_size(viewport);
    }

    /// Run one frame: clear, advance time and palette, update and paint
    /// every ember, top up the pool, then request the next frame
    ///
    /// `timestamp_ms` only feeds the recorded delta; motion advances by a
    /// fixed amount per frame regardless of the display refresh rate.
    pub fn frame(&mut self, timestamp_ms: f64) -> FrameStats {
        let delta_ms = timestamp_ms - self.last_frame_ms;
        self.last_frame_ms = timestamp_ms;
        self.last_delta_ms = delta_ms;

        self.surface.clear();
        self.time += self.config.time_step;
        self.palette.update(self.time, self.config.palette_variation);

        let (painted, respawned) = self.update_embers();

        let topped_up = if self.embers.len() < self.config.min_embers {
            self.top_up()
        } else {
            0
        };

        let stats = FrameStats {
            frame: self.frame_index,
            delta_ms,
            painted,
            respawned,
            topped_up,
            pool_size: self.embers.len(),
        };
        trace!("{stats:?}");
        self.frame_index += 1;

        self.scheduler.request_frame();
        stats
    }

    /// Advance, paint and recycle every ember in pool order
    ///
    /// Painting is skipped once the lifespan reaches zero, so an ember never
    /// shows a final frame after burning out. Expired embers are replaced in
    /// place, after the paint decision.
    fn update_embers(&mut self) -> (usize, usize) {
        let bounds = self.surface.size();
        let life_divisor = self.config.life_divisor;
        let despawn_y = self.config.despawn_y;
        let palette_len = self.palette.len();

        let mut painted = 0;
        let mut respawned = 0;
        for ember in self.embers.iter_mut() {
            ember.advance(self.time);

            if ember.is_alive() {
                if let Some(color) = self.palette.color(ember.color_index) {
                    let stroke = Brushstroke {
                        x: ember.x,
                        y: ember.y,
                        size: ember.current_size(life_divisor),
                        rotation: ember.rotation,
                        color,
                        opacity: ember.current_opacity(life_divisor),
                    };
                    paint_brushstroke(&mut self.surface, &stroke);
                    painted += 1;
                }
            }

            if ember.is_expired(despawn_y) {
                *ember = Ember::spawn(
                    &mut self.rng,
                    bounds,
                    palette_len,
                    &self.config,
                    SpawnKind::Respawn,
                );
                respawned += 1;
            }
        }
        (painted, respawned)
    }

    /// Append the density-based batch for the current surface
    fn seed_embers(&mut self) -> usize {
        let bounds = self.surface.size();
        let count = self.config.embers_for_area(bounds.area());
        self.spawn_seeded(bounds, count);
        count
    }

    /// Append enough embers to reach the floor, at least one density batch
    fn top_up(&mut self) -> usize {
        let bounds = self.surface.size();
        let batch = self.config.embers_for_area(bounds.area());
        let missing = self.config.min_embers.saturating_sub(self.embers.len());
        let count = batch.max(missing);
        self.spawn_seeded(bounds, count);
        debug!(
            "Topped up fire pool with {} embers (now {})",
            count,
            self.embers.len()
        );
        count
    }

    fn spawn_seeded(&mut self, bounds: SurfaceSize, count: usize) {
        let palette_len = self.palette.len();
        self.embers.reserve(count);
        for _ in 0..count {
            let ember = Ember::spawn(
                &mut self.rng,
                bounds,
                palette_len,
                &self.config,
                SpawnKind::Seed,
            );
            self.embers.push(ember);
        }
    }
}

impl<S, F, R> FireEngine<S, F, R> {
    pub fn embers(&self) -> &[Ember] {
        &self.embers
    }

    /// Mutable access to the pool, for hosts that script particular states
    pub fn embers_mut(&mut self) -> &mut Vec<Ember> {
        &mut self.embers
    }

    pub fn ember_count(&self) -> usize {
        self.embers.len()
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    /// Animation time accumulated so far
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Milliseconds between the last two frame timestamps
    pub fn last_delta_ms(&self) -> f64 {
        self.last_delta_ms
    }

    /// Frames run so far
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Give back the surface and scheduler
    pub fn into_parts(self) -> (S, F) {
        (self.surface, self.scheduler)
    }
}

impl<S: Surface, R: Rng> FireEngine<S, ManualScheduler, R> {
    /// Grant pending frame requests, at most `limit` of them
    ///
    /// Each granted frame is stamped by `clock`. Returns the number of frames
    /// run; since every frame requests the next, this is `limit` for an
    /// attached engine.
    pub fn run_pending(&mut self, clock: &mut FrameClock, limit: usize) -> usize {
        let mut ran = 0;
        while ran < limit && self.scheduler.take_request() {
            self.frame(clock.tick());
            ran += 1;
        }
        ran
    }
}

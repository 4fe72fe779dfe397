//! Individual ember representation

use std::f64::consts::TAU;

use rand::Rng;
use serde::Serialize;

use crate::config::FireConfig;
use crate::surface::SurfaceSize;

/// Where a freshly generated ember comes from
///
/// Seeded embers (initial pool and top-ups) start up to `seed_y_jitter`
/// below the surface; respawned embers replace an expired one in place and
/// start up to `respawn_y_jitter` below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Seed,
    Respawn,
}

/// A single ember in the pool
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Ember {
    /// Surface-space position
    pub x: f64,
    pub y: f64,
    /// Nominal brushstroke size before the lifespan fade
    pub size: f64,
    /// Nominal opacity before the lifespan fade
    pub opacity: f64,
    /// Constant drift per frame; `speed_y` is negative (upward)
    pub speed_x: f64,
    pub speed_y: f64,
    /// Orientation in radians and its change per frame
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Horizontal sinusoidal sway amplitude, frequency and phase
    pub sway: f64,
    pub sway_speed: f64,
    pub sway_offset: f64,
    /// Index into the palette, fixed for the ember lifetime
    pub color_index: usize,
    /// Countdown decremented once per frame
    pub lifespan: f64,
}

impl Ember {
    /// Generate a fresh ember below the bottom edge of `bounds`
    ///
    /// Fields are drawn in a fixed order so a seeded generator reproduces
    /// the same pool.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: SurfaceSize,
        palette_len: usize,
        config: &FireConfig,
        kind: SpawnKind,
    ) -> Self {
        let jitter = match kind {
            SpawnKind::Seed => config.seed_y_jitter,
            SpawnKind::Respawn => config.respawn_y_jitter,
        };
        let width = f64::from(bounds.width);
        let height = f64::from(bounds.height);

        let x = rng.random::<f64>() * width;
        let y = height + rng.random::<f64>() * jitter;
        let size = config.size.sample(rng.random());
        let opacity = config.opacity.sample(rng.random());
        let speed_x = config.speed_x.sample(rng.random());
        let speed_y = config.speed_y.sample(rng.random());
        let color_index = color_index(rng.random(), palette_len);
        let rotation = rng.random::<f64>() * TAU;
        let rotation_speed = config.rotation_speed.sample(rng.random());
        let sway = config.sway.sample(rng.random());
        let sway_speed = config.sway_speed.sample(rng.random());
        let sway_offset = rng.random::<f64>() * TAU;
        let lifespan = config.lifespan.sample(rng.random());

        Self {
            x,
            y,
            size,
            opacity,
            speed_x,
            speed_y,
            rotation,
            rotation_speed,
            sway,
            sway_speed,
            sway_offset,
            color_index,
            lifespan,
        }
    }

    /// Advance one frame at animation time `time`
    ///
    /// Motion is a fixed increment per frame, independent of the wall-clock
    /// delta between frames.
    pub fn advance(&mut self, time: f64) {
        self.x += self.speed_x + (time * self.sway_speed + self.sway_offset).sin() * self.sway;
        self.y += self.speed_y;
        self.rotation += self.rotation_speed;
        self.lifespan -= 1.0;
    }

    /// Remaining lifespan over `life_divisor`
    ///
    /// Not clamped: an ember spawned with a lifespan above the divisor is
    /// drawn larger and more opaque than nominal until it decays below it.
    #[inline]
    pub fn life_factor(&self, life_divisor: f64) -> f64 {
        self.lifespan / life_divisor
    }

    /// Size after the lifespan fade
    pub fn current_size(&self, life_divisor: f64) -> f64 {
        self.size * self.life_factor(life_divisor)
    }

    /// Opacity after the lifespan fade
    pub fn current_opacity(&self, life_divisor: f64) -> f64 {
        self.opacity * self.life_factor(life_divisor)
    }

    /// Whether the ember is still painted
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.lifespan > 0.0
    }

    /// Whether the ember must be replaced: burnt out or drifted above `despawn_y`
    #[inline]
    pub fn is_expired(&self, despawn_y: f64) -> bool {
        self.lifespan <= 0.0 || self.y < despawn_y
    }
}

/// `floor(unit * len)` kept below `len`
fn color_index(unit: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    ((unit * len as f64).floor() as usize).min(len - 1)
}

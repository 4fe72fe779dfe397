//! Fire palette with a per-frame channel oscillation

use serde::{Deserialize, Serialize};

use crate::surface::Rgba;

/// An RGB color with floating-point channels in `[0, 255]`
///
/// Channels are kept unrounded; surfaces quantize when they paint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha value
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba::new(self.r, self.g, self.b, a)
    }
}

/// Gold
pub const GOLD: Rgb = Rgb::new(245.0, 167.0, 66.0);
/// Orange
pub const ORANGE: Rgb = Rgb::new(232.0, 90.0, 25.0);
/// Bright red-orange
pub const RED_ORANGE: Rgb = Rgb::new(255.0, 62.0, 0.0);
/// Deep red
pub const DEEP_RED: Rgb = Rgb::new(191.0, 34.0, 34.0);
/// Purple shadow
pub const PURPLE_SHADOW: Rgb = Rgb::new(80.0, 20.0, 70.0);

/// The five base colors of the fire effect, hottest first
pub const BASE_PALETTE: [Rgb; 5] = [GOLD, ORANGE, RED_ORANGE, DEEP_RED, PURPLE_SHADOW];

/// Phase step between consecutive base colors
const INDEX_PHASE: f64 = 0.5;
/// Extra phase of the green channel
const GREEN_PHASE: f64 = 1.0;
/// Extra phase of the blue channel
const BLUE_PHASE: f64 = 2.0;

/// Base colors plus the current, oscillated palette
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    base: Vec<Rgb>,
    current: Vec<Rgb>,
}

impl Palette {
    /// Create a palette whose current colors start as a copy of the base
    pub fn new(base: Vec<Rgb>) -> Self {
        let current = base.clone();
        Self { base, current }
    }

    /// Number of colors (constant for the palette lifetime)
    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn base(&self) -> &[Rgb] {
        &self.base
    }

    pub fn current(&self) -> &[Rgb] {
        &self.current
    }

    /// Current color at `index`, if in range
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.current.get(index).copied()
    }

    /// Recompute the current palette for animation time `time`
    ///
    /// Each channel oscillates around its base value by `variation` with a
    /// phase depending on the color index and the channel, then is clamped
    /// into `[0, 255]`.
    pub fn update(&mut self, time: f64, variation: f64) {
        for (index, (base, current)) in self.base.iter().zip(self.current.iter_mut()).enumerate() {
            *current = shifted(*base, time + index as f64 * INDEX_PHASE, variation);
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(BASE_PALETTE.to_vec())
    }
}

fn shifted(color: Rgb, t: f64, variation: f64) -> Rgb {
    Rgb {
        r: clamp_channel(color.r + t.sin() * variation),
        g: clamp_channel(color.g + (t + GREEN_PHASE).sin() * variation),
        b: clamp_channel(color.b + (t + BLUE_PHASE).sin() * variation),
    }
}

/// Clamp a channel into `[0, 255]`; NaN collapses to 0
#[inline]
pub fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

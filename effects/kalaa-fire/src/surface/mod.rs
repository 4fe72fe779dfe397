//! Drawing surfaces the engine paints onto
//!
//! [`Surface`] is a small subset of a 2D canvas context: a transform stack,
//! full clears and path fills. The engine never looks a surface up by name;
//! the host resolves it and hands it over.

mod paint;
mod raster;
mod recording;

pub use paint::{ColorStop, Paint, Path, PathCommand, Rgba};
pub use raster::RasterSurface;
pub use recording::{DrawCommand, RecordingSurface};

use serde::{Deserialize, Serialize};

/// Pixel dimensions of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in square pixels
    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

impl std::fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for SurfaceSize {
    type Err = String;

    /// Parse `WIDTHxHEIGHT`, e.g. `1280x720`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = width
            .trim()
            .parse()
            .map_err(|e| format!("invalid width '{width}': {e}"))?;
        let height = height
            .trim()
            .parse()
            .map_err(|e| format!("invalid height '{height}': {e}"))?;
        Ok(Self { width, height })
    }
}

/// A 2D raster target with canvas-like state handling
pub trait Surface {
    /// Current pixel dimensions
    fn size(&self) -> SurfaceSize;

    /// Resize the backing store; contents are discarded
    fn set_size(&mut self, size: SurfaceSize);

    /// Clear every pixel to transparent
    fn clear(&mut self);

    /// Push the current transform onto the state stack
    fn save(&mut self);

    /// Pop the transform pushed by the matching [`save`](Surface::save)
    fn restore(&mut self);

    /// Translate the current transform
    fn translate(&mut self, x: f64, y: f64);

    /// Rotate the current transform by `angle` radians
    fn rotate(&mut self, angle: f64);

    /// Fill `path` (non-zero winding) with `paint` under the current transform
    fn fill_path(&mut self, path: &Path, paint: &Paint);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> SurfaceSize {
        (**self).size()
    }

    fn set_size(&mut self, size: SurfaceSize) {
        (**self).set_size(size);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn save(&mut self) {
        (**self).save();
    }

    fn restore(&mut self) {
        (**self).restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        (**self).translate(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        (**self).rotate(angle);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        (**self).fill_path(path, paint);
    }
}

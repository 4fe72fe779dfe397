//! Paths and paints handed to surfaces

use std::fmt;

use glam::DVec2;
use serde::Serialize;

/// A color with `[0, 255]` channels and `[0, 1]` alpha
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// CSS color syntax, as assigned to a canvas `fillStyle`
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A color stop at `offset` in `[0, 1]` along a gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Fill style of a path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid(Rgba),
    /// Gradient between two points in the coordinate space of the fill
    LinearGradient {
        start: DVec2,
        end: DVec2,
        stops: Vec<ColorStop>,
    },
}

/// A single path command
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo {
        to: DVec2,
    },
    QuadTo {
        control: DVec2,
        to: DVec2,
    },
    /// Full or partial ellipse starting a new subpath
    Ellipse {
        center: DVec2,
        radii: DVec2,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Close,
}

/// A sequence of subpaths
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo {
            to: DVec2::new(x, y),
        });
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::QuadTo {
            control: DVec2::new(cx, cy),
            to: DVec2::new(x, y),
        });
        self
    }

    pub fn ellipse(
        mut self,
        center: DVec2,
        radii: DVec2,
        rotation: f64,
        start: f64,
        end: f64,
    ) -> Self {
        self.commands.push(PathCommand::Ellipse {
            center,
            radii,
            rotation,
            start_angle: start,
            end_angle: end,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

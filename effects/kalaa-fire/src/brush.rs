//! Flame-like brushstroke painting
//!
//! A brushstroke is a curved teardrop filled with a vertical gradient that is
//! transparent at both tips and peaks at mid-height, plus a smaller elliptical
//! accent on top for texture. Painting never touches engine state.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::palette::Rgb;
use crate::surface::{ColorStop, Paint, Path, Surface};

/// Opacity of the accent ellipse relative to the stroke
pub const ACCENT_OPACITY: f64 = 0.7;

/// One ember as it is painted this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brushstroke {
    pub x: f64,
    pub y: f64,
    /// Faded size (nominal size times life factor)
    pub size: f64,
    pub rotation: f64,
    pub color: Rgb,
    /// Faded opacity (nominal opacity times life factor)
    pub opacity: f64,
}

impl Brushstroke {
    /// Outline of the stroke in local coordinates
    pub fn outline(&self) -> Path {
        let s = self.size;
        Path::new()
            .move_to(-s / 3.0, -s)
            .quad_to(s / 2.0, 0.0, -s / 3.0, s)
            .quad_to(s / 2.0, 0.0, s / 3.0, -s / 2.0)
            .close()
    }

    /// Vertical gradient: transparent tips, `opacity` at the middle
    pub fn gradient(&self) -> Paint {
        let s = self.size;
        let edge = self.color.with_alpha(0.0);
        Paint::LinearGradient {
            start: DVec2::new(0.0, -s),
            end: DVec2::new(0.0, s),
            stops: vec![
                ColorStop {
                    offset: 0.0,
                    color: edge,
                },
                ColorStop {
                    offset: 0.5,
                    color: self.color.with_alpha(self.opacity),
                },
                ColorStop {
                    offset: 1.0,
                    color: edge,
                },
            ],
        }
    }

    /// Accent ellipse in local coordinates
    pub fn accent(&self) -> Path {
        let s = self.size;
        Path::new().ellipse(
            DVec2::new(s / 6.0, 0.0),
            DVec2::new(s / 4.0, s / 2.0),
            0.0,
            0.0,
            TAU,
        )
    }

    pub fn accent_paint(&self) -> Paint {
        Paint::Solid(self.color.with_alpha(self.opacity * ACCENT_OPACITY))
    }
}

/// Paint `stroke` onto `surface`
///
/// The surface transform is saved before and restored after, so strokes do
/// not leak their translation or rotation into each other.
pub fn paint_brushstroke<S: Surface + ?Sized>(surface: &mut S, stroke: &Brushstroke) {
    surface.save();
    surface.translate(stroke.x, stroke.y);
    surface.rotate(stroke.rotation);
    surface.fill_path(&stroke.outline(), &stroke.gradient());
    surface.fill_path(&stroke.accent(), &stroke.accent_paint());
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{
        DrawCommand, PathCommand, RasterSurface, RecordingSurface, Rgba, SurfaceSize,
    };
    use pretty_assertions::assert_eq;

    fn stroke() -> Brushstroke {
        Brushstroke {
            x: 40.0,
            y: 30.0,
            size: 12.0,
            rotation: 0.25,
            color: Rgb::new(245.0, 167.0, 66.0),
            opacity: 0.5,
        }
    }

    #[test]
    fn test_command_sequence() {
        let mut surface = RecordingSurface::new(SurfaceSize::new(100, 100));
        paint_brushstroke(&mut surface, &stroke());

        let commands = surface.commands();
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], DrawCommand::Save);
        assert_eq!(commands[1], DrawCommand::Translate { x: 40.0, y: 30.0 });
        assert_eq!(commands[2], DrawCommand::Rotate { angle: 0.25 });
        assert!(matches!(commands[3], DrawCommand::Fill { .. }));
        assert!(matches!(commands[4], DrawCommand::Fill { .. }));
        assert_eq!(commands[5], DrawCommand::Restore);
        assert!(surface.is_balanced());
    }

    #[test]
    fn test_outline_geometry() {
        let outline = stroke().outline();
        assert_eq!(
            outline.commands(),
            &[
                PathCommand::MoveTo {
                    to: DVec2::new(-4.0, -12.0)
                },
                PathCommand::QuadTo {
                    control: DVec2::new(6.0, 0.0),
                    to: DVec2::new(-4.0, 12.0)
                },
                PathCommand::QuadTo {
                    control: DVec2::new(6.0, 0.0),
                    to: DVec2::new(4.0, -6.0)
                },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_gradient_and_accent_colors() {
        let stroke = stroke();
        let Paint::LinearGradient { start, end, stops } = stroke.gradient() else {
            unreachable!("brushstroke gradient is linear");
        };
        assert_eq!(start, DVec2::new(0.0, -12.0));
        assert_eq!(end, DVec2::new(0.0, 12.0));
        assert_eq!(stops[0].color.a, 0.0);
        assert_eq!(stops[1].color, Rgba::new(245.0, 167.0, 66.0, 0.5));
        assert_eq!(stops[2].color.a, 0.0);

        assert_eq!(
            stroke.accent_paint(),
            Paint::Solid(Rgba::new(245.0, 167.0, 66.0, 0.5 * 0.7))
        );
    }

    #[test]
    fn test_rasterized_stroke_lights_center() {
        let mut surface = RasterSurface::new(SurfaceSize::new(80, 60));
        paint_brushstroke(
            &mut surface,
            &Brushstroke {
                rotation: 0.0,
                size: 20.0,
                opacity: 1.0,
                ..stroke()
            },
        );

        let center = surface.pixel(43, 30).expect("inside surface");
        assert!(center[3] > 0);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(79, 59), Some([0, 0, 0, 0]));
    }
}

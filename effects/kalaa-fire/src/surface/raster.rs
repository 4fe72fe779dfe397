//! Software RGBA surface rendered by `tiny-skia`
//!
//! Canvas state maps onto a [`Transform`] stack; paths and gradients are
//! translated into their `tiny-skia` counterparts and filled with the non-zero
//! rule. Pixels are stored premultiplied and exported straight.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path as FsPath;

use glam::DVec2;
use image::{Rgba as ImageRgba, RgbaImage};
use log::debug;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint as SkiaPaint, PathBuilder, Pixmap,
    PixmapPaint, Point, Rect, Shader, SpreadMode, Transform,
};

use super::{Paint, Path, PathCommand, Rgba, Surface, SurfaceSize};
use crate::error::Result;

/// Raster surface backed by a `tiny-skia` pixmap
///
/// A zero-sized surface has no pixmap and ignores every fill.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    size: SurfaceSize,
    pixmap: Option<Pixmap>,
    transform: Transform,
    stack: Vec<Transform>,
}

impl RasterSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixmap: allocate(size),
            transform: Transform::identity(),
            stack: Vec::new(),
        }
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// The current frame with straight alpha
    pub fn to_image(&self) -> RgbaImage {
        match &self.pixmap {
            Some(pixmap) => rgba_image(pixmap),
            None => RgbaImage::new(self.size.width, self.size.height),
        }
    }

    /// Pixel at `(x, y)` with straight alpha, if inside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Number of pixels with non-zero alpha
    pub fn coverage(&self) -> usize {
        self.pixmap.as_ref().map_or(0, |pixmap| {
            pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
        })
    }

    /// Composite the frame over an opaque background color
    pub fn flatten_onto(&self, background: [u8; 3]) -> RgbaImage {
        let [r, g, b] = background;
        let Some(mut canvas) = allocate(self.size) else {
            let opaque = ImageRgba([r, g, b, 255]);
            return RgbaImage::from_pixel(self.size.width, self.size.height, opaque);
        };
        canvas.fill(Color::from_rgba8(r, g, b, 255));
        if let Some(frame) = &self.pixmap {
            canvas.draw_pixmap(
                0,
                0,
                frame.as_ref(),
                &PixmapPaint::default(),
                Transform::identity(),
                None,
            );
        }
        rgba_image(&canvas)
    }

    /// Write the current frame as PNG
    pub fn save_png<P: AsRef<FsPath>>(&self, path: P) -> Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

fn allocate(size: SurfaceSize) -> Option<Pixmap> {
    let pixmap = Pixmap::new(size.width, size.height);
    if pixmap.is_none() && size.width > 0 && size.height > 0 {
        debug!("Cannot allocate a {size} pixmap, surface stays blank");
    }
    pixmap
}

fn rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = ImageRgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

/// Clamp a value into `[0, 1]`, mapping NaN to zero
fn unit(value: f64) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0) as f32
    }
}

fn skia_color(color: &Rgba) -> Color {
    Color::from_rgba(
        unit(color.r / 255.0),
        unit(color.g / 255.0),
        unit(color.b / 255.0),
        unit(color.a),
    )
    .unwrap_or(Color::TRANSPARENT)
}

fn skia_point(point: DVec2) -> Point {
    Point::from_xy(point.x as f32, point.y as f32)
}

fn skia_shader(paint: &Paint) -> Option<Shader<'static>> {
    match paint {
        Paint::Solid(color) => Some(Shader::SolidColor(skia_color(color))),
        Paint::LinearGradient { start, end, stops } => LinearGradient::new(
            skia_point(*start),
            skia_point(*end),
            stops
                .iter()
                .map(|stop| GradientStop::new(unit(stop.offset), skia_color(&stop.color)))
                .collect(),
            SpreadMode::Pad,
            Transform::identity(),
        ),
    }
}

/// Build a `tiny-skia` path; `None` when nothing fillable remains
fn skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo { to } => builder.move_to(to.x as f32, to.y as f32),
            PathCommand::QuadTo { control, to } => {
                builder.quad_to(control.x as f32, control.y as f32, to.x as f32, to.y as f32);
            }
            PathCommand::Ellipse {
                center,
                radii,
                rotation,
                start_angle,
                end_angle,
            } => push_ellipse(&mut builder, center, radii, rotation, start_angle, end_angle),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}

/// Append an elliptical arc as its own subpath
///
/// Full unrotated ellipses go through `push_oval`; anything else is split
/// into conic segments of at most a quarter turn.
fn push_ellipse(
    builder: &mut PathBuilder,
    center: DVec2,
    radii: DVec2,
    rotation: f64,
    start: f64,
    end: f64,
) {
    let sweep = end - start;
    if sweep.abs() >= TAU && rotation.abs() <= f64::EPSILON {
        let corner = center - radii;
        if let Some(oval) = Rect::from_xywh(
            corner.x as f32,
            corner.y as f32,
            (radii.x * 2.0) as f32,
            (radii.y * 2.0) as f32,
        ) {
            builder.push_oval(oval);
        }
        return;
    }

    let sweep = sweep.clamp(-TAU, TAU);
    let (sin_r, cos_r) = rotation.sin_cos();
    let on_ellipse = |angle: f64, scale: f64| {
        let local = DVec2::new(radii.x * angle.cos(), radii.y * angle.sin()) * scale;
        center + DVec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r)
    };

    let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0);
    let step = sweep / segments;
    let half = step / 2.0;
    let weight = half.cos();

    let first = on_ellipse(start, 1.0);
    builder.move_to(first.x as f32, first.y as f32);
    for i in 0..segments as usize {
        let from = start + step * i as f64;
        let control = on_ellipse(from + half, 1.0 / weight);
        let to = on_ellipse(from + step, 1.0);
        builder.conic_to(
            control.x as f32,
            control.y as f32,
            to.x as f32,
            to.y as f32,
            weight as f32,
        );
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_size(&mut self, size: SurfaceSize) {
        // Resizing a canvas resets its pixels and its state
        self.size = size;
        self.pixmap = allocate(size);
        self.transform = Transform::identity();
        self.stack.clear();
    }

    fn clear(&mut self) {
        if let Some(pixmap) = &mut self.pixmap {
            pixmap.fill(Color::TRANSPARENT);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.transform = self
            .transform
            .pre_concat(Transform::from_translate(x as f32, y as f32));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform = self
            .transform
            .pre_concat(Transform::from_rotate(angle.to_degrees() as f32));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let Some(pixmap) = &mut self.pixmap else {
            return;
        };
        let (Some(path), Some(shader)) = (skia_path(path), skia_shader(paint)) else {
            return;
        };
        let paint = SkiaPaint {
            shader,
            anti_alias: true,
            ..SkiaPaint::default()
        };
        pixmap.fill_path(&path, &paint, FillRule::Winding, self.transform, None);
    }
}

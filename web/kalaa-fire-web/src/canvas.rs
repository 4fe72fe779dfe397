//! `CanvasRenderingContext2d` as an engine surface

use kalaa_fire::surface::ColorStop;
use kalaa_fire::{Paint, Path, PathCommand, Surface, SurfaceSize};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::runner::report_canvas_error;

/// A `<canvas>` element and its 2D context
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Find the canvas with `id` in `document` and open its 2D context
    pub fn find(document: &Document, id: &str) -> Option<Self> {
        let canvas = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, context })
    }

    /// Whether the element is still part of the page
    pub fn is_connected(&self) -> bool {
        self.canvas.is_connected()
    }

    fn trace(&self, path: &Path) {
        let ctx = &self.context;
        ctx.begin_path();
        for command in path.commands() {
            match *command {
                PathCommand::MoveTo { to } => ctx.move_to(to.x, to.y),
                PathCommand::QuadTo { control, to } => {
                    ctx.quadratic_curve_to(control.x, control.y, to.x, to.y);
                }
                PathCommand::Ellipse {
                    center,
                    radii,
                    rotation,
                    start_angle,
                    end_angle,
                } => {
                    // Negative radii throw; the engine never paints those
                    let drawn = ctx.ellipse(
                        center.x,
                        center.y,
                        radii.x.abs(),
                        radii.y.abs(),
                        rotation,
                        start_angle,
                        end_angle,
                    );
                    report_canvas_error("ellipse", drawn);
                }
                PathCommand::Close => ctx.close_path(),
            }
        }
    }

    fn apply_paint(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.context.set_fill_style_str(&color.to_string()),
            Paint::LinearGradient { start, end, stops } => {
                let gradient = self
                    .context
                    .create_linear_gradient(start.x, start.y, end.x, end.y);
                for ColorStop { offset, color } in stops {
                    report_canvas_error(
                        "addColorStop",
                        gradient.add_color_stop(*offset as f32, &color.to_string()),
                    );
                }
                self.context.set_fill_style_canvas_gradient(&gradient);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.context
            .clear_rect(0.0, 0.0, f64::from(size.width), f64::from(size.height));
    }

    fn save(&mut self) {
        self.context.save();
    }

    fn restore(&mut self) {
        self.context.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        report_canvas_error("translate", self.context.translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        report_canvas_error("rotate", self.context.rotate(angle));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.trace(path);
        self.apply_paint(paint);
        self.context.fill();
    }
}

// surface.rs - immediate-mode 2D drawing surface
//
// `Canvas` rasterizes into a tiny-skia `Pixmap` on the CPU; the renderer only
// uploads the finished pixels.

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::Color;

/// Path-based 2D drawing context, modelled on an HTML canvas.
pub trait DrawingSurface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    ClosePath,
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    Fill,
    Stroke,
}

/// Keeps the op stream instead of drawing it.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl DrawingSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }
    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }
    fn set_fill_color(&mut self, color: Color) {
        self.ops.push(DrawOp::SetFillColor(color));
    }
    fn set_stroke_color(&mut self, color: Color) {
        self.ops.push(DrawOp::SetStrokeColor(color));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::SetLineWidth(width));
    }
    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }
    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    // Hard edges, so a pixel is either inside a quad or not.
    paint.anti_alias = false;
    paint
}

/// Raster surface backed by a `Pixmap`. Fills use the non-zero winding rule;
/// strokes have round caps and joins.
pub struct Canvas {
    pixmap: Pixmap,
    path: PathBuilder,
    // A subpath is open, so `line_to` extends it instead of starting one.
    has_current_point: bool,
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
}

impl Canvas {
    /// `None` if either side is zero or the pixel buffer cannot be sized.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            path: PathBuilder::new(),
            has_current_point: false,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Premultiplied RGBA8 rows, top to bottom.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let c = self.pixmap.pixel(x, y).expect("pixel in bounds").demultiply();
        Color([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Overwrites every pixel and drops the current path.
    pub fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color.0;
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        self.begin_path();
    }
}

impl DrawingSurface for Canvas {
    fn begin_path(&mut self) {
        self.path.clear();
        self.has_current_point = false;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.path.move_to(x as f32, y as f32);
        self.has_current_point = true;
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        if self.has_current_point {
            self.path.line_to(x as f32, y as f32);
        } else {
            self.move_to(x, y);
        }
    }

    fn close_path(&mut self) {
        // Drawing continues from the start of the closed subpath.
        if self.has_current_point {
            self.path.close();
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width as f32;
        }
    }

    fn fill(&mut self) {
        // Every subpath is implicitly closed for filling.
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint_for(self.fill_color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke(&mut self) {
        let Some(path) = self.path.clone().finish() else {
            return;
        };
        let stroke = Stroke {
            width: self.line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint_for(self.stroke_color),
            &stroke,
            Transform::identity(),
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(c: &mut Canvas, x0: f64, y0: f64, x1: f64, y1: f64) {
        c.begin_path();
        c.move_to(x0, y0);
        c.line_to(x1, y0);
        c.line_to(x1, y1);
        c.line_to(x0, y1);
        c.close_path();
    }

    #[test]
    fn fill_covers_interior_only() {
        let mut c = Canvas::new(20, 20).unwrap();
        c.clear(Color::WHITE);
        square(&mut c, 5.0, 5.0, 15.0, 15.0);
        c.set_fill_color(Color::BLUE);
        c.fill();

        assert_eq!(c.pixel(5, 5), Color::BLUE);
        assert_eq!(c.pixel(14, 14), Color::BLUE);
        assert_eq!(c.pixel(4, 10), Color::WHITE);
        assert_eq!(c.pixel(15, 10), Color::WHITE);
        assert_eq!(c.pixel(10, 15), Color::WHITE);
    }

    #[test]
    fn stroke_draws_outline_not_interior() {
        let mut c = Canvas::new(40, 40).unwrap();
        c.clear(Color::WHITE);
        square(&mut c, 10.0, 10.0, 30.0, 30.0);
        c.set_stroke_color(Color::BLUE);
        c.set_line_width(2.0);
        c.stroke();

        // Band is one pixel either side of the edge at x = 10.
        assert_eq!(c.pixel(9, 20), Color::BLUE);
        assert_eq!(c.pixel(10, 20), Color::BLUE);
        assert_eq!(c.pixel(11, 20), Color::WHITE);
        assert_eq!(c.pixel(20, 20), Color::WHITE);
        // Closing edge back to the start (x = 10, from y = 30 to y = 10).
        assert_eq!(c.pixel(10, 25), Color::BLUE);
        // Top edge
        assert_eq!(c.pixel(20, 9), Color::BLUE);
    }

    #[test]
    fn begin_path_forgets_previous_subpaths() {
        let mut c = Canvas::new(30, 10).unwrap();
        c.clear(Color::WHITE);
        square(&mut c, 0.0, 0.0, 10.0, 10.0);
        c.set_fill_color(Color::BLUE);
        c.fill();

        square(&mut c, 20.0, 0.0, 30.0, 10.0);
        c.set_fill_color(Color::BLACK);
        c.fill();

        assert_eq!(c.pixel(5, 5), Color::BLUE);
        assert_eq!(c.pixel(25, 5), Color::BLACK);
    }

    #[test]
    fn geometry_outside_bounds_is_clipped() {
        let mut c = Canvas::new(10, 10).unwrap();
        c.clear(Color::WHITE);
        square(&mut c, -50.0, -50.0, 5.0, 200.0);
        c.set_fill_color(Color::BLUE);
        c.fill();
        c.set_stroke_color(Color::BLACK);
        c.stroke();

        assert_eq!(c.pixel(0, 0), Color::BLUE);
        assert_eq!(c.pixel(9, 9), Color::WHITE);
    }

    #[test]
    fn non_finite_points_are_ignored() {
        let mut c = Canvas::new(10, 10).unwrap();
        c.clear(Color::WHITE);
        c.begin_path();
        c.move_to(f64::NAN, 0.0);
        c.line_to(f64::INFINITY, 5.0);
        c.close_path();
        c.set_fill_color(Color::BLUE);
        c.fill();
        c.stroke();
        assert!(c.data().chunks_exact(4).all(|p| p == Color::WHITE.0));
    }

    #[test]
    fn empty_canvas_is_refused() {
        assert!(Canvas::new(0, 10).is_none());
        assert!(Canvas::new(10, 0).is_none());
        let c = Canvas::new(3, 2).unwrap();
        assert_eq!(c.data().len(), 3 * 2 * 4);
    }

    #[test]
    fn line_to_without_current_point_starts_a_subpath() {
        let mut c = Canvas::new(20, 20).unwrap();
        c.clear(Color::WHITE);
        c.begin_path();
        c.line_to(2.0, 2.0);
        c.line_to(18.0, 2.0);
        c.line_to(18.0, 18.0);
        c.line_to(2.0, 18.0);
        c.set_fill_color(Color::BLUE);
        c.fill();

        assert_eq!(c.pixel(10, 10), Color::BLUE);
        assert_eq!(c.pixel(1, 10), Color::WHITE);
        assert_eq!(c.pixel(0, 0), Color::WHITE);
    }

    #[test]
    fn translucent_fill_blends() {
        let mut c = Canvas::new(4, 4).unwrap();
        c.clear(Color::WHITE);
        square(&mut c, 0.0, 0.0, 4.0, 4.0);
        c.set_fill_color(Color([0, 0, 0, 128]));
        c.fill();
        let p = c.pixel(1, 1);
        assert_eq!(p.0[3], 255);
        assert!(p.0[0] > 120 && p.0[0] < 135, "{p:?}");
    }

    #[test]
    fn recording_surface_keeps_order() {
        let mut r = RecordingSurface::new();
        r.begin_path();
        r.move_to(1.0, 2.0);
        r.line_to(3.0, 4.0);
        r.close_path();
        r.fill();
        assert_eq!(
            r.ops,
            vec![
                DrawOp::BeginPath,
                DrawOp::MoveTo(1.0, 2.0),
                DrawOp::LineTo(3.0, 4.0),
                DrawOp::ClosePath,
                DrawOp::Fill,
            ]
        );
    }
}

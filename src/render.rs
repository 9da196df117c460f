// render.rs - paint pass: scene quads -> view angles -> canvas polygons

use log::debug;

use crate::config::{Color, ViewerConfig};
use crate::projection::{project, ViewAngle};
use crate::scene::{Quad, Scene};
use crate::surface::DrawingSurface;
use crate::viewer::ViewerPose;

/// Maps view-relative angles to drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub size: u32,
    pub center: [f64; 2],
    pub zoom: f64,
    pub stroke_width: f64,
    pub stroke_color: Color,
}

#[cfg(test)]
impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            size: 1000,
            center: [500.0, 500.0],
            zoom: 10.0,
            stroke_width: 2.0,
            stroke_color: Color::BLUE,
        }
    }
}

impl CanvasLayout {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        let half = cfg.canvas_size as f64 / 2.0;
        Self {
            size: cfg.canvas_size,
            center: [half, half],
            zoom: cfg.zoom_factor,
            stroke_width: cfg.stroke_width,
            stroke_color: cfg.stroke_color,
        }
    }

    /// Angular "up" is screen up, so the vertical axis is inverted.
    pub fn to_canvas(&self, angle: ViewAngle) -> [f64; 2] {
        [
            angle.theta * self.zoom + self.center[0],
            self.center[1] - angle.phi * self.zoom,
        ]
    }
}

/// Projects the corners of `quad` to canvas coordinates, in corner order.
pub fn project_quad(quad: &Quad, pose: &ViewerPose, layout: &CanvasLayout) -> [[f64; 2]; 4] {
    quad.corners.map(|corner| {
        let angle = project(corner, pose.position).relative_to(pose.orientation);
        layout.to_canvas(angle)
    })
}

/// Paints every quad of `scene` in generation order. Each quad is one closed
/// path starting at its last corner, filled with the quad colour and then
/// stroked with the layout's stroke colour and width.
pub fn paint_scene<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    pose: &ViewerPose,
    layout: &CanvasLayout,
) {
    debug!(
        "paint pass: position ({}, {}, {}) orientation ({}, {})",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.orientation.theta,
        pose.orientation.phi
    );

    for quad in &scene.quads {
        let pts = project_quad(quad, pose, layout);

        surface.begin_path();
        surface.move_to(pts[3][0], pts[3][1]);
        for [x, y] in pts {
            surface.line_to(x, y);
        }
        surface.close_path();

        surface.set_fill_color(quad.color);
        surface.fill();
        surface.set_stroke_color(layout.stroke_color);
        surface.set_line_width(layout.stroke_width);
        surface.stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Point3;
    use crate::surface::{Canvas, DrawOp, RecordingSurface};
    use crate::viewer::{NavCommand, NavSteps, Orientation};

    const OPS_PER_QUAD: usize = 12;

    fn record(pose: &ViewerPose) -> Vec<DrawOp> {
        let mut surface = RecordingSurface::new();
        paint_scene(&mut surface, &Scene::default(), pose, &CanvasLayout::default());
        surface.ops
    }

    #[test]
    fn op_sequence_per_quad() {
        let pose = ViewerPose::default();
        let ops = record(&pose);
        assert_eq!(ops.len(), 25 * OPS_PER_QUAD);

        let scene = Scene::default();
        let layout = CanvasLayout::default();
        for (quad, chunk) in scene.quads.iter().zip(ops.chunks(OPS_PER_QUAD)) {
            let pts = project_quad(quad, &pose, &layout);
            assert_eq!(
                chunk,
                &[
                    DrawOp::BeginPath,
                    DrawOp::MoveTo(pts[3][0], pts[3][1]),
                    DrawOp::LineTo(pts[0][0], pts[0][1]),
                    DrawOp::LineTo(pts[1][0], pts[1][1]),
                    DrawOp::LineTo(pts[2][0], pts[2][1]),
                    DrawOp::LineTo(pts[3][0], pts[3][1]),
                    DrawOp::ClosePath,
                    DrawOp::SetFillColor(quad.color),
                    DrawOp::Fill,
                    DrawOp::SetStrokeColor(Color::BLUE),
                    DrawOp::SetLineWidth(2.0),
                    DrawOp::Stroke,
                ]
            );
        }
    }

    #[test]
    fn fill_colours_follow_generation_order() {
        let fills: Vec<Color> = record(&ViewerPose::default())
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::SetFillColor(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 25);
        for (idx, c) in fills.iter().enumerate() {
            let expected = if idx == 12 { Color::BLUE } else { Color::WHITE };
            assert_eq!(*c, expected, "quad {idx}");
        }
    }

    #[test]
    fn corner_straight_ahead_maps_below_centre() {
        let layout = CanvasLayout::default();
        let quad = Quad {
            corners: [Point3::new(50.0, 50.0, 0.0); 4],
            color: Color::WHITE,
        };
        let pts = project_quad(&quad, &ViewerPose::default(), &layout);
        let phi = (-10.0f64).atan2(50.0).to_degrees();
        assert!((pts[0][0] - 500.0).abs() < 1e-9);
        assert!((pts[0][1] - (500.0 - phi * 10.0)).abs() < 1e-9);
        assert!(pts[0][1] > 500.0);
    }

    #[test]
    fn orientation_shifts_every_point_equally() {
        let layout = CanvasLayout::default();
        let quad = &Scene::default().quads[7];
        let base = ViewerPose::default();
        let turned = ViewerPose::new(base.position, Orientation::new(5.0, -5.0));

        let a = project_quad(quad, &base, &layout);
        let b = project_quad(quad, &turned, &layout);
        for (p, q) in a.iter().zip(b.iter()) {
            assert!((p[0] - q[0] - 50.0).abs() < 1e-9);
            assert!((p[1] - q[1] - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn layout_from_config_centres_canvas() {
        let cfg = ViewerConfig {
            canvas_size: 640,
            ..ViewerConfig::default()
        };
        let layout = CanvasLayout::from_config(&cfg);
        assert_eq!(layout.center, [320.0, 320.0]);
        assert_eq!(CanvasLayout::from_config(&ViewerConfig::default()), CanvasLayout::default());
    }

    #[test]
    fn repaint_reflects_move_and_turn_together() {
        let steps = NavSteps::default();
        let pose = ViewerPose::default()
            .apply(NavCommand::MoveForward, &steps)
            .apply(NavCommand::LookRight, &steps);
        assert_eq!(pose.position, Point3::new(50.0, 5.0, 10.0));
        assert_eq!(pose.orientation, Orientation::new(5.0, 0.0));

        let layout = CanvasLayout::default();
        let quad = &Scene::default().quads[0];
        let pts = project_quad(quad, &pose, &layout);
        let expected = project(quad.corners[0], Point3::new(50.0, 5.0, 10.0))
            .relative_to(Orientation::new(5.0, 0.0));
        assert_eq!(pts[0], layout.to_canvas(expected));
        assert_ne!(record(&pose), record(&ViewerPose::default()));
    }

    #[test]
    fn highlighted_cell_is_painted_distinctly() {
        let layout = CanvasLayout::default();
        let pose = ViewerPose::default();
        let mut canvas = Canvas::new(layout.size, layout.size).unwrap();
        canvas.clear(Color::WHITE);
        paint_scene(&mut canvas, &Scene::default(), &pose, &layout);

        let centre_of = |x: f64, y: f64| {
            let [cx, cy] = layout.to_canvas(project(Point3::new(x, y, 0.0), pose.position));
            canvas.pixel(cx as u32, cy as u32)
        };
        // Centre of cell (2, 2) and of its neighbour (2, 3).
        assert_eq!(centre_of(50.0, 50.0), Color::BLUE);
        assert_eq!(centre_of(50.0, 70.0), Color::WHITE);
    }
}

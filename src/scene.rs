// scene.rs - static grid of flat quads lying in the z = 0 plane

use crate::config::{Color, ViewerConfig};
use crate::projection::Point3;

#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    pub corners: [Point3; 4],
    pub color: Color,
}

/// The generated quads, in generation order (row-major by i, then j).
///
/// The geometry depends on nothing mutable, so it is built once and reused by
/// every paint pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub quads: Vec<Quad>,
}

impl Scene {
    /// Builds a `cells` x `cells` grid of `cell_size` squares. The cell at
    /// `highlight` gets `highlight_color`, every other cell `color`.
    pub fn grid(
        cells: usize,
        cell_size: f64,
        highlight: (usize, usize),
        color: Color,
        highlight_color: Color,
    ) -> Self {
        let mut quads = Vec::with_capacity(cells * cells);

        for i in 0..cells {
            for j in 0..cells {
                let x0 = i as f64 * cell_size;
                let x1 = (i + 1) as f64 * cell_size;
                let y0 = j as f64 * cell_size;
                let y1 = (j + 1) as f64 * cell_size;

                let corners = [
                    Point3::new(x0, y0, 0.0),
                    Point3::new(x0, y1, 0.0),
                    Point3::new(x1, y1, 0.0),
                    Point3::new(x1, y0, 0.0),
                ];
                let color = if (i, j) == highlight {
                    highlight_color
                } else {
                    color
                };

                quads.push(Quad { corners, color });
            }
        }

        Self { quads }
    }

    pub fn from_config(cfg: &ViewerConfig) -> Self {
        let [hi, hj] = cfg.highlight_cell;
        Self::grid(
            cfg.grid_cells,
            cfg.cell_size,
            (hi, hj),
            cfg.quad_color,
            cfg.highlight_color,
        )
    }
}

#[cfg(test)]
impl Default for Scene {
    fn default() -> Self {
        Self::grid(5, 20.0, (2, 2), Color::WHITE, Color::BLUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_25_quads_one_highlighted() {
        let scene = Scene::default();
        assert_eq!(scene.quads.len(), 25);

        let highlighted: Vec<usize> = scene
            .quads
            .iter()
            .enumerate()
            .filter(|(_, q)| q.color == Color::BLUE)
            .map(|(idx, _)| idx)
            .collect();
        // Row-major: index = i * 5 + j
        assert_eq!(highlighted, vec![2 * 5 + 2]);
        assert!(scene
            .quads
            .iter()
            .filter(|q| q.color != Color::BLUE)
            .all(|q| q.color == Color::WHITE));
    }

    #[test]
    fn corners_are_multiples_of_twenty_in_range() {
        for quad in Scene::default().quads {
            for c in quad.corners {
                assert_eq!(c.z, 0.0);
                for v in [c.x, c.y] {
                    assert!((0.0..=100.0).contains(&v), "{v}");
                    assert_eq!(v % 20.0, 0.0, "{v}");
                }
            }
        }
    }

    #[test]
    fn highlighted_cell_geometry() {
        let scene = Scene::default();
        let q = &scene.quads[12];
        assert_eq!(
            q.corners,
            [
                Point3::new(40.0, 40.0, 0.0),
                Point3::new(40.0, 60.0, 0.0),
                Point3::new(60.0, 60.0, 0.0),
                Point3::new(60.0, 40.0, 0.0),
            ]
        );
    }

    #[test]
    fn generation_order_is_row_major() {
        let scene = Scene::default();
        // Second quad is (i = 0, j = 1), sixth is (i = 1, j = 0).
        assert_eq!(scene.quads[1].corners[0], Point3::new(0.0, 20.0, 0.0));
        assert_eq!(scene.quads[5].corners[0], Point3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn regeneration_is_identical() {
        assert_eq!(Scene::default(), Scene::from_config(&ViewerConfig::default()));
    }
}

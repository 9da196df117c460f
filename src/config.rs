// config.rs - tunable constants for the viewer
//
// Lookup order:
// - CLI: --config <path>
// - Env: ANGLE_VIEWER_CONFIG
// - <exe_dir>/assets/viewer.json, then ./assets/viewer.json
// - built-in defaults
//
// Every field is optional in the JSON file; missing ones keep their default.

use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::projection::Point3;
use crate::viewer::{NavSteps, Orientation, ViewerPose};

/// RGBA colour. Deserializes from `#rrggbb`, `#rrggbbaa` or a named colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const BLUE: Color = Color([0, 0, 255, 255]);

    pub fn parse(s: &str) -> Option<Color> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return None;
            }
            let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            return match hex.len() {
                6 => Some(Color([byte(0)?, byte(2)?, byte(4)?, 255])),
                8 => Some(Color([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
                _ => None,
            };
        }

        let named = match s.to_ascii_lowercase().as_str() {
            "white" => Color::WHITE,
            "black" => Color::BLACK,
            "blue" => Color::BLUE,
            "red" => Color([255, 0, 0, 255]),
            // CSS "green" is #008000
            "green" => Color([0, 128, 0, 255]),
            "gray" | "grey" => Color([128, 128, 128, 255]),
            "yellow" => Color([255, 255, 0, 255]),
            _ => return None,
        };
        Some(named)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid colour {s:?}"))
    }
}

/// Largest accepted canvas side, in pixels.
pub const MAX_CANVAS_SIZE: u32 = 8192;
/// Largest accepted number of cells per grid side.
pub const MAX_GRID_CELLS: usize = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub initial_position: [f64; 3],
    pub initial_orientation: [f64; 2],
    pub move_distance: f64,
    pub angle_step: f64,
    pub canvas_size: u32,
    pub zoom_factor: f64,
    pub stroke_width: f64,
    pub grid_cells: usize,
    pub cell_size: f64,
    pub highlight_cell: [usize; 2],
    pub quad_color: Color,
    pub highlight_color: Color,
    pub stroke_color: Color,
    pub background_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_position: [50.0, 0.0, 10.0],
            initial_orientation: [0.0, 0.0],
            move_distance: 5.0,
            angle_step: 5.0,
            canvas_size: 1000,
            zoom_factor: 10.0,
            stroke_width: 2.0,
            grid_cells: 5,
            cell_size: 20.0,
            highlight_cell: [2, 2],
            quad_color: Color::WHITE,
            highlight_color: Color::BLUE,
            stroke_color: Color::BLUE,
            background_color: Color::WHITE,
        }
    }
}

impl ViewerConfig {
    pub fn initial_pose(&self) -> ViewerPose {
        let [x, y, z] = self.initial_position;
        let [theta, phi] = self.initial_orientation;
        ViewerPose::new(Point3::new(x, y, z), Orientation::new(theta, phi))
    }

    pub fn nav_steps(&self) -> NavSteps {
        NavSteps {
            move_distance: self.move_distance,
            angle_step: self.angle_step,
        }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Rejects values the paint pass or the GPU texture cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_CANVAS_SIZE).contains(&self.canvas_size) {
            return Err(ConfigError::invalid(
                "canvas_size",
                format!("{} is outside 1..={}", self.canvas_size, MAX_CANVAS_SIZE),
            ));
        }
        if !(1..=MAX_GRID_CELLS).contains(&self.grid_cells) {
            return Err(ConfigError::invalid(
                "grid_cells",
                format!("{} is outside 1..={}", self.grid_cells, MAX_GRID_CELLS),
            ));
        }
        let [i, j] = self.highlight_cell;
        if i >= self.grid_cells || j >= self.grid_cells {
            return Err(ConfigError::invalid(
                "highlight_cell",
                format!("[{}, {}] is outside a {}x{} grid", i, j, self.grid_cells, self.grid_cells),
            ));
        }
        for (field, value) in [
            ("zoom_factor", self.zoom_factor),
            ("stroke_width", self.stroke_width),
            ("cell_size", self.cell_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("{} is not a positive number", value)));
            }
        }
        for (field, value) in [("move_distance", self.move_distance), ("angle_step", self.angle_step)] {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("{} is not finite", value)));
            }
        }
        if !self
            .initial_position
            .iter()
            .chain(self.initial_orientation.iter())
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::invalid("initial pose", "coordinates must be finite"));
        }
        Ok(())
    }

    /// Resolves and loads the configuration. Never fails: an unreadable,
    /// malformed or out-of-range file logs a warning and yields the defaults.
    pub fn load() -> Self {
        let Some(path) = resolve_config_path() else {
            info!("no config file found, using defaults");
            return Self::default();
        };

        match load_file(&path) {
            Ok(cfg) => {
                info!("loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

fn load_file(path: &Path) -> Result<ViewerConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let cfg = ViewerConfig::from_json(&text)?;
    cfg.validate()?;
    Ok(cfg)
}

fn resolve_config_path() -> Option<PathBuf> {
    let mut it = std::env::args();
    while let Some(a) = it.next() {
        if a == "--config" {
            if let Some(v) = it.next() {
                return Some(PathBuf::from(v));
            }
        }
    }

    if let Ok(v) = std::env::var("ANGLE_VIEWER_CONFIG") {
        if !v.trim().is_empty() {
            return Some(PathBuf::from(v));
        }
    }

    find_asset("viewer.json")
}

/// Looks for `assets/<file>` next to the executable, then in the working dir.
pub fn find_asset(file: &str) -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join(file);
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join(file);
    if p.exists() {
        return Some(p);
    }

    None
}

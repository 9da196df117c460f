// viewer.rs - viewer pose and discrete navigation commands

use crate::projection::Point3;

/// Look direction in degrees. Unbounded: no clamping and no wrap at 360.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub theta: f64,
    pub phi: f64,
}

impl Orientation {
    pub const fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerPose {
    pub position: Point3,
    pub orientation: Orientation,
}

/// Step sizes applied by each navigation command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavSteps {
    pub move_distance: f64,
    pub angle_step: f64,
}

impl Default for NavSteps {
    fn default() -> Self {
        Self {
            move_distance: 5.0,
            angle_step: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavCommand {
    MoveForward,  // +y
    MoveBackward, // -y
    MoveLeft,     // -x
    MoveRight,    // +x
    MoveUp,       // +z
    MoveDown,     // -z
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
}

impl NavCommand {
    pub const ALL: [NavCommand; 10] = [
        NavCommand::MoveForward,
        NavCommand::MoveBackward,
        NavCommand::MoveLeft,
        NavCommand::MoveRight,
        NavCommand::MoveUp,
        NavCommand::MoveDown,
        NavCommand::LookUp,
        NavCommand::LookDown,
        NavCommand::LookLeft,
        NavCommand::LookRight,
    ];

    /// Maps a key identifier to a command. Case-sensitive; anything else is
    /// not a navigation key.
    pub fn from_key(key: &str) -> Option<Self> {
        let cmd = match key {
            "w" => NavCommand::MoveForward,
            "s" => NavCommand::MoveBackward,
            "a" => NavCommand::MoveLeft,
            "d" => NavCommand::MoveRight,
            "e" => NavCommand::MoveUp,
            "q" => NavCommand::MoveDown,
            "ArrowUp" => NavCommand::LookUp,
            "ArrowDown" => NavCommand::LookDown,
            "ArrowLeft" => NavCommand::LookLeft,
            "ArrowRight" => NavCommand::LookRight,
            _ => return None,
        };
        Some(cmd)
    }

    pub fn key(self) -> &'static str {
        match self {
            NavCommand::MoveForward => "w",
            NavCommand::MoveBackward => "s",
            NavCommand::MoveLeft => "a",
            NavCommand::MoveRight => "d",
            NavCommand::MoveUp => "e",
            NavCommand::MoveDown => "q",
            NavCommand::LookUp => "ArrowUp",
            NavCommand::LookDown => "ArrowDown",
            NavCommand::LookLeft => "ArrowLeft",
            NavCommand::LookRight => "ArrowRight",
        }
    }

    /// i18n key of the legend line describing this command.
    pub fn legend_key(self) -> &'static str {
        match self {
            NavCommand::MoveForward => "legend.move_forward",
            NavCommand::MoveBackward => "legend.move_backward",
            NavCommand::MoveLeft => "legend.move_left",
            NavCommand::MoveRight => "legend.move_right",
            NavCommand::MoveUp => "legend.move_up",
            NavCommand::MoveDown => "legend.move_down",
            NavCommand::LookUp => "legend.look_up",
            NavCommand::LookDown => "legend.look_down",
            NavCommand::LookLeft => "legend.look_left",
            NavCommand::LookRight => "legend.look_right",
        }
    }
}

impl ViewerPose {
    pub const fn new(position: Point3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Returns the pose after one navigation step. Movement is axis-aligned
    /// whatever the current orientation.
    pub fn apply(self, cmd: NavCommand, steps: &NavSteps) -> Self {
        let [x, y, z] = self.position.to_array();
        let Orientation { theta, phi } = self.orientation;
        let m = steps.move_distance;
        let a = steps.angle_step;

        match cmd {
            NavCommand::MoveForward => self.with_position(Point3::new(x, y + m, z)),
            NavCommand::MoveBackward => self.with_position(Point3::new(x, y - m, z)),
            NavCommand::MoveLeft => self.with_position(Point3::new(x - m, y, z)),
            NavCommand::MoveRight => self.with_position(Point3::new(x + m, y, z)),
            NavCommand::MoveUp => self.with_position(Point3::new(x, y, z + m)),
            NavCommand::MoveDown => self.with_position(Point3::new(x, y, z - m)),
            NavCommand::LookUp => self.with_orientation(Orientation::new(theta, phi + a)),
            NavCommand::LookDown => self.with_orientation(Orientation::new(theta, phi - a)),
            NavCommand::LookLeft => self.with_orientation(Orientation::new(theta - a, phi)),
            NavCommand::LookRight => self.with_orientation(Orientation::new(theta + a, phi)),
        }
    }

    fn with_position(self, position: Point3) -> Self {
        Self { position, ..self }
    }

    fn with_orientation(self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self
        }
    }
}

impl Default for ViewerPose {
    fn default() -> Self {
        Self::new(Point3::new(50.0, 0.0, 10.0), Orientation::default())
    }
}

// controller.rs - owns the session state and runs the paint pass on change
//
// Input listeners never hold a copy of the pose: they go through the
// controller, so they always act on the latest state.

use log::debug;

use crate::config::{Color, ViewerConfig};
use crate::error::AppError;
use crate::input::{InputListener, PointerPosition};
use crate::render::{paint_scene, CanvasLayout};
use crate::scene::Scene;
use crate::surface::Canvas;
use crate::viewer::{NavCommand, NavSteps, ViewerPose};

pub struct Controller {
    pose: ViewerPose,
    initial_pose: ViewerPose,
    steps: NavSteps,
    pointer: Option<PointerPosition>,
    scene: Scene,
    layout: CanvasLayout,
    background: Color,
    canvas: Canvas,
    revision: u64,
}

impl Controller {
    /// Builds the controller and paints the first frame.
    pub fn new(cfg: &ViewerConfig) -> Result<Self, AppError> {
        let layout = CanvasLayout::from_config(cfg);
        let canvas = Canvas::new(layout.size, layout.size)
            .ok_or(AppError::Canvas { size: layout.size })?;
        let pose = cfg.initial_pose();
        let mut controller = Self {
            pose,
            initial_pose: pose,
            steps: cfg.nav_steps(),
            pointer: None,
            scene: Scene::from_config(cfg),
            layout,
            background: cfg.background_color,
            canvas,
            revision: 0,
        };
        controller.repaint();
        Ok(controller)
    }

    pub fn pose(&self) -> ViewerPose {
        self.pose
    }

    pub fn pointer(&self) -> Option<PointerPosition> {
        self.pointer
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Number of paint passes run so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn command(&mut self, cmd: NavCommand) -> bool {
        debug!("navigation: {:?}", cmd);
        self.set_pose(self.pose.apply(cmd, &self.steps))
    }

    /// Restores the initial pose.
    pub fn reset(&mut self) -> bool {
        self.set_pose(self.initial_pose)
    }

    fn set_pose(&mut self, pose: ViewerPose) -> bool {
        if pose == self.pose {
            return false;
        }
        self.pose = pose;
        self.repaint();
        true
    }

    fn repaint(&mut self) {
        self.canvas.clear(self.background);
        paint_scene(&mut self.canvas, &self.scene, &self.pose, &self.layout);
        self.revision += 1;
    }
}

impl InputListener for Controller {
    fn on_key(&mut self, key: &str) -> bool {
        match NavCommand::from_key(key) {
            Some(cmd) => self.command(cmd),
            None => false,
        }
    }

    fn on_pointer_move(&mut self, pos: PointerPosition) -> bool {
        if self.pointer == Some(pos) {
            return false;
        }
        self.pointer = Some(pos);
        true
    }
}

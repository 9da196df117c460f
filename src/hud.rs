// hud.rs - pointer / pose readout and control legend

use crate::i18n::substitute;
use crate::input::PointerPosition;
use crate::viewer::{NavCommand, ViewerPose};

pub fn pointer_line(pointer: Option<PointerPosition>) -> String {
    fill_pointer(crate::i18n::tr("hud.pointer"), pointer)
}

pub fn position_line(pose: &ViewerPose) -> String {
    fill_position(crate::i18n::tr("hud.position"), pose)
}

pub fn orientation_line(pose: &ViewerPose) -> String {
    fill_orientation(crate::i18n::tr("hud.orientation"), pose)
}

fn fill_pointer(template: String, pointer: Option<PointerPosition>) -> String {
    let (x, y) = match pointer {
        Some(p) => (p.x.to_string(), p.y.to_string()),
        None => ("-".to_string(), "-".to_string()),
    };
    substitute(template, &[("x", x), ("y", y)])
}

fn fill_position(template: String, pose: &ViewerPose) -> String {
    let p = pose.position;
    substitute(
        template,
        &[("x", p.x.to_string()), ("y", p.y.to_string()), ("z", p.z.to_string())],
    )
}

fn fill_orientation(template: String, pose: &ViewerPose) -> String {
    let o = pose.orientation;
    substitute(
        template,
        &[("theta", o.theta.to_string()), ("phi", o.phi.to_string())],
    )
}

/// Key label shown in the legend for a command.
pub fn key_label(cmd: NavCommand) -> String {
    match cmd {
        NavCommand::LookUp => crate::i18n::tr("key.arrow_up"),
        NavCommand::LookDown => crate::i18n::tr("key.arrow_down"),
        NavCommand::LookLeft => crate::i18n::tr("key.arrow_left"),
        NavCommand::LookRight => crate::i18n::tr("key.arrow_right"),
        _ => cmd.key().to_uppercase(),
    }
}

pub fn legend_lines() -> Vec<String> {
    NavCommand::ALL
        .iter()
        .map(|cmd| format!("{} - {}", key_label(*cmd), crate::i18n::tr(cmd.legend_key())))
        .collect()
}

pub fn draw(
    ctx: &egui::Context,
    pose: &ViewerPose,
    pointer: Option<PointerPosition>,
) {
    egui::SidePanel::right("hud")
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(pointer_line(pointer));
            ui.label(position_line(pose));
            ui.label(orientation_line(pose));
            ui.separator();
            ui.label(egui::RichText::new(crate::i18n::tr("hud.controls")).strong());
            for line in legend_lines() {
                ui.label(line);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::Point3;
    use crate::viewer::Orientation;

    #[test]
    fn readout_after_move_and_turn() {
        let pose = ViewerPose::new(Point3::new(50.0, 5.0, 10.0), Orientation::new(5.0, 0.0));
        assert_eq!(
            fill_position("viewer location: {x}, {y}, {z}".into(), &pose),
            "viewer location: 50, 5, 10"
        );
        assert_eq!(
            fill_orientation("view angles: {theta}, {phi}".into(), &pose),
            "view angles: 5, 0"
        );
    }

    #[test]
    fn pointer_readout() {
        let t = "mouse location: {x}, {y}";
        assert_eq!(fill_pointer(t.into(), None), "mouse location: -, -");
        assert_eq!(
            fill_pointer(t.into(), Some(PointerPosition { x: 312.0, y: 48.5 })),
            "mouse location: 312, 48.5"
        );
    }

    #[test]
    fn legend_has_a_line_per_command() {
        let lines = legend_lines();
        assert_eq!(lines.len(), NavCommand::ALL.len());
        assert!(lines[0].starts_with("W - "));
        assert!(lines[5].starts_with("Q - "));
    }
}

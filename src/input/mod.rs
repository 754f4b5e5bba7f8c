use macroquad::prelude::*;
use tracing::warn;

use crate::application::SimulationController;
use crate::domain::{Board, presets};
use crate::ui::{Action, Button, cell_size, grid_area_width};

pub const DEFAULT_ADVANCE_STEPS: usize = 10;
pub const MAX_ADVANCE_STEPS: usize = 1000;
const RANDOM_DENSITY: f64 = 0.3;

/// Presentation-side settings that are not part of the simulation
pub struct ControlPanel {
    pub advance_steps: usize,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            advance_steps: DEFAULT_ADVANCE_STEPS,
        }
    }
}

impl ControlPanel {
    pub fn adjust_steps(&mut self, delta: isize) {
        self.advance_steps = self
            .advance_steps
            .saturating_add_signed(delta)
            .clamp(1, MAX_ADVANCE_STEPS);
    }
}

/// Board cell under the mouse, if any
pub fn cell_under_mouse(board: &Board, mouse_pos: (f32, f32)) -> Option<(usize, usize)> {
    let (rows, cols) = board.dimensions();
    if mouse_pos.0 < 0.0 || mouse_pos.1 < 0.0 || mouse_pos.0 >= grid_area_width() {
        return None;
    }
    let size = cell_size(rows, cols);
    let (row, col) = ((mouse_pos.1 / size) as usize, (mouse_pos.0 / size) as usize);
    (row < rows && col < cols).then_some((row, col))
}

/// Toggle the clicked cell; the controller ignores this while playing
pub fn handle_cell_click(controller: &SimulationController, mouse_pos: (f32, f32)) {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }
    if let Some((row, col)) = cell_under_mouse(&controller.board(), mouse_pos) {
        if let Err(err) = controller.toggle_cell(row, col) {
            warn!(%err, "cell click rejected");
        }
    }
}

fn run_action(controller: &SimulationController, panel: &ControlPanel, action: Action) {
    match action {
        Action::PlayPause => {
            controller.play_pause();
        }
        Action::Step => controller.step(),
        Action::Advance => {
            controller.advance(panel.advance_steps);
        }
        Action::Randomize => randomize(controller),
        Action::Reset => controller.reset(),
    }
}

fn randomize(controller: &SimulationController) {
    let config = controller.config();
    let loaded = Board::random(config.rows, config.cols, RANDOM_DENSITY, &mut ::rand::rng())
        .and_then(|board| controller.load(board));
    if let Err(err) = loaded {
        warn!(%err, "random board rejected");
    }
}

fn stamp_preset(controller: &SimulationController, index: usize) {
    let Some(pattern) = presets::all_patterns().into_iter().nth(index) else {
        return;
    };
    let current = controller.board();
    let (row, col) = pattern.centred_origin(current.rows(), current.cols());
    if let Err(err) = controller.load(current.with_pattern(&pattern, row, col)) {
        warn!(%err, pattern = pattern.name, "preset rejected");
    }
}

/// Process button clicks
pub fn process_button_clicks(
    controller: &SimulationController,
    panel: &ControlPanel,
    buttons: &[(Action, Button)],
    mouse_pos: (f32, f32),
) {
    buttons
        .iter()
        .filter(|(_, btn)| btn.is_clicked(mouse_pos))
        .for_each(|(action, _)| run_action(controller, panel, *action));
}

/// Process keyboard input
pub fn process_keyboard_input(controller: &SimulationController, panel: &mut ControlPanel) {
    let actions = [
        (KeyCode::Space, Action::PlayPause),
        (KeyCode::S, Action::Step),
        (KeyCode::A, Action::Advance),
        (KeyCode::R, Action::Randomize),
        (KeyCode::C, Action::Reset),
    ];
    actions
        .iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .for_each(|(_, action)| run_action(controller, panel, *action));

    if is_key_pressed(KeyCode::Equal) || is_key_pressed(KeyCode::KpAdd) {
        panel.adjust_steps(1);
    }
    if is_key_pressed(KeyCode::Minus) || is_key_pressed(KeyCode::KpSubtract) {
        panel.adjust_steps(-1);
    }

    let preset_keys = [
        KeyCode::Key1,
        KeyCode::Key2,
        KeyCode::Key3,
        KeyCode::Key4,
        KeyCode::Key5,
        KeyCode::Key6,
    ];
    preset_keys
        .iter()
        .enumerate()
        .filter(|(_, key)| is_key_pressed(**key))
        .for_each(|(index, _)| stamp_preset(controller, index));
}

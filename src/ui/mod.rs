mod button;

pub use button::Button;

use macroquad::prelude::{screen_height, screen_width};

pub const PANEL_WIDTH: f32 = 180.0;
pub const BUTTON_HEIGHT: f32 = 40.0;
pub const BUTTON_SPACING: f32 = 50.0;
pub const BUTTONS_TOP: f32 = 140.0;
pub const MAX_CELL_SIZE: f32 = 32.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the grid area
pub fn grid_area_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the grid area
pub fn grid_area_height() -> f32 {
    screen_height()
}

/// Largest square cell that fits the whole board in the grid area
pub fn cell_size(rows: usize, cols: usize) -> f32 {
    if rows == 0 || cols == 0 {
        return MAX_CELL_SIZE;
    }
    (grid_area_width() / cols as f32)
        .min(grid_area_height() / rows as f32)
        .min(MAX_CELL_SIZE)
}

/// What a control-panel button does
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    PlayPause,
    Step,
    Advance,
    Randomize,
    Reset,
}

/// Create UI buttons with standard layout.
/// Editing controls are disabled while the simulation plays.
pub fn create_buttons(is_playing: bool, advance_steps: usize) -> Vec<(Action, Button)> {
    let px = panel_x();
    let play_label = if is_playing { "Pause" } else { "Play" };
    let specs = [
        (Action::PlayPause, play_label.to_string(), true),
        (Action::Step, "Step".to_string(), !is_playing),
        (Action::Advance, format!("Advance {advance_steps}"), !is_playing),
        (Action::Randomize, "Random".to_string(), !is_playing),
        (Action::Reset, "Reset".to_string(), true),
    ];

    specs
        .into_iter()
        .enumerate()
        .map(|(i, (action, label, enabled))| {
            let y = BUTTONS_TOP + i as f32 * BUTTON_SPACING;
            let button = Button::new(px, y, PANEL_WIDTH, BUTTON_HEIGHT, label).enabled(enabled);
            (action, button)
        })
        .collect()
}

use macroquad::prelude::*;

use crate::application::Snapshot;
use crate::domain::Board;
use crate::ui::{Action, Button, PANEL_WIDTH, cell_size, panel_x};

const ALIVE_COLOR: Color = Color::new(0.0, 1.0, 0.59, 1.0);
const DEAD_COLOR: Color = Color::new(0.06, 0.06, 0.06, 1.0);
const GRID_LINE_COLOR: Color = Color::new(0.16, 0.16, 0.16, 1.0);

/// Draw every cell of the board, top-left anchored
pub fn draw_board(board: &Board) {
    let (rows, cols) = board.dimensions();
    if board.is_empty() {
        draw_text_label("Empty board", 20.0, 40.0, 20.0, GRAY);
        return;
    }

    let size = cell_size(rows, cols);
    let draw_grid_lines = size >= 4.0;

    for (row, col, cell) in board.iter_cells() {
        let (x, y) = (col as f32 * size, row as f32 * size);
        let color = if cell.is_alive() { ALIVE_COLOR } else { DEAD_COLOR };
        draw_rectangle(x, y, size, size, color);
        if draw_grid_lines {
            draw_rectangle_lines(x, y, size, size, 1.0, GRID_LINE_COLOR);
        }
    }
}

/// Draw control panel background
fn draw_panel_background() {
    draw_rectangle(
        panel_x(),
        0.0,
        PANEL_WIDTH,
        screen_height(),
        Color::from_rgba(30, 30, 30, 255),
    );
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Draw the control panel with buttons and status
pub fn draw_controls(snapshot: &Snapshot, buttons: &[(Action, Button)], mouse_pos: (f32, f32)) {
    draw_panel_background();
    buttons.iter().for_each(|(_, btn)| btn.draw(mouse_pos));

    let px = panel_x();
    let (rows, cols) = snapshot.board.dimensions();
    let status_color = if snapshot.is_playing {
        Color::from_rgba(0, 255, 0, 255)
    } else {
        Color::from_rgba(255, 165, 0, 255)
    };

    let labels = [
        ("Generation:".to_string(), 30.0, 16.0, WHITE),
        (snapshot.generation.to_string(), 50.0, 20.0, ALIVE_COLOR),
        (format!("Population: {}", snapshot.board.population()), 75.0, 14.0, GRAY),
        (format!("Grid: {rows}x{cols}"), 92.0, 14.0, GRAY),
        (
            if snapshot.is_playing { "Running" } else { "Paused" }.to_string(),
            115.0,
            16.0,
            status_color,
        ),
    ];
    labels.iter().for_each(|(text, y, size, color)| {
        draw_text_label(text, px, *y, *size, *color);
    });

    let help = [
        "Controls:",
        "LMB: Toggle cell",
        "Space: Play/Pause",
        "S: Step  A: Advance",
        "+/-: Advance count",
        "R: Random  C: Reset",
        "1-6: Stamp preset",
    ];
    help.iter().enumerate().for_each(|(i, text)| {
        let (size, color) = if i == 0 { (14.0, WHITE) } else { (12.0, GRAY) };
        draw_text_label(text, px, 420.0 + i as f32 * 15.0, size, color);
    });
}

use macroquad::prelude::*;
use tracing::{error, info};

use life_engine::{
    SimulationConfig, SimulationController,
    input::{self, ControlPanel},
    rendering, ui,
};

fn window_conf() -> Conf {
    Conf {
        window_title: "Conway's Game of Life".to_owned(),
        window_width: 900,
        window_height: 720,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_config() -> SimulationConfig {
    SimulationConfig::from_env().unwrap_or_else(|err| {
        error!(%err, "invalid configuration, using defaults");
        SimulationConfig::default()
    })
}

#[macroquad::main(window_conf)]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    // The auto-play timer runs on this runtime; macroquad owns the main thread.
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(%err, "failed to start timer runtime");
            return;
        }
    };

    let controller = match SimulationController::new(load_config(), runtime.handle().clone()) {
        Ok(controller) => controller,
        Err(err) => {
            error!(%err, "failed to create simulation");
            return;
        }
    };
    let mut panel = ControlPanel::default();
    info!("ready");

    loop {
        let mouse_pos = mouse_position();
        let snapshot = controller.snapshot();
        let buttons = ui::create_buttons(snapshot.is_playing, panel.advance_steps);

        input::process_button_clicks(&controller, &panel, &buttons, mouse_pos);
        input::handle_cell_click(&controller, mouse_pos);
        input::process_keyboard_input(&controller, &mut panel);

        // Re-read so this frame shows the effect of any command issued above.
        let snapshot = controller.snapshot();
        clear_background(BLACK);
        rendering::draw_board(&snapshot.board);
        rendering::draw_controls(&snapshot, &buttons, mouse_pos);

        if is_key_pressed(KeyCode::Escape) {
            break;
        }
        next_frame().await;
    }

    drop(controller);
    runtime.shutdown_background();
}

use std::sync::Arc;
use std::time::Duration;

use life_engine::{
    Board, CommandOutcome, IgnoreReason, RunState, SimulationConfig, SimulationController,
    next_generation,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INTERVAL: Duration = Duration::from_millis(100);

fn controller(rows: usize, cols: usize) -> SimulationController {
    let config = SimulationConfig::new(rows, cols, INTERVAL).unwrap();
    SimulationController::on_current_runtime(config).unwrap()
}

fn blinker() -> Board {
    Board::parse(
        "
        .....
        .***.
        .....
        .....
        ",
    )
    .unwrap()
}

fn wait(periods: f64) -> tokio::time::Sleep {
    tokio::time::sleep(INTERVAL.mul_f64(periods))
}

#[tokio::test(start_paused = true)]
async fn auto_play_steps_once_per_interval() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();

    assert_eq!(sim.play_pause(), RunState::Running);
    assert!(sim.is_playing());
    wait(3.5).await;

    assert_eq!(sim.generation(), 3);
    assert_eq!(*sim.board(), next_generation(&blinker()));
}

#[tokio::test(start_paused = true)]
async fn play_then_immediate_stop_never_steps() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();
    let before = sim.board();

    assert_eq!(sim.play_pause(), RunState::Running);
    assert_eq!(sim.play_pause(), RunState::Stopped);
    wait(10.0).await;

    assert!(!sim.is_playing());
    assert_eq!(sim.generation(), 0);
    assert!(Arc::ptr_eq(&before, &sim.board()));
}

#[tokio::test(start_paused = true)]
async fn stopping_cancels_pending_steps() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();

    sim.play_pause();
    wait(2.5).await;
    assert_eq!(sim.play_pause(), RunState::Stopped);
    let generation = sim.generation();
    let board = sim.board();
    assert_eq!(generation, 2);

    wait(10.0).await;
    assert_eq!(sim.generation(), generation);
    assert_eq!(sim.board(), board);
}

#[tokio::test(start_paused = true)]
async fn restarting_arms_a_single_timer() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();

    // Start, stop and start again within one period: only the last session may step.
    sim.play_pause();
    wait(0.5).await;
    sim.play_pause();
    sim.play_pause();
    wait(2.5).await;

    assert_eq!(sim.generation(), 2);
    sim.play_pause();
}

#[tokio::test(start_paused = true)]
async fn dropping_the_controller_releases_the_timer() {
    let runtime = tokio::runtime::Handle::current();
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();

    sim.play_pause();
    wait(1.5).await;
    assert_eq!(sim.generation(), 1);
    assert_eq!(runtime.metrics().num_alive_tasks(), 1);

    let held = sim.board();
    drop(sim);
    wait(10.0).await;

    assert_eq!(runtime.metrics().num_alive_tasks(), 0);
    assert_eq!(*held, next_generation(&blinker()));
}

#[tokio::test(start_paused = true)]
async fn reset_stops_and_clears() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();
    sim.play_pause();
    wait(1.5).await;

    sim.reset();
    assert_eq!(sim.run_state(), RunState::Stopped);
    assert_eq!(sim.generation(), 0);
    assert_eq!(*sim.board(), Board::empty(4, 5).unwrap());

    wait(10.0).await;
    assert_eq!(sim.generation(), 0);
    assert_eq!(sim.board().population(), 0);
}

#[tokio::test(start_paused = true)]
async fn editing_is_ignored_while_playing() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();
    sim.play_pause();

    assert_eq!(
        sim.toggle_cell(0, 0),
        Ok(CommandOutcome::Ignored(IgnoreReason::Playing))
    );
    assert_eq!(sim.advance(5), CommandOutcome::Ignored(IgnoreReason::Playing));
    assert_eq!(
        sim.load(Board::empty(4, 5).unwrap()),
        Ok(CommandOutcome::Ignored(IgnoreReason::Playing))
    );
    assert_eq!(*sim.board(), blinker());

    // Manual stepping stays legal.
    sim.step();
    assert_eq!(sim.generation(), 1);
    assert_eq!(*sim.board(), next_generation(&blinker()));
    sim.play_pause();
}

#[tokio::test]
async fn toggle_round_trip() {
    let sim = controller(3, 4);
    let start = sim.board();
    for (row, col) in [(0, 0), (2, 3), (1, 2)] {
        assert!(sim.toggle_cell(row, col).unwrap().is_applied());
        assert!(sim.toggle_cell(row, col).unwrap().is_applied());
        assert_eq!(sim.board(), start);
    }
}

#[tokio::test]
async fn advance_equals_repeated_step() {
    let mut rng = StdRng::seed_from_u64(99);
    for steps in [1, 2, 7, 25] {
        let board = Board::random(10, 14, 0.4, &mut rng).unwrap();

        let batched = controller(10, 14);
        batched.load(board.clone()).unwrap();
        assert_eq!(batched.advance(steps), CommandOutcome::Applied);

        let stepped = controller(10, 14);
        stepped.load(board).unwrap();
        for _ in 0..steps {
            stepped.step();
        }

        assert_eq!(batched.board(), stepped.board(), "steps = {steps}");
        assert_eq!(batched.generation(), steps as u64);
        assert_eq!(stepped.generation(), steps as u64);
    }
}

#[tokio::test]
async fn held_snapshots_never_change() {
    let sim = controller(4, 5);
    sim.load(blinker()).unwrap();
    let held = sim.board();

    sim.step();
    sim.advance(3);
    sim.reset();

    assert_eq!(*held, blinker());
}

#[tokio::test]
async fn reset_after_arbitrary_commands() {
    let mut rng = StdRng::seed_from_u64(5);
    let sim = controller(6, 8);

    for _ in 0..200 {
        match rng.random_range(0..4) {
            0 => {
                let _ = sim.toggle_cell(rng.random_range(0..8), rng.random_range(0..10));
            }
            1 => sim.step(),
            2 => {
                sim.advance(rng.random_range(0..4));
            }
            _ => {
                sim.play_pause();
            }
        }
    }

    sim.reset();
    let snapshot = sim.snapshot();
    assert!(!snapshot.is_playing);
    assert_eq!(snapshot.generation, 0);
    assert_eq!(*snapshot.board, Board::empty(6, 8).unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_is_final_on_a_threaded_runtime() {
    let config = SimulationConfig::with_interval_ms(8, 8, 5).unwrap();
    let sim = SimulationController::on_current_runtime(config).unwrap();
    sim.load(Board::random(8, 8, 0.5, &mut StdRng::seed_from_u64(1)).unwrap())
        .unwrap();

    sim.play_pause();
    tokio::time::sleep(Duration::from_millis(40)).await;
    sim.play_pause();
    let generation = sim.generation();

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(sim.generation(), generation);
}

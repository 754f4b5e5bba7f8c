//! Timing of the generation engine on random boards

use std::time::Instant;

use life_engine::Board;
use life_engine::domain::generation;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_board(size: usize, rng: &mut StdRng) -> Board {
    match Board::random(size, size, 0.3, rng) {
        Ok(board) => board,
        Err(err) => panic!("cannot build {size}x{size} board: {err}"),
    }
}

fn benchmark_step(board: &Board, iterations: u32) -> f64 {
    let mut current = board.clone();
    let start = Instant::now();
    for _ in 0..iterations {
        current = generation::next_generation(&current);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn benchmark_advance(board: &Board, steps: usize) -> f64 {
    let start = Instant::now();
    let _ = generation::advance(board, steps);
    start.elapsed().as_secs_f64() * 1000.0
}

fn main() {
    println!("=== Game of Life Generation Benchmark ===\n");

    let sizes = [10, 30, 50, 100, 200];
    let iterations = 200;
    let advance_steps = 100;
    let mut rng = StdRng::seed_from_u64(0x11fe);

    println!(
        "{:>10} {:>14} {:>18} {:>16}",
        "Size", "ms/gen", "advance(100) ms", "Mcells/sec"
    );
    println!("{:-<62}", "");

    for size in sizes {
        let board = random_board(size, &mut rng);
        let step_ms = benchmark_step(&board, iterations);
        let advance_ms = benchmark_advance(&board, advance_steps);
        let throughput = (size * size) as f64 / (step_ms / 1000.0) / 1_000_000.0;

        println!(
            "{:>10} {:>14.4} {:>18.3} {:>16.1}",
            format!("{}x{}", size, size),
            step_ms,
            advance_ms,
            throughput
        );
    }
}

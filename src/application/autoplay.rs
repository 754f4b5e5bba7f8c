//! Timed auto-advance.
//!
//! One task per play session. The task never outlives its session: the
//! controller aborts it on stop, and a task that still wins the lock after
//! the stop sees a stale epoch and exits without stepping.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

use super::controller::{SimulationState, lock};

pub(super) async fn run(state: Arc<Mutex<SimulationState>>, epoch: u64, period: Duration) {
    // First step lands one full period after play starts.
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut guard = lock(&state);
        if guard.epoch != epoch || !guard.run_state.is_running() {
            trace!(epoch, "stale auto-play timer exiting");
            return;
        }
        guard.step();
        trace!(generation = guard.generation, "auto-play step");
    }
}

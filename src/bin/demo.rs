//! Console demo: two workers, three toy tasks, single-key control.
//!
//! Keys: `a` restarts worker 0's current task, `A` resets worker 0, `z`
//! restarts worker 1, `Z` resets (see [`control_table`]), `q` quits.

use foreman_rs::prelude::*;
use std::io;
use std::process::ExitCode;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

const POOL_SIZE: usize = 2;

/// Dummy long-running tasks. Each routes its sleeps through the worker
/// context so interrupts can land mid-wait.
fn toy_tasks() -> TaskSequence {
    // one counter shared by every worker running the second task
    let shared_value = Arc::new(AtomicI32::new(1));

    TaskSequence::builder()
        .task(|ctx: &WorkerContext| {
            for i in 0..20 {
                println!("foo'ing from {} on worker {}...", i, ctx.worker_id());
                ctx.sleep(Duration::from_secs(1));
            }
        })
        .task(move |ctx: &WorkerContext| {
            while shared_value.load(Ordering::Relaxed) >= 0 {
                println!(
                    "bar'ing from {} on worker {}...",
                    shared_value.load(Ordering::Relaxed),
                    ctx.worker_id()
                );
                shared_value.fetch_add(0x10000, Ordering::Relaxed);
                ctx.sleep(Duration::from_secs(1));
            }
        })
        .task(|ctx: &WorkerContext| loop {
            println!("doing some indefinite task on worker {}..", ctx.worker_id());
            ctx.sleep(Duration::from_secs(1));
        })
        .build()
}

fn control_table() -> CommandTable {
    CommandTable::new()
        .bind('a', 0, InterruptMode::Restart)
        .bind('A', 0, InterruptMode::Reset)
        .bind('z', 1, InterruptMode::Restart)
        // 'Z' routes to worker 0, mirroring 'A' instead of 'z'. Kept as-is
        // pending confirmation that the asymmetry is intended.
        .bind('Z', 0, InterruptMode::Reset)
        .bind_quit('q')
}

fn run() -> Result<()> {
    let config = Config::builder().num_workers(POOL_SIZE).build()?;
    let pool = Pool::start(&config, toy_tasks())?;

    let controller = Controller::new(pool, control_table());
    controller.serve(io::stdin().lock())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("foreman-demo: {e}");
            ExitCode::FAILURE
        }
    }
}

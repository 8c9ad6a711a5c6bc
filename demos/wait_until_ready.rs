//! # Example: wait_until_ready
//!
//! Polls a simulated service that becomes ready on its fourth check, using
//! linear backoff and a progress listener. Diagnostic traces are printed by a
//! `tracing-subscriber` formatter.
//!
//! ## Flow
//! ```text
//! Poller::run()
//!   ├─► attempt 1 → Err("starting")  → progress(4) → sleep 200ms
//!   ├─► attempt 2 → Err("starting")  → progress(3) → sleep 300ms
//!   ├─► attempt 3 → Err("migrating") → progress(2) → sleep 400ms
//!   └─► attempt 4 → Ok("ready")
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=pollvisor=debug cargo run --example wait_until_ready
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use pollvisor::PollOptions;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let checks = Arc::new(AtomicU32::new(0));
    let counter = checks.clone();

    let poller = PollOptions::new()
        .with_name("service-ready")
        .with_task_fn(move || {
            let counter = counter.clone();
            async move {
                match counter.fetch_add(1, Ordering::SeqCst) + 1 {
                    1 | 2 => Err("starting".to_string()),
                    3 => Err("migrating".to_string()),
                    _ => Ok("ready"),
                }
            }
        })
        .with_strategy("linear-backoff")
        .with_start(200)
        .with_increment(100)
        .with_progress_fn(|left, err: &String| {
            println!("[progress] not ready ({err}); {left} retries left");
        })
        .build()?;

    let status = poller.run().await?;
    println!(
        "[main] service is {status} after {} checks",
        checks.load(Ordering::SeqCst)
    );
    Ok(())
}

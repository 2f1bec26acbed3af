//! # Example: on_demand
//!
//! Runs a single cycle with an [`OnDemand`] component and prints the counters.
//!
//! Demonstrates how to:
//! - Load a [`Config`] from JSON (durations in milliseconds).
//! - Register a handler with `routing`.
//! - Attach an [`OutcomeReporter`] (on-demand components keep no counters by default).
//!
//! ## Flow
//! ```text
//! OnDemand::run()
//!     ├─► dispatch(cycle 1)
//!     │     └─► worker 1 ──► handler (sleeps 10ms, well under the 50ms deadline)
//!     └─► join barrier ──► Ok(())
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example on_demand
//! ```

use std::sync::Arc;
use std::time::Duration;

use cyclevisor::{Config, HandlerFn, Lifecycle, OnDemand, OutcomeReporter, Request};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // `workers: 3` resolves to a single worker.
    let cfg: Config = serde_json::from_str(r#"{ "timeout": 50, "workers": 3 }"#)?;
    let reporter = Arc::new(OutcomeReporter::new("cron"));

    let job = OnDemand::setup(&cfg)
        .routing(HandlerFn::arc(|req: Request| async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            println!("worker {} done, {:?} left", req.id(), req.remaining());
            Ok(())
        }))
        .with_reporter(Arc::clone(&reporter));

    println!("{}", job.identify());
    job.run().await?;

    for (name, value) in reporter.counters() {
        println!("{name} {value}");
    }
    Ok(())
}

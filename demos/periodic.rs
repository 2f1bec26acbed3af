//! # Example: periodic
//!
//! Runs a [`Periodic`] component until Ctrl-C, then shuts it down and waits at most
//! `wait_hint()` for the cycle in flight.
//!
//! The handler alternates between success, a business error, a panic, and ignoring its
//! deadline, so every log path shows up.
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example periodic
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use cyclevisor::{
    Config, HandlerError, HandlerFn, Introspect, Lifecycle, Periodic, Request,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cfg = Config::new(Duration::from_millis(300), Duration::from_secs(1), 1);
    let calls = Arc::new(AtomicU64::new(0));

    let daemon = Arc::new(
        Periodic::setup(&cfg)
            .with_key("demo-sweeper")
            .routing(HandlerFn::arc(move |req: Request| {
                let n = calls.fetch_add(1, Ordering::Relaxed);
                async move {
                    match n % 4 {
                        0 => Ok(()),
                        1 => Err(HandlerError::fail("upstream unavailable")),
                        2 => panic!("unexpected state in call {n}"),
                        _ => {
                            // Outlives the deadline; the watcher only warns.
                            tokio::time::sleep(Duration::from_millis(500)).await;
                            println!(
                                "worker {} finished late (cancelled={})",
                                req.id(),
                                req.is_cancelled()
                            );
                            Ok(())
                        }
                    }
                }
            })),
    );

    println!("{} key={} details={:?}", daemon.identify(), daemon.key(), daemon.details());

    let runner = tokio::spawn({
        let daemon = Arc::clone(&daemon);
        async move { daemon.run().await }
    });

    tokio::signal::ctrl_c().await?;
    daemon.shutdown().await?;
    match tokio::time::timeout(daemon.wait_hint(), runner).await {
        Ok(res) => res??,
        Err(_) => println!("cycle still running after {:?}; exiting", daemon.wait_hint()),
    }

    println!("{:?}", daemon.reporter().snapshot());
    Ok(())
}

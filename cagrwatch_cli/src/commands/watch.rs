//! The `watch` subcommand: recomputes growth rates on a fixed interval.
//!
//! Each tick re-plans against the current date, runs the computation and then
//! renders its result; nothing is carried between ticks.

use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Result};
use cagrwatch_lib::{CagrTracker, SeriesSource, SymbolOutcome};
use clap::Args;
use tokio::time::MissedTickBehavior;

use super::{build_tracker, today, Plan, RangeArgs};
use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Seconds between refreshes
    #[arg(long, default_value = "60")]
    pub interval_secs: u64,

    /// Stop after this many refreshes (default: run until Ctrl-C)
    #[arg(long)]
    pub iterations: Option<u64>,
}

pub async fn run(args: &WatchArgs, format: &OutputFormat) -> Result<()> {
    let period = refresh_period(args.interval_secs)?;

    let tracker = build_tracker(&args.range)?;
    // Fail on bad arguments before the first tick.
    args.range.plan(tracker.table(), today())?;

    eprintln!(
        "Refreshing every {}s; press Ctrl-C to stop",
        args.interval_secs
    );

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Ctrl-C handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    watch_loop(
        &tracker,
        period,
        args.iterations,
        || args.range.plan(tracker.table(), today()),
        |outcomes| {
            eprintln!(
                "Refreshed at {}",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
            );
            render(outcomes, format)
        },
        shutdown,
    )
    .await?;

    Ok(())
}

fn refresh_period(interval_secs: u64) -> Result<Duration> {
    if interval_secs == 0 {
        bail!("--interval-secs must be at least 1");
    }
    Ok(Duration::from_secs(interval_secs))
}

/// Refreshes every `period` until `iterations` renders have happened or
/// `shutdown` resolves, whichever comes first. `shutdown` is polled for the
/// whole run, including while a refresh is in flight, which it cancels.
///
/// Returns the number of completed refreshes.
pub async fn watch_loop<S, P, R, F>(
    tracker: &CagrTracker<S>,
    period: Duration,
    iterations: Option<u64>,
    mut plan: P,
    mut on_refresh: R,
    shutdown: F,
) -> Result<u64>
where
    S: SeriesSource + 'static,
    P: FnMut() -> Result<Plan>,
    R: FnMut(&[SymbolOutcome]) -> Result<()>,
    F: Future<Output = ()>,
{
    if period.is_zero() {
        bail!("refresh interval must be non-zero");
    }

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    let mut refreshes = 0u64;
    while iterations.map_or(true, |n| refreshes < n) {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }

        let current = plan()?;
        let outcomes = tokio::select! {
            outcomes = tracker.track_all(&current.symbols, current.start, current.end) => outcomes,
            _ = &mut shutdown => {
                tracing::info!("Interrupted during refresh, stopping watch");
                break;
            }
        };

        on_refresh(&outcomes)?;
        refreshes += 1;
    }

    Ok(refreshes)
}

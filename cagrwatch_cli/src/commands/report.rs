//! The `report` subcommand: computes growth rates once and prints them.

use anyhow::Result;
use clap::Args;

use super::{build_tracker, today, RangeArgs};
use crate::output::{render, OutputFormat};

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub range: RangeArgs,
}

pub async fn run(args: &ReportArgs, format: &OutputFormat) -> Result<()> {
    let tracker = build_tracker(&args.range)?;
    let plan = args.range.plan(tracker.table(), today())?;

    eprintln!(
        "Computing CAGR for {} symbols from {} to {}",
        plan.symbols.len(),
        plan.start,
        plan.end
    );

    let outcomes = tracker.track_all(&plan.symbols, plan.start, plan.end).await;
    render(&outcomes, format)?;

    let computed = outcomes.iter().filter(|o| o.outcome.is_ok()).count();
    if computed < outcomes.len() {
        eprintln!(
            "{} of {} symbols computed; rerun with RUST_LOG=cagrwatch=debug for details",
            computed,
            outcomes.len()
        );
    }

    Ok(())
}

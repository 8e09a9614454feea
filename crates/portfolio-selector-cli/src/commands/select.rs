use clap::Args;
use serde_json::Value;
use std::time::Instant;

use portfolio_selector_core::selection::SelectionPolicy;
use portfolio_selector_core::with_metadata;

use super::Session;

/// Arguments for portfolio selection
#[derive(Args)]
pub struct SelectArgs {
    /// Selection policy: random, brute_force, greedy
    #[arg(long, short)]
    pub policy: SelectionPolicy,

    /// Number of assets in the portfolio (1 to the number of assets loaded)
    #[arg(long, short)]
    pub size: usize,
}

pub fn methodology(policy: SelectionPolicy) -> &'static str {
    match policy {
        SelectionPolicy::Random => "Uniform random sample without replacement",
        SelectionPolicy::BruteForce => "Exhaustive search maximising summed expected return",
        SelectionPolicy::Greedy => "Exhaustive search maximising summed effective return",
    }
}

pub fn run_select(session: &mut Session, args: SelectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let selection = session.select(args.policy, args.size)?;
    let elapsed = start.elapsed().as_micros() as u64;

    let mut warnings = Vec::new();
    if args.policy != SelectionPolicy::Random && args.size == session.selector.len() {
        warnings.push("Portfolio spans every asset; search skipped".to_string());
    }

    let output = with_metadata(
        methodology(args.policy),
        &serde_json::json!({
            "policy": args.policy,
            "portfolio_size": args.size,
            "universe": session.selector.len(),
            "source": session.source,
        }),
        warnings,
        elapsed,
        selection,
    );
    Ok(serde_json::to_value(output)?)
}

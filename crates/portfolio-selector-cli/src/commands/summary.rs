use serde_json::Value;

use portfolio_selector_core::with_metadata;

use super::Session;

pub fn run_summary(session: &Session) -> Result<Value, Box<dyn std::error::Error>> {
    let summaries = session.selector.summaries();

    let warnings: Vec<String> = summaries
        .iter()
        .filter(|s| s.prices_variance.is_zero())
        .map(|s| format!("{} has a constant price over {} observations", s.asset, s.observations))
        .collect();

    let output = with_metadata(
        "Per-asset statistics: sample (n-1) variance, scenario-weighted expected return",
        &serde_json::json!({
            "source": session.source,
            "observations": session.observations,
            "assets": summaries.len(),
            "scenarios": session.scenarios,
        }),
        warnings,
        session.summarize_us,
        summaries,
    );
    Ok(serde_json::to_value(output)?)
}

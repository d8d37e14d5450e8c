//! Handler for the `premium` command.

use crate::adapter::inbound::cli::output;
use crate::adapter::render;
use crate::domain::{PremiumResult, Symbol};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_calculator;
use crate::infrastructure::config::Config;

/// Compute and print the kimchi premium of one coin.
///
/// Uses its own calculator; the monitor's cooldown state is never touched.
pub async fn execute(raw_symbol: &str, config: &Config) -> Result<()> {
    let symbol = Symbol::new(raw_symbol);

    let calculator = build_calculator(&config.upstream);
    let result = calculator.compute_premium(&symbol).await?;
    print_result(&result)
}

fn print_result(result: &PremiumResult) -> Result<()> {
    if output::is_json() {
        let mut payload = serde_json::to_value(result)?;
        if let Some(map) = payload.as_object_mut() {
            map.insert("band".into(), serde_json::Value::from(result.band().to_string()));
        }
        output::json_output("premium", payload);
        return Ok(());
    }

    output::lines(&render::premium_report(result));
    if result.fx_fallback {
        output::warning(&format!(
            "FX rate unavailable, converted at fallback rate {}",
            result.fx_rate
        ));
    }
    Ok(())
}

//! Handler for the `compare` command.

use crate::adapter::inbound::cli::output;
use crate::adapter::render;
use crate::domain::Symbol;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_calculator;
use crate::infrastructure::config::Config;

/// Print the Upbit vs Bithumb price of one coin.
pub async fn execute(raw_symbol: &str, config: &Config) -> Result<()> {
    let symbol = Symbol::new(raw_symbol);

    let comparison = build_calculator(&config.upstream)
        .compare_exchanges(&symbol)
        .await?;

    if output::is_json() {
        let mut payload = serde_json::to_value(&comparison)?;
        if let Some(map) = payload.as_object_mut() {
            map.insert(
                "cheaper".into(),
                serde_json::Value::from(comparison.cheaper().to_string()),
            );
        }
        output::json_output("comparison", payload);
        return Ok(());
    }

    output::lines(&render::comparison_report(&comparison));
    Ok(())
}

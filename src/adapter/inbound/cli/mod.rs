//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod compare;
pub mod diagnostic;
pub mod market;
pub mod output;
pub mod premium;
pub mod run;

use std::path::{Path, PathBuf};

use command::{Cli, Commands, ConfigPathArg, DEFAULT_CONFIG};
use output::OutputConfig;

use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute a parsed command line.
///
/// Logging is initialized here once. Only `run` logs at the configured
/// level; the one-shot commands log warnings only unless `-v` is given.
pub async fn execute(cli: Cli) -> miette::Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config_arg = match &cli.command {
        Commands::Run(args) => &args.config,
        Commands::Premium(args) | Commands::Compare(args) => &args.config,
        Commands::Price(args) => &args.config,
        Commands::Markets(args) => &args.config,
        Commands::Orderbook(args) => &args.config,
        Commands::Candles(args) => &args.config,
        Commands::Movers(args) => &args.config,
        Commands::Check(args) => args,
    };
    let config_path = config_arg.config.clone();

    let result = match load_config(config_arg) {
        Ok(mut config) => {
            if !matches!(cli.command, Commands::Run(_)) && cli.verbose == 0 {
                config.logging.level = "warn".to_string();
            }
            config.logging.init();
            dispatch(&cli.command, config, config_arg).await
        }
        Err(e) => Err(e),
    };

    result.map_err(|err| {
        let path = config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
        diagnostic::report(err, Some(path.as_path()))
    })
}

async fn dispatch(command: &Commands, config: Config, config_arg: &ConfigPathArg) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(args, config).await,
        Commands::Premium(args) => premium::execute(&args.symbol, &config).await,
        Commands::Compare(args) => compare::execute(&args.symbol, &config).await,
        Commands::Price(args) => market::price(&args.symbols, &config).await,
        Commands::Markets(args) => market::markets(args.quote.into(), &config).await,
        Commands::Orderbook(args) => {
            market::orderbook(&args.symbol, usize::from(args.depth), &config).await
        }
        Commands::Candles(args) => {
            market::candles(&args.symbol, args.interval, args.count, &config).await
        }
        Commands::Movers(args) => market::movers(args.down, usize::from(args.limit), &config).await,
        Commands::Check(_) => {
            check::execute(&config, &config_source(config_arg));
            Ok(())
        }
    }
}

/// Load the configuration named by `--config`, or the default file when
/// present, falling back to built-in defaults.
pub fn load_config(arg: &ConfigPathArg) -> Result<Config> {
    match &arg.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(DEFAULT_CONFIG),
    }
}

/// Human-readable description of where the configuration came from.
fn config_source(arg: &ConfigPathArg) -> String {
    match &arg.config {
        Some(path) => path.display().to_string(),
        None if Path::new(DEFAULT_CONFIG).exists() => DEFAULT_CONFIG.to_string(),
        None => "built-in defaults".to_string(),
    }
}

use card_fair_value::cli::{Cli, Commands};
use card_fair_value::config::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
            eprintln!("Using default configuration");
            Config::parse(include_str!("../config.toml.example"))?
        }
    };

    // Initialize telemetry
    card_fair_value::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Predict(args) => args.execute(&config)?,
        Commands::Signal(args) => args.execute(&config)?,
        Commands::Cards(args) => args.execute(&config)?,
        Commands::Scan(args) => {
            tracing::info!("Starting scan");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Data: {}", config.data.processed_path.display());
            println!(
                "  Model: window={} policy={:?} cache={}",
                config.model.window_size, config.model.window_policy, config.model.cache_capacity
            );
            println!(
                "  Decision: BUY <= -{}%, SELL >= +{}%",
                config.decision.buy_threshold_pct * rust_decimal_macros::dec!(100),
                config.decision.sell_threshold_pct * rust_decimal_macros::dec!(100)
            );
            println!(
                "  Telemetry: level={} format={:?} metrics_port={:?}",
                config.telemetry.log_level, config.telemetry.log_format, config.telemetry.metrics_port
            );
        }
    }

    Ok(())
}

use microroute::cli::run_cli;
use microroute::logging::{init_logging_with_config, LogConfig};

fn main() -> anyhow::Result<()> {
    let mut config = LogConfig::from_env();
    if std::env::var("MICROROUTE_LOG_FORMAT").is_err() {
        config.format = microroute::logging::LogFormat::Pretty;
    }
    if std::env::var("MICROROUTE_LOG_LEVEL").is_err() {
        config.log_level = "warn".to_string();
    }
    let _guard = init_logging_with_config(&config)?;
    run_cli()
}

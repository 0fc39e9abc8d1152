use clap::Parser;
use gig_applier::config::LoggingConfig;
use gig_applier::core::engine::log_summary;
use gig_applier::utils::{logger, validation::Validate};
use gig_applier::{AppConfig, ApplyEngine, CliArgs, HttpJobBoard};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let config = match AppConfig::from_file(&args.config).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            logger::init_logger(&LoggingConfig::default(), args.verbose);
            tracing::error!("Failed to load config '{}': {}", args.config, e);
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            std::process::exit(1);
        }
    };

    logger::init_logger(&config.logging, args.verbose);
    tracing::info!(
        "Loaded {} platforms ({} enabled) from {}",
        config.platforms.len(),
        config.enabled_platforms().count(),
        args.config
    );
    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - listings are fetched but no applications are sent");
    }

    let board = HttpJobBoard::from_config(&config.http);
    let engine = ApplyEngine::new(board, config.pacing.clone()).with_dry_run(args.dry_run);

    let summary = engine.run(&config.platforms).await;
    log_summary(&summary);
}

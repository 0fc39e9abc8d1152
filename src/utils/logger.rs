use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the process-wide subscriber. `RUST_LOG` wins over the config
/// level; `verbose` forces debug output for this crate.
pub fn init_logger(config: &LoggingConfig, verbose: bool) {
    let directive = if verbose {
        "gig_applier=debug,info".to_string()
    } else {
        format!("gig_applier={level},{level}", level = config.level.trim())
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry.with(fmt_layer.json()).init(),
        LogFormat::Compact => registry.with(fmt_layer.compact()).init(),
    }
}


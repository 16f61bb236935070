use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use zonerules_app::report::{report_zone, summarize};
use zonerules_core::config::load_config;
use zonerules_rules::zone::MemoryProvider;

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting zone rules loader");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let provider = MemoryProvider::load_directory(&config.data.directory)?;
    if provider.is_empty() {
        tracing::warn!(directory = %config.data.directory, "No zone data found");
    }
    summarize(&provider)?;

    if let Some(zone_id) = &config.report.zone {
        report_zone(
            &provider,
            zone_id,
            config.report.from_year,
            config.report.to_year,
        )?;
    }

    Ok(())
}

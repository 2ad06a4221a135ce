use tracing::debug;

/// Install error reporting, load `.env` and start the log subscriber.
///
/// Logs go to stderr; stdout is reserved for the reports each binary prints.
pub fn init() -> eyre::Result<()> {
    color_eyre::install()?;

    let dotenv = dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .without_time()
        .init();

    if let Some(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    Ok(())
}

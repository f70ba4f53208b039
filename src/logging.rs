use tracing_subscriber::EnvFilter;

/// Installs the process-wide fmt subscriber. Diagnostics go to stderr so the
/// report stream and any piped output stay clean.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

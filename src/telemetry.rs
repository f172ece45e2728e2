use tracing_subscriber::{EnvFilter, fmt};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init() {
    let _ = fmt().with_env_filter(filter()).try_init();
}

/// For the function host, where stdout carries the response.
pub fn init_stderr() {
    let _ = fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .try_init();
}

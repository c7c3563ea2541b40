use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "fusion_inbox=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    fusion_inbox::cli::run()
}

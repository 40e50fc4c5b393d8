use clap::Parser;
use tessera::cli::Cli;
use tessera::vault::VaultEngine;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; set TESSERA_LOG=debug to see engine events.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TESSERA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The one engine for this process; every command borrows it.
    let mut engine = VaultEngine::new();

    if let Err(e) = tessera::cli::run(&cli, &mut engine) {
        tessera::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

//! gonut - verify that a Cloud Foundry platform can build and run sample apps

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gonut_cli::cli::{Cli, RenderedError};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env("GONUT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        match e.downcast_ref::<RenderedError>() {
            Some(rendered) => eprintln!("{rendered}"),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

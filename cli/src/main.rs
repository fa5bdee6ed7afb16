//! podbridge - keep podman's remote connections pointed at a lima VM

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use podbridge_cli::cli::Cli;
use podbridge_cli::domain::PodmanError;
use podbridge_cli::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            if json {
                let code = e
                    .chain()
                    .find_map(|cause| cause.downcast_ref::<PodmanError>())
                    .map_or("error", PodmanError::code);
                match format_error(&format!("{e:#}"), code) {
                    Ok(out) => println!("{out}"),
                    Err(_) => eprintln!("Error: {e:#}"),
                }
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

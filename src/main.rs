use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use oscript_lsp::Backend;

/// Language server for InterSystems ObjectScript, speaking LSP over stdio.
#[derive(Parser)]
#[command(name = "oscript-lsp", version, about)]
struct Args {
    /// Accepted for editor compatibility; stdio is the only transport.
    #[arg(long)]
    stdio: bool,
    /// Log filter, e.g. `info` or `oscript_lsp=debug`. Overridden by
    /// RUST_LOG when set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout belongs to the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(stdio = args.stdio, "starting OScriptLSP");

    let (service, socket) = LspService::new(Backend::new);
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}

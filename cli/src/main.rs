//! `tomcat-manager <COMMAND> [KEY=VALUE]...`
//!
//! Builds the Manager request, runs it through curl, and prints the parsed
//! response. A `FAIL` status is reported in the output, not through the exit
//! code; only transport errors exit non-zero.

mod args;
mod render;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use tomcat_manager_core::{CurlTransport, ManagerClient};

use args::Cli;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = ManagerClient::new(cli.endpoint());
    let command = client.command(&cli.command, cli.options());
    let transport = CurlTransport::with_program(cli.curl.clone());

    let response = command.run(&transport).with_context(|| {
        format!(
            "executing `{}` against {}",
            command.name(),
            client.endpoint().base_url()
        )
    })?;

    let mut stdout = std::io::stdout().lock();
    if cli.json {
        render::json(&mut stdout, &response)
    } else {
        render::text(&mut stdout, &response)
    }
}

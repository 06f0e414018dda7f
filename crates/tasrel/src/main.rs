//! Tasrel - Release changelog compiler for CelesteTAS

mod cli;
mod exit_codes;
mod pipeline;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;
use pipeline::InputError;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        tracing::error!("{err:#}");
        std::process::exit(exit_code_for(&err));
    }
}

/// Console logging controlled by RUST_LOG (default: info)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

/// Map failures to exit codes; input-shape errors get their own code
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<InputError>().is_some() {
        exit_codes::INPUT_ERROR
    } else {
        exit_codes::ERROR
    }
}

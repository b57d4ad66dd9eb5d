//! This crate contains the source code for the `mazegrid` binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use env_logger::{Builder, Env};
use mazegrid::cli::{self, Cli};

fn main() -> Result<()> {
    install()?;
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    cli::run(Cli::parse())
}

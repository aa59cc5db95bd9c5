use anyhow::Result;
use clap::Parser;
use port_deptree::cli::{self, Cli};
use port_deptree::logging::init_logger;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet, cli.no_color);
    cli::run(&cli)
}

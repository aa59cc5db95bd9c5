use crate::adapters::macports::{MacPortsAdapter, MacPortsConfig, StatusMode};
use crate::app::engine::DeptreeEngine;
use crate::app::request::parse_requests;
use crate::render::OutputFormat;
use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "port-deptree")]
#[command(version)]
#[command(about = "Print all dependencies required to build a port as a graph", long_about = None)]
#[command(after_help = "Options must come before the first port name.\n\n\
EXAMPLES:\n    \
port-deptree irssi -perl | dot -Tpdf -oirssi.pdf\n    \
port-deptree $(port echo requested and outdated) | dot -Tpdf | open -fa Preview")]
pub struct Cli {
    /// Output format
    #[arg(long, default_value_t = OutputFormat::Dot, value_name = "dot|json")]
    pub format: OutputFormat,

    /// Query installed/outdated ports once with `port echo` instead of per port
    #[arg(long)]
    pub bulk_status: bool,

    /// The MacPorts `port` executable
    #[arg(long, env = "PORT_DEPTREE_PORT", default_value = "port", value_name = "PATH")]
    pub port_command: PathBuf,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Port names, each followed by its variants (+foo / -bar)
    #[arg(
        value_name = "PORTNAME [VARIANTS]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub ports: Vec<String>,
}

impl Cli {
    pub fn oracle_config(&self) -> MacPortsConfig {
        MacPortsConfig {
            command: self.port_command.clone(),
            status_mode: if self.bulk_status {
                StatusMode::Bulk
            } else {
                StatusMode::PerPort
            },
        }
    }
}

/// Traverse the requested ports, write the graph to stdout and the summary
/// to stderr.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    let requests = match parse_requests(&cli.ports) {
        Ok(requests) => requests,
        Err(err) => {
            eprintln!("error: {}\n", err);
            eprintln!("{}", Cli::command().render_help());
            return Ok(ExitCode::FAILURE);
        }
    };

    let engine = DeptreeEngine::new(Arc::new(MacPortsAdapter::new(cli.oracle_config())));
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let rendered = engine.run(&requests, cli.format, &mut out)?;
    eprintln!("{}", rendered.summary);

    Ok(ExitCode::SUCCESS)
}

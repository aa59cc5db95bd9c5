use crate::adapters::macports::parser::{parse_dependencies, parse_port_list, parse_status};
use crate::domain::ports::{Dependency, DependencyOracle, OracleError};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;
use std::sync::OnceLock;
use tracing::debug;

/// How installed/outdated facts are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMode {
    /// `port installed <name>` / `port outdated <name>` for every port
    #[default]
    PerPort,
    /// `port echo installed` / `port echo outdated` once, then set lookups
    Bulk,
}

#[derive(Debug, Clone)]
pub struct MacPortsConfig {
    /// Executable to run, normally `port`
    pub command: PathBuf,
    pub status_mode: StatusMode,
}

impl Default for MacPortsConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from("port"),
            status_mode: StatusMode::PerPort,
        }
    }
}

/// Dependency oracle backed by the MacPorts `port` command line
pub struct MacPortsAdapter {
    config: MacPortsConfig,
    installed: OnceLock<HashSet<String>>,
    outdated: OnceLock<HashSet<String>>,
}

impl MacPortsAdapter {
    pub fn new(config: MacPortsConfig) -> Self {
        Self {
            config,
            installed: OnceLock::new(),
            outdated: OnceLock::new(),
        }
    }

    /// Run `port <args...>` and return its stdout.
    fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<String, OracleError> {
        let command_line = self.command_line(args);
        debug!(command = %command_line, "running oracle");

        let output = Command::new(&self.config.command)
            .args(args.iter().map(AsRef::as_ref))
            .output()
            .map_err(|e| OracleError::Unavailable {
                command: command_line.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OracleError::Unavailable {
                command: command_line,
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn command_line<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut line = self.config.command.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg.as_ref());
        }
        line
    }

    /// Fetch `port echo <pseudo_port>` once and cache the names.
    fn cached_list<'a>(
        &self,
        cell: &'a OnceLock<HashSet<String>>,
        pseudo_port: &str,
    ) -> Result<&'a HashSet<String>, OracleError> {
        if let Some(names) = cell.get() {
            return Ok(names);
        }
        let names = parse_port_list(&self.run(&["echo", pseudo_port])?);
        debug!(pseudo_port, count = names.len(), "cached port list");
        // A concurrent caller may have won the race; both lists are identical.
        Ok(cell.get_or_init(|| names))
    }
}

impl DependencyOracle for MacPortsAdapter {
    fn list_dependencies(
        &self,
        name: &str,
        variants: &[String],
    ) -> Result<Vec<Dependency>, OracleError> {
        let mut args = vec!["deps", name];
        args.extend(variants.iter().map(String::as_str));
        Ok(parse_dependencies(&self.run(args.as_slice())?))
    }

    fn is_installed(&self, name: &str) -> Result<bool, OracleError> {
        match self.config.status_mode {
            StatusMode::PerPort => {
                let output = self.run(&["installed", name])?;
                Ok(parse_status(&output, "None"))
            }
            StatusMode::Bulk => {
                let installed = self.cached_list(&self.installed, "installed")?;
                Ok(installed.contains(name))
            }
        }
    }

    fn is_outdated(&self, name: &str) -> Result<bool, OracleError> {
        match self.config.status_mode {
            StatusMode::PerPort => {
                let output = self.run(&["outdated", name])?;
                Ok(parse_status(&output, "No"))
            }
            StatusMode::Bulk => {
                let outdated = self.cached_list(&self.outdated, "outdated")?;
                Ok(outdated.contains(name))
            }
        }
    }
}

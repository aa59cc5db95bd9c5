//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use port_deptree::domain::edge::Section;
use port_deptree::domain::ports::{Dependency, DependencyOracle, OracleError};

/// In-memory oracle serving a fixed dependency table.
///
/// Every port is installed and up to date unless marked otherwise. Calls are
/// counted per port so tests can check visit-once guarantees.
#[derive(Default)]
pub struct MockOracle {
    deps: HashMap<String, Vec<Dependency>>,
    variant_deps: HashMap<(String, Vec<String>), Vec<Dependency>>,
    missing: HashSet<String>,
    outdated: HashSet<String>,
    unavailable: HashSet<String>,
    status_unavailable: HashSet<String>,
    status_delay: Option<Duration>,
    list_delay: Option<Duration>,
    list_calls: Mutex<Vec<(String, Vec<String>)>>,
    installed_calls: Mutex<HashMap<String, usize>>,
    outdated_calls: Mutex<HashMap<String, usize>>,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// `name` depends on `children`, given as `(section, child)` pairs.
    pub fn with_deps(mut self, name: &str, children: &[(&str, &str)]) -> Self {
        self.deps.insert(name.to_string(), to_dependencies(children));
        self
    }

    /// Dependencies of `name` when built with exactly `variants`.
    pub fn with_variant_deps(
        mut self,
        name: &str,
        variants: &[&str],
        children: &[(&str, &str)],
    ) -> Self {
        let key = (
            name.to_string(),
            variants.iter().map(|v| v.to_string()).collect(),
        );
        self.variant_deps.insert(key, to_dependencies(children));
        self
    }

    pub fn missing(mut self, name: &str) -> Self {
        self.missing.insert(name.to_string());
        self
    }

    pub fn outdated(mut self, name: &str) -> Self {
        self.outdated.insert(name.to_string());
        self
    }

    /// Any query about `name` fails as if `port` crashed.
    pub fn unavailable(mut self, name: &str) -> Self {
        self.unavailable.insert(name.to_string());
        self
    }

    /// Only installed/outdated checks for `name` fail.
    pub fn status_unavailable(mut self, name: &str) -> Self {
        self.status_unavailable.insert(name.to_string());
        self
    }

    /// Slow down installed/outdated checks.
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = Some(delay);
        self
    }

    /// Slow down dependency listing.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// `list_dependencies` calls in the order they happened.
    pub fn list_calls(&self) -> Vec<(String, Vec<String>)> {
        self.list_calls.lock().clone()
    }

    pub fn list_count(&self, name: &str) -> usize {
        self.list_calls
            .lock()
            .iter()
            .filter(|(called, _)| called == name)
            .count()
    }

    pub fn installed_count(&self, name: &str) -> usize {
        self.installed_calls.lock().get(name).copied().unwrap_or(0)
    }

    pub fn outdated_count(&self, name: &str) -> usize {
        self.outdated_calls.lock().get(name).copied().unwrap_or(0)
    }

    fn check_available(&self, query: &str, name: &str) -> Result<(), OracleError> {
        let status_query = query != "deps";
        if self.unavailable.contains(name)
            || (status_query && self.status_unavailable.contains(name))
        {
            return Err(OracleError::Unavailable {
                command: format!("port {} {}", query, name),
                reason: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }

    fn delay(&self) {
        if let Some(delay) = self.status_delay {
            thread::sleep(delay);
        }
    }

    /// Total `list_dependencies` calls.
    pub fn total_list_count(&self) -> usize {
        self.list_calls.lock().len()
    }
}

fn to_dependencies(children: &[(&str, &str)]) -> Vec<Dependency> {
    children
        .iter()
        .map(|(section, child)| Dependency::new(Section::from_label(section), *child))
        .collect()
}

impl DependencyOracle for MockOracle {
    fn list_dependencies(
        &self,
        name: &str,
        variants: &[String],
    ) -> Result<Vec<Dependency>, OracleError> {
        self.list_calls
            .lock()
            .push((name.to_string(), variants.to_vec()));
        if let Some(delay) = self.list_delay {
            thread::sleep(delay);
        }
        self.check_available("deps", name)?;
        let key = (name.to_string(), variants.to_vec());
        Ok(self
            .variant_deps
            .get(&key)
            .or_else(|| self.deps.get(name))
            .cloned()
            .unwrap_or_default())
    }

    fn is_installed(&self, name: &str) -> Result<bool, OracleError> {
        *self
            .installed_calls
            .lock()
            .entry(name.to_string())
            .or_default() += 1;
        self.delay();
        self.check_available("installed", name)?;
        Ok(!self.missing.contains(name))
    }

    fn is_outdated(&self, name: &str) -> Result<bool, OracleError> {
        *self
            .outdated_calls
            .lock()
            .entry(name.to_string())
            .or_default() += 1;
        self.delay();
        self.check_available("outdated", name)?;
        Ok(self.outdated.contains(name))
    }
}

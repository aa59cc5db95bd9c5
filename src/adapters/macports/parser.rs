// `port` output parsing utilities
// Pure functions over captured stdout; no process handling here.

use crate::domain::edge::Section;
use crate::domain::ports::{Dependency, OracleError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::warn;

/// `<Label> Dependencies: a, b, c` - captures the label and the child list.
fn dependency_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<label>[^:]*Dependencies):(?P<children>.*)$")
            .expect("dependency line regex")
    })
}

/// Parse one line of `port deps` output.
///
/// `Ok(None)` for lines that are not dependency lines (e.g. `Full Name: ...`).
pub fn parse_dependency_line(line: &str) -> Result<Option<Vec<Dependency>>, OracleError> {
    let Some(caps) = dependency_line_regex().captures(line.trim_end()) else {
        return Ok(None);
    };
    let malformed = || OracleError::Malformed {
        line: line.to_string(),
    };

    let word = caps["label"]
        .split_whitespace()
        .next()
        .ok_or_else(malformed)?;
    let section = Section::from_label(word);

    let children: Vec<Dependency> = caps["children"]
        .split(',')
        .map(str::trim)
        .filter(|child| !child.is_empty())
        .map(|child| Dependency::new(section.clone(), child))
        .collect();
    if children.is_empty() {
        return Err(malformed());
    }
    Ok(Some(children))
}

/// Parse the full output of `port deps`, skipping malformed lines.
pub fn parse_dependencies(output: &str) -> Vec<Dependency> {
    let mut dependencies = Vec::new();
    for line in output.lines() {
        match parse_dependency_line(line) {
            Ok(Some(children)) => dependencies.extend(children),
            Ok(None) => {}
            Err(err) => warn!("skipping line: {}", err),
        }
    }
    dependencies
}

/// Interpret a status query: the first line starting with `sentinel` means
/// the negative case. Empty output is negative as well.
pub fn parse_status(output: &str, sentinel: &str) -> bool {
    match output.lines().next() {
        Some(first) => !first.trim_start().starts_with(sentinel),
        None => false,
    }
}

/// Port names from `port echo <pseudo-port>` output (first word of each line).
pub fn parse_port_list(output: &str) -> HashSet<String> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(String::from)
        .collect()
}

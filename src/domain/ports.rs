use crate::domain::edge::Section;
use crate::domain::node::PortName;

/// One `(section, child)` pair reported by the oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub section: Section,
    pub name: PortName,
}

impl Dependency {
    pub fn new(section: Section, name: impl Into<PortName>) -> Self {
        Self {
            section,
            name: name.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The external tool could not be launched or exited abnormally.
    #[error("dependency oracle unavailable: `{command}`: {reason}")]
    Unavailable { command: String, reason: String },

    /// A dependency line that cannot be split into section and children.
    #[error("malformed oracle output: {line:?}")]
    Malformed { line: String },
}

/// Dependency oracle port (implemented by Infrastructure)
///
/// Implementations must be safe to call from the traversal thread and the
/// decoration worker at the same time.
pub trait DependencyOracle: Send + Sync {
    /// List the direct dependencies of `name` built with `variants`, in
    /// oracle output order. No dependency lines means no dependencies.
    fn list_dependencies(
        &self,
        name: &str,
        variants: &[String],
    ) -> Result<Vec<Dependency>, OracleError>;

    fn is_installed(&self, name: &str) -> Result<bool, OracleError>;

    fn is_outdated(&self, name: &str) -> Result<bool, OracleError>;
}

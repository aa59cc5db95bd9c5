use serde::Serialize;

/// Edge kind - the dependency section a child was listed under
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Library,
    Fetch,
    Extract,
    Build,
    Runtime,
    /// Any other label the oracle reports (e.g. "test"), kept lowercase
    Other(String),
}

impl Section {
    /// Map the first word of a `<Section> Dependencies` label to a section.
    pub fn from_label(word: &str) -> Self {
        let word = word.to_lowercase();
        match word.as_str() {
            "library" => Section::Library,
            "fetch" => Section::Fetch,
            "extract" => Section::Extract,
            "build" => Section::Build,
            "runtime" => Section::Runtime,
            _ => Section::Other(word),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Section::Library => "library",
            Section::Fetch => "fetch",
            Section::Extract => "extract",
            Section::Build => "build",
            Section::Runtime => "runtime",
            Section::Other(label) => label,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge payload: parent -> child under one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeData {
    pub section: Section,
}

//! Turn positional command-line words into traversal requests.
//!
//! `irssi -perl +ssl glib2 @2.78.0` yields `irssi [-perl, +ssl]` and
//! `glib2 []`: words starting with `+`/`-` are variants of the preceding
//! port and `@version` specifiers are ignored.

/// One root to traverse, with the variants it is built with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalRequest {
    pub port: String,
    pub variants: Vec<String>,
}

impl TraversalRequest {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variants<I, S>(port: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            port: port.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for TraversalRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.port)?;
        for variant in &self.variants {
            write!(f, " {}", variant)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("no port name given")]
    Empty,

    #[error("variant `{0}` given before any port name")]
    VariantWithoutPort(String),
}

fn is_variant(word: &str) -> bool {
    word.starts_with('+') || word.starts_with('-')
}

pub fn parse_requests<I, S>(words: I) -> Result<Vec<TraversalRequest>, RequestError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut requests: Vec<TraversalRequest> = Vec::new();
    for word in words {
        let word = word.as_ref();
        if word.is_empty() || word.starts_with('@') {
            continue;
        }
        if is_variant(word) {
            let current = requests
                .last_mut()
                .ok_or_else(|| RequestError::VariantWithoutPort(word.to_string()))?;
            current.variants.push(word.to_string());
        } else {
            requests.push(TraversalRequest::new(word));
        }
    }

    if requests.is_empty() {
        return Err(RequestError::Empty);
    }
    Ok(requests)
}

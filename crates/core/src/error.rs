use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid route path '{path}': {reason}")]
    InvalidRoutePath { path: String, reason: String },

    #[error("Invalid route template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Unknown route '{key}'")]
    UnknownRoute { key: String },

    #[error("Route key '{key}' is registered twice")]
    DuplicateRouteKey { key: String },

    #[error("Duplicate route '{path}': used by '{first}' and '{second}'")]
    DuplicateRoute {
        path: String,
        first: String,
        second: String,
    },

    #[error("Invalid nav item '{text}': {reason}")]
    InvalidNavItem { text: String, reason: String },

    #[error("Sidebar prefix '{prefix}' does not match any registered route{}", hint_suffix(.hint))]
    DanglingRouteReference {
        prefix: String,
        hint: Option<String>,
    },

    #[error("Broken link '{link}' in {source_label}: no matching content file")]
    BrokenLink { link: String, source_label: String },

    #[error("{} errors:\n{}", .0.len(), format_batch(.0))]
    Batch(Vec<Error>),
}

impl Error {
    /// Fold a list of collected errors into a single result.
    ///
    /// No errors is `Ok`, one error is returned as is, anything more becomes
    /// [`Error::Batch`]. Nested batches are flattened.
    pub fn collect(errors: Vec<Error>) -> Result<()> {
        if errors.is_empty() {
            return Ok(());
        }
        Err(Error::from_many(errors))
    }

    /// Combine errors into one value, flattening nested batches.
    ///
    /// A single error comes back unwrapped. Callers pass a non-empty list; an
    /// empty one yields an empty batch.
    pub fn from_many(errors: Vec<Error>) -> Error {
        let mut flat = Vec::with_capacity(errors.len());
        for err in errors {
            err.flatten_into(&mut flat);
        }

        if flat.len() == 1 {
            flat.remove(0)
        } else {
            Error::Batch(flat)
        }
    }

    /// Push this error, or each member of a batch, onto `out`.
    pub fn flatten_into(self, out: &mut Vec<Error>) {
        match self {
            Error::Batch(inner) => {
                for err in inner {
                    err.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }

    /// Number of individual errors this value stands for.
    pub fn count(&self) -> usize {
        match self {
            Error::Batch(inner) => inner.iter().map(Error::count).sum(),
            _ => 1,
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(path) => format!(" (did you mean '{}'?)", path),
        None => String::new(),
    }
}

fn format_batch(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemError {
    /// A timestamp or number could not be interpreted.
    #[error("invalid value for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },
    /// One report section failed; the rest of the report is still produced.
    #[error("{domain} section failed: {source}")]
    PartialDomainFailure {
        domain: &'static str,
        #[source]
        source: Box<RemError>,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RemError {
    pub fn invalid_input(field: &'static str, value: impl Into<String>) -> Self {
        RemError::InvalidInput {
            field,
            value: value.into(),
        }
    }

    /// Wrap a section failure so callers can tell which domain degraded.
    pub fn in_domain(self, domain: &'static str) -> Self {
        RemError::PartialDomainFailure {
            domain,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RemError>;

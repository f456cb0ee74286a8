use std::path::PathBuf;

/// Why the catalog could not be loaded. Every variant is terminal for the load:
/// the caller keeps an empty list and reports the failure.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot fetch catalog: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog must be a list of songs, found a {0}")]
    NotASequence(&'static str),
}

impl CatalogError {
    /// Load (I/O, network) failures as opposed to document parse failures.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Fetch(_))
    }
}

use std::path::PathBuf;

/// Failures surfaced to the user by the plot forms. The `Display` text is what
/// the error window shows.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Set glass from the button.")]
    NoGlassSelected,
    #[error("This glass does not have thermal data.")]
    MissingThermalData,
    #[error("This glass does not have transmittance data.")]
    MissingTransmittanceData,
    #[error("Too many graphs")]
    TooManyGraphs,
    #[error("Catalog index {0} is out of range")]
    CatalogOutOfRange(usize),
    #[error("Glass {glass} was not found in catalog {catalog}")]
    GlassNotFound { catalog: String, glass: String },
}

/// Failures while reading or writing catalog, session and export files.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Catalog {0} contains no glasses")]
    Empty(String),
}

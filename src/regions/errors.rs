use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Failed to fetch region source data: {0}")]
    Fetch(#[from] FetchError),

    /// A node was reached again while its own subtree was being flattened,
    /// or its parent chain never reaches the root.
    #[error("Region hierarchy contains a cycle through node '{id}'")]
    CyclicHierarchy { id: String },
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The page was fetched but does not look the way the parser expects.
    /// Usually means the source site changed its layout.
    #[error("Unexpected page layout: {0}")]
    Schema(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid regions file: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

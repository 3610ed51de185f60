use thiserror::Error;

#[derive(Debug, Error)]
pub enum MccMncError {
    #[error("IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid docx archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Table {index} requested but the document has only {found} tables")]
    TableNotFound { index: usize, found: usize },

    #[error("Failed to write csv: {0}")]
    Csv(#[from] csv::Error),
}

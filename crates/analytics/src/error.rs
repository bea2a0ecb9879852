use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("A salary distribution needs at least one bin")]
    InvalidBinCount,

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while exporting: {0}")]
    Io(#[from] std::io::Error),

    #[error("Exported CSV was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

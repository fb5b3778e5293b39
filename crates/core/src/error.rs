use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowpathError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("event source contains no data rows")]
    EmptySource,

    #[error("CSV error at line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("{0}")]
    Other(String),
}

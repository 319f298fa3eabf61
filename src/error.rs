use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("data source `{path}` is unavailable, reason: `{reason}`")]
    DataSourceUnavailable { path: String, reason: String },
    #[error("column `{0}` not found in the input headers")]
    MissingColumn(String),
    #[error("record #{record} has a malformed date `{value}`")]
    MalformedDate { record: usize, value: String },
    #[error("I/O failure: `{0}`")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

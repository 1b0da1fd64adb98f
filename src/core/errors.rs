use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    StatusError { url: Url, status: u16 },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Record has no {0}")]
    MissingField(&'static str),

    #[error("Gave up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: Url,
        attempts: usize,
        last: Box<ScraperError>,
    },
}

pub type ScraperResult<T> = Result<T, ScraperError>;

/// Why a single product field could not be read. Never leaves the record
/// builder: every variant collapses to an empty field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("no match for `{0}`")]
    Missing(&'static str),

    #[error("cannot convert {text:?}: {reason}")]
    Conversion { text: String, reason: String },
}

impl FieldError {
    pub(crate) fn conversion(text: &str, reason: impl ToString) -> Self {
        FieldError::Conversion {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type FieldResult<T> = Result<T, FieldError>;

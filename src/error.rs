use std::fmt;

/// Error type shared by the price checker
#[derive(Debug)]
pub enum PriceCheckError {
    /// HTTP request failed (network error, timeout, etc.)
    Request(reqwest::Error),
    /// Server answered with a non-success status
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse a JSON response
    Json(serde_json::Error),
    Io(std::io::Error),
    Csv(csv::Error),
    /// A single candidate url did not resolve to a usable page
    NotFound(String),
    /// The set catalog does not know this set code
    UnknownSet(String),
    /// The set catalog kept failing until the retry policy gave up
    CatalogUnavailable { code: String, attempts: u32 },
    /// The card list is missing a column or has an invalid value
    MalformedInput {
        line: u64,
        field: String,
        reason: String,
    },
}

impl PriceCheckError {
    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            PriceCheckError::Request(_) => true,
            PriceCheckError::HttpStatus(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

impl fmt::Display for PriceCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceCheckError::Request(e) => write!(f, "Request error: {}", e),
            PriceCheckError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            PriceCheckError::Json(e) => write!(f, "JSON error: {}", e),
            PriceCheckError::Io(e) => write!(f, "IO error: {}", e),
            PriceCheckError::Csv(e) => write!(f, "CSV error: {}", e),
            PriceCheckError::NotFound(url) => write!(f, "No page found at: {}", url),
            PriceCheckError::UnknownSet(code) => write!(f, "Unknown set code: {}", code),
            PriceCheckError::CatalogUnavailable { code, attempts } => write!(
                f,
                "Set catalog unavailable for set {} after {} attempts",
                code, attempts
            ),
            PriceCheckError::MalformedInput {
                line,
                field,
                reason,
            } => write!(f, "Malformed input on line {}, field '{}': {}", line, field, reason),
        }
    }
}

impl std::error::Error for PriceCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PriceCheckError::Request(e) => Some(e),
            PriceCheckError::Json(e) => Some(e),
            PriceCheckError::Io(e) => Some(e),
            PriceCheckError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PriceCheckError {
    fn from(err: reqwest::Error) -> Self {
        PriceCheckError::Request(err)
    }
}

impl From<serde_json::Error> for PriceCheckError {
    fn from(err: serde_json::Error) -> Self {
        PriceCheckError::Json(err)
    }
}

impl From<std::io::Error> for PriceCheckError {
    fn from(err: std::io::Error) -> Self {
        PriceCheckError::Io(err)
    }
}

impl From<csv::Error> for PriceCheckError {
    fn from(err: csv::Error) -> Self {
        PriceCheckError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, PriceCheckError>;

//! Transport error types.

/// Errors from talking to the postcode service.
///
/// A 404 from a lookup endpoint is not an error: it becomes
/// [`Lookup::NotFound`](super::Lookup::NotFound).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// HTTP request failed (DNS, connection refused, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Body was not JSON, or not the expected shape
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Base URL cannot carry a path
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Mock fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransportError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = TransportError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(
            err.to_string(),
            "JSON parse error: expected value (body: <html>)"
        );

        let err = TransportError::Json {
            message: "expected a JSON object".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected a JSON object");

        let err = TransportError::InvalidBaseUrl("mailto:x".into());
        assert_eq!(err.to_string(), "invalid base URL: mailto:x");
    }
}

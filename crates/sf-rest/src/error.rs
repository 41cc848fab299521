//! Error types for forcelink-rest.
//!
//! Every failure of a REST operation surfaces as one [`Error`]. Transport and
//! authentication failures are carried unchanged inside their kinds so callers
//! can still inspect the original error, and are reported as its
//! [`source`](std::error::Error::source).

use std::fmt;

/// Result type alias for REST operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for REST operations.
#[derive(Debug)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error, for kinds that do not carry their cause.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Transport(err) => Some(err),
            ErrorKind::Authentication(err) => Some(err),
            _ => self
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
        }
    }
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Returns true if a required input was empty or unusable.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument(_))
    }

    /// Returns true if the operation was attempted before authenticating.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self.kind, ErrorKind::NotAuthenticated)
    }

    /// Returns true if the server rejected the request.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    /// Returns true if the request never completed at the HTTP level.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// The server error code, for API errors.
    pub fn api_error_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Api { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// The offending field names, for API errors that carry them.
    pub fn api_error_fields(&self) -> Option<&[String]> {
        match &self.kind {
            ErrorKind::Api { fields, .. } => fields.as_deref(),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A required input was empty or could not be encoded.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No successful authentication yet.
    #[error("Not authenticated: call authenticate first")]
    NotAuthenticated,

    /// The server answered with a status above 299.
    #[error("{code}: {message}")]
    Api {
        code: String,
        message: String,
        fields: Option<Vec<String>>,
    },

    /// The request could not be completed.
    #[error("Transport error: {0}")]
    Transport(#[source] forcelink_client::Error),

    /// The authentication flow failed.
    #[error("Authentication error: {0}")]
    Authentication(#[source] forcelink_auth::Error),

    /// A success body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<forcelink_client::Error> for Error {
    fn from(err: forcelink_client::Error) -> Self {
        Error::new(ErrorKind::Transport(err))
    }
}

impl From<forcelink_auth::Error> for Error {
    fn from(err: forcelink_auth::Error) -> Self {
        Error::new(ErrorKind::Authentication(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Decode(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_accessors() {
        let err = Error::new(ErrorKind::Api {
            code: "REQUIRED_FIELD_MISSING".to_string(),
            message: "Required fields are missing: [Name]".to_string(),
            fields: Some(vec!["Name".to_string()]),
        });

        assert!(err.is_api_error());
        assert!(!err.is_transport());
        assert_eq!(err.api_error_code(), Some("REQUIRED_FIELD_MISSING"));
        assert_eq!(err.api_error_fields(), Some(&["Name".to_string()][..]));
        assert_eq!(
            err.to_string(),
            "REQUIRED_FIELD_MISSING: Required fields are missing: [Name]"
        );
    }

    #[test]
    fn test_non_api_error_has_no_code() {
        let err = Error::invalid_argument("objectName must not be empty");
        assert!(err.is_invalid_argument());
        assert_eq!(err.api_error_code(), None);
        assert_eq!(err.api_error_fields(), None);
    }

    #[test]
    fn test_transport_error_passes_through() {
        let inner = forcelink_client::Error::new(forcelink_client::ErrorKind::Timeout);
        let err: Error = inner.into();

        assert!(err.is_transport());
        match err.kind {
            ErrorKind::Transport(inner) => assert!(inner.is_timeout()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrapped_errors_are_the_source() {
        use std::error::Error as _;

        let err: Error = forcelink_client::Error::new(forcelink_client::ErrorKind::Timeout).into();
        let source = err.source().expect("transport error should have a source");
        assert!(source
            .downcast_ref::<forcelink_client::Error>()
            .is_some_and(forcelink_client::Error::is_timeout));

        let err: Error = forcelink_auth::Error::new(forcelink_auth::ErrorKind::InvalidCredentials(
            "bad password".to_string(),
        ))
        .into();
        let source = err.source().expect("auth error should have a source");
        assert!(source.downcast_ref::<forcelink_auth::Error>().is_some());

        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.source().is_some());

        assert!(Error::invalid_argument("x").source().is_none());
    }

    #[test]
    fn test_auth_error_passes_through() {
        let inner = forcelink_auth::Error::new(forcelink_auth::ErrorKind::OAuth {
            error: "invalid_grant".to_string(),
            description: "authentication failure".to_string(),
        });
        let err: Error = inner.into();

        match err.kind {
            ErrorKind::Authentication(inner) => assert!(inner.is_oauth_error()),
            other => panic!("expected authentication error, got {other:?}"),
        }
    }
}

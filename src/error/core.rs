//! Main error type for the client.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use super::ErrorKind;

/// The error type for every fallible client operation.
///
/// ```text
/// Error
/// ├── kind: ErrorKind          (category for matching)
/// ├── message: String          (human-readable description)
/// ├── status: Option<u16>      (HTTP status, when one was received)
/// ├── body: Option<String>     (raw response body, for diagnostics)
/// ├── details: Option<Value>   (response body parsed as JSON, when possible)
/// └── source: Option           (underlying cause)
/// ```
///
/// ## Example
///
/// ```rust
/// use ignis::{Error, ErrorKind};
///
/// fn describe(err: &Error) -> String {
///     match err.kind() {
///         ErrorKind::NotFound => "no such resource".into(),
///         ErrorKind::InvalidAuth | ErrorKind::InvalidScope => "check credentials".into(),
///         kind if kind.is_retriable() => format!("transient: {}", err),
///         _ => format!("failed: {}", err),
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    status: Option<u16>,
    body: Option<String>,
    details: Option<serde_json::Value>,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// ```rust
    /// use ignis::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Misc, "unexpected envelope");
    /// assert_eq!(err.kind(), ErrorKind::Misc);
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            details: None,
            source: None,
        }
    }

    /// Builds the error for a non-success HTTP response.
    ///
    /// Returns `None` when `status` is below 400. The body is attached
    /// verbatim; for `Misc` errors it is additionally parsed as JSON.
    pub fn from_response(status: u16, body: impl Into<String>) -> Option<Self> {
        let kind = ErrorKind::from_http_status(status)?;
        let body = body.into();

        let message = match kind {
            ErrorKind::InternalServer => format!("server returned {}: {}", status, body),
            ErrorKind::InvalidScope => "token is not valid for the requested scope".to_string(),
            ErrorKind::InvalidAuth => format!("credentials rejected: {}", body),
            ErrorKind::NotFound => "resource not found".to_string(),
            ErrorKind::Conflict => "resource conflict".to_string(),
            _ => format!("request failed with status {}", status),
        };

        let mut err = Self::new(kind, message).with_status(status);
        if kind == ErrorKind::Misc {
            err.details = serde_json::from_str(&body).ok();
        }
        if !body.is_empty() {
            err.body = Some(body);
        }
        Some(err)
    }

    /// Returns the error kind for categorization.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status that produced this error, if any.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the raw response body, if one was received.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the response body parsed as JSON, if it was valid JSON.
    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }

    /// Returns `true` if this error is generally safe to retry.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        self.kind.is_retriable()
    }

    /// Sets the HTTP status for this error.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source error for this error.
    #[must_use]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a misc API error.
    pub fn misc(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Misc, message)
    }

    /// Creates a not implemented error.
    pub fn not_implemented(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotImplemented, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Creates a closed-client error.
    pub fn closed() -> Self {
        Self::new(ErrorKind::Closed, "the client has been closed or dropped")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;

        if let Some(status) = self.status {
            write!(f, " (status: {})", status)?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::configuration(format!("invalid URL: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::misc(format!("malformed JSON: {}", err)).with_source(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::transport(format!("request failed: {}", err)).with_source(err)
    }
}

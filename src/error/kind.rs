//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// This enum provides a stable interface for matching on failure modes. The
/// HTTP-derived kinds follow the vendor API's conventions, which differ from
/// plain HTTP semantics in one place: a `400` means the token was issued for
/// the wrong scope.
///
/// | ErrorKind        | Source                         | Retriable |
/// |------------------|--------------------------------|-----------|
/// | `InternalServer` | HTTP 5xx                       | Yes       |
/// | `InvalidScope`   | HTTP 400                       | No        |
/// | `InvalidAuth`    | HTTP 403                       | No        |
/// | `NotFound`       | HTTP 404                       | No        |
/// | `Conflict`       | HTTP 409                       | No        |
/// | `Misc`           | Other 4xx, malformed bodies    | No        |
/// | `NotImplemented` | Refresh path not wired         | No        |
/// | `Configuration`  | Invalid client setup           | No        |
/// | `Transport`      | Network failure before status  | Yes       |
/// | `Closed`         | Client closed or dropped       | No        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The server failed to process the request.
    ///
    /// HTTP: 500-599
    #[error("internal server error")]
    InternalServer,

    /// The token does not carry the scope required for the request.
    ///
    /// HTTP: 400
    #[error("invalid scope")]
    InvalidScope,

    /// The credentials were rejected.
    ///
    /// HTTP: 403
    #[error("invalid authentication")]
    InvalidAuth,

    /// The resource does not exist.
    ///
    /// HTTP: 404
    #[error("not found")]
    NotFound,

    /// The request conflicts with the current state of the resource.
    ///
    /// HTTP: 409
    #[error("conflict")]
    Conflict,

    /// Any other API failure, including malformed response bodies.
    #[error("api error")]
    Misc,

    /// The requested authentication path has no implementation.
    ///
    /// Raised when an expired token must be refreshed but the bound
    /// [`OAuthHandler`](crate::OAuthHandler) does not support refreshing.
    #[error("not implemented")]
    NotImplemented,

    /// The client was configured incorrectly.
    #[error("configuration error")]
    Configuration,

    /// The request never produced an HTTP status (DNS, TLS, connection, timeout).
    #[error("transport error")]
    Transport,

    /// The owning client has been closed or dropped.
    #[error("client closed")]
    Closed,
}

impl ErrorKind {
    /// Returns `true` if an identical request may succeed later.
    ///
    /// The client never retries on its own; this is a hint for callers.
    #[inline]
    pub fn is_retriable(&self) -> bool {
        matches!(self, ErrorKind::InternalServer | ErrorKind::Transport)
    }

    /// Maps an HTTP status code to an error kind.
    ///
    /// Returns `None` for statuses below 400, which are not errors.
    pub fn from_http_status(status: u16) -> Option<Self> {
        match status {
            0..=399 => None,
            400 => Some(ErrorKind::InvalidScope),
            403 => Some(ErrorKind::InvalidAuth),
            404 => Some(ErrorKind::NotFound),
            409 => Some(ErrorKind::Conflict),
            500..=599 => Some(ErrorKind::InternalServer),
            _ => Some(ErrorKind::Misc),
        }
    }
}

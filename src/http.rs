//! Response handling shared by the token endpoint and resource calls.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Media type the API serves resource documents as.
pub(crate) const JSON_API: &str = "application/vnd.api+json";

/// Passes through responses below 400; converts everything else into an error
/// carrying the status and body.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status, body = %body, "request rejected");
    Err(Error::from_response(status, body)
        .unwrap_or_else(|| Error::misc(format!("unexpected status {}", status))))
}

/// Reads a successful response body as JSON.
pub(crate) async fn read_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        Error::misc(format!("malformed response body: {}", e))
            .with_status(status)
            .with_source(e)
    })
}

//! HTTP client for executing the introspection query.
//!
//! The client sends exactly one request per call. There is no retry logic and
//! no timeout beyond reqwest's defaults.

use crate::query::{graphql_error_messages, parse_introspection};
use crate::{IntrospectionError, IntrospectionResponse, Result, INTROSPECTION_QUERY};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};

/// A client for executing GraphQL introspection queries.
///
/// # Examples
///
/// ## Basic usage
///
/// ```no_run
/// use geq_introspect::IntrospectionClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new();
/// let response = client.execute("https://api.example.com/graphql").await?;
/// # Ok(())
/// # }
/// ```
///
/// ## With authentication
///
/// ```no_run
/// use geq_introspect::IntrospectionClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = IntrospectionClient::new()
///     .with_header_line("Authorization: Bearer my-token")?;
/// let raw = client.execute_raw("https://api.example.com/graphql").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntrospectionClient {
    headers: Vec<(String, String)>,
}

/// Parses a header string in "Name: Value" format.
///
/// The string is split on the first colon and both sides are trimmed, so the
/// value may itself contain colons.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let invalid = || IntrospectionError::InvalidHeader(header.to_string());

    let (name, value) = header.split_once(':').ok_or_else(invalid)?;
    let name = name.trim();
    let value = value.trim();

    if name.is_empty()
        || HeaderName::from_bytes(name.as_bytes()).is_err()
        || HeaderValue::from_str(value).is_err()
    {
        return Err(invalid());
    }

    Ok((name.to_string(), value.to_string()))
}

impl IntrospectionClient {
    /// Creates a client that sends no custom headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom HTTP header, replacing any earlier header with the same
    /// (case-insensitive) name.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Adds a header given as a single `Name: Value` line.
    ///
    /// An empty line adds nothing. A malformed line is an
    /// [`IntrospectionError::InvalidHeader`].
    pub fn with_header_line(self, line: &str) -> Result<Self> {
        if line.trim().is_empty() {
            return Ok(self);
        }
        let (name, value) = parse_header(line)?;
        Ok(self.with_header(name, value))
    }

    /// Headers that will be sent in addition to `Content-Type`.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Executes an introspection query and parses the response.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The network request fails
    /// - The server returns an HTTP error status
    /// - The response cannot be parsed as valid introspection data
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, url: &str) -> Result<IntrospectionResponse> {
        let raw = self.execute_raw(url).await?;
        tracing::debug!("Parsing introspection response");
        let introspection = parse_introspection(&raw)?;

        tracing::info!(
            types = introspection.data.schema.types.len(),
            directives = introspection.data.schema.directives.len(),
            "Introspection successful"
        );

        Ok(introspection)
    }

    /// Executes an introspection query and returns the response body verbatim.
    ///
    /// This is useful when the server's introspection JSON is wanted rather
    /// than SDL.
    #[tracing::instrument(skip(self))]
    pub async fn execute_raw(&self, url: &str) -> Result<String> {
        let client = reqwest::Client::builder().build().map_err(|e| {
            IntrospectionError::Network(format!("Failed to create HTTP client: {e}"))
        })?;

        let query_body = serde_json::json!({
            "query": INTROSPECTION_QUERY
        });

        tracing::info!("Sending introspection query");
        let response = client
            .post(url)
            .headers(self.request_headers()?)
            .json(&query_body)
            .send()
            .await
            .map_err(|e| IntrospectionError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Received response");

        let body = response
            .text()
            .await
            .map_err(|e| IntrospectionError::Network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "HTTP error response");
            return Err(http_error(status.as_u16(), body));
        }

        tracing::debug!(bytes = body.len(), "Read response body");
        Ok(body)
    }
}

impl IntrospectionClient {
    /// Headers sent with the introspection request. A custom header replaces
    /// the default `Content-Type` instead of being sent next to it.
    fn request_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let invalid = || IntrospectionError::InvalidHeader(format!("{name}: {value}"));
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

/// Builds an HTTP error, preferring GraphQL `errors[].message` over the raw body.
fn http_error(status: u16, body: String) -> IntrospectionError {
    let message = graphql_error_messages(&body).unwrap_or(body);
    IntrospectionError::Http { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_valid() {
        let (name, value) = parse_header("Authorization: Bearer token").unwrap();
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer token");
    }

    #[test]
    fn test_parse_header_with_colons_in_value() {
        let (name, value) = parse_header("X-Custom: value:with:colons").unwrap();
        assert_eq!(name, "X-Custom");
        assert_eq!(value, "value:with:colons");
    }

    #[test]
    fn test_parse_header_with_whitespace() {
        let (name, value) = parse_header("  Content-Type  :  application/json  ").unwrap();
        assert_eq!(name, "Content-Type");
        assert_eq!(value, "application/json");
    }

    #[test]
    fn test_parse_header_invalid_no_colon() {
        let err = parse_header("InvalidHeader").unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidHeader(ref h) if h == "InvalidHeader"));
    }

    #[test]
    fn test_parse_header_empty_name() {
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_parse_header_name_with_space() {
        assert!(parse_header("Bad Name: value").is_err());
    }

    #[test]
    fn test_client_default() {
        let client = IntrospectionClient::new();
        assert!(client.headers().is_empty());
    }

    #[test]
    fn test_client_header_replaces_same_name() {
        let client = IntrospectionClient::new()
            .with_header("Authorization", "Bearer old")
            .with_header("authorization", "Bearer new");
        assert_eq!(
            client.headers(),
            &[("authorization".to_string(), "Bearer new".to_string())]
        );
    }

    #[test]
    fn test_client_with_header_line() {
        let client = IntrospectionClient::new()
            .with_header_line("X-API-Key: key123")
            .unwrap();
        assert_eq!(
            client.headers(),
            &[("X-API-Key".to_string(), "key123".to_string())]
        );
    }

    #[test]
    fn test_client_with_empty_header_line() {
        let client = IntrospectionClient::new().with_header_line("  ").unwrap();
        assert!(client.headers().is_empty());
    }

    #[test]
    fn test_client_with_malformed_header_line() {
        let result = IntrospectionClient::new().with_header_line("no-colon-here");
        assert!(result.is_err());
    }

    #[test]
    fn test_request_headers_default_content_type() {
        let headers = IntrospectionClient::new().request_headers().unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_request_headers_custom_content_type_replaces_default() {
        let headers = IntrospectionClient::new()
            .with_header_line("Content-Type: text/plain")
            .unwrap()
            .with_header("Authorization", "Bearer token")
            .request_headers()
            .unwrap();
        let content_types: Vec<_> = headers.get_all(CONTENT_TYPE).iter().collect();
        assert_eq!(content_types, vec!["text/plain"]);
        assert_eq!(headers["authorization"], "Bearer token");
    }

    #[test]
    fn test_request_headers_rejects_invalid_name() {
        let err = IntrospectionClient::new()
            .with_header("Bad Name", "value")
            .request_headers()
            .unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidHeader(_)));
    }

    #[test]
    fn test_http_error_prefers_graphql_messages() {
        let err = http_error(400, r#"{"errors":[{"message":"Bad query"}]}"#.to_string());
        assert_eq!(err.to_string(), "Server returned status 400: Bad query");
    }

    #[test]
    fn test_http_error_falls_back_to_body() {
        let err = http_error(502, "Bad Gateway".to_string());
        assert_eq!(err.to_string(), "Server returned status 502: Bad Gateway");
    }
}

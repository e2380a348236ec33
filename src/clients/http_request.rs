//! Outgoing requests to the platform.
//!
//! A request names a method and a path relative to the configured
//! [`HostUrl`](crate::HostUrl), such as `v2/applications` or `verify/json`.
//! The applications and verify clients send JSON bodies only, so
//! [`HttpRequest::json`] covers their writes and [`HttpRequest::builder`]
//! covers everything else.

use std::collections::HashMap;
use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// Methods the platform endpoints accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource or a page of resources.
    Get,
    /// Create an application or start a verification.
    Post,
    /// Replace an application's configuration.
    Put,
    /// Delete an application.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if requests with this method must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Encoding of a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    /// `application/json`
    Json,
}

impl DataType {
    /// Returns the `Content-Type` header value.
    #[must_use]
    pub const fn as_content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
        }
    }
}

/// A request ready for [`HttpClient::request`](crate::clients::HttpClient::request).
///
/// # Example
///
/// ```rust
/// use nexmo_api::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// // Second page of applications, retried once on 429 or 500
/// let page = HttpRequest::builder(HttpMethod::Get, "v2/applications")
///     .query_param("page_size", "10")
///     .query_param("page", "2")
///     .tries(2)
///     .build()
///     .unwrap();
/// assert_eq!(page.url("https://api.nexmo.com"), "https://api.nexmo.com/v2/applications");
///
/// let create = HttpRequest::json(
///     HttpMethod::Post,
///     "v2/applications",
///     json!({"name": "My Application", "capabilities": {}}),
/// );
/// assert!(create.body.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// Method to send with.
    pub http_method: HttpMethod,
    /// Path below the API host; a leading `/` is optional.
    pub path: String,
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Encoding of `body`; required whenever `body` is set.
    pub body_type: Option<DataType>,
    /// Query string parameters.
    pub query: Option<HashMap<String, String>>,
    /// Headers sent in addition to the client defaults, overriding them on
    /// name clashes.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Attempts allowed for retryable statuses. `1` means no retry.
    pub tries: u32,
}

impl HttpRequest {
    /// Starts building a request.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Builds a request carrying `body` as JSON.
    #[must_use]
    pub fn json(method: HttpMethod, path: impl Into<String>, body: serde_json::Value) -> Self {
        let mut request = HttpRequestBuilder::new(method, path).request;
        request.body = Some(body);
        request.body_type = Some(DataType::Json);
        request
    }

    /// Joins the request path onto `base_uri`.
    #[must_use]
    pub fn url(&self, base_uri: &str) -> String {
        format!(
            "{}/{}",
            base_uri.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    /// Checks that body and method agree.
    ///
    /// # Errors
    ///
    /// - [`InvalidHttpRequestError::MissingBodyType`] if a body has no type
    /// - [`InvalidHttpRequestError::MissingBody`] if a POST or PUT has no body
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.body_type.is_none() {
            return Err(InvalidHttpRequestError::MissingBodyType);
        }
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }
        Ok(())
    }
}

/// Step-by-step construction of an [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                http_method: method,
                path: path.into(),
                body: None,
                body_type: None,
                query: None,
                extra_headers: None,
                tries: 1,
            },
        }
    }

    /// Sets the body. Pair it with [`body_type`](Self::body_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Sets the body encoding.
    #[must_use]
    pub const fn body_type(mut self, body_type: DataType) -> Self {
        self.request.body_type = Some(body_type);
        self
    }

    /// Adds a query parameter, replacing an earlier one with the same name.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .query
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Adds a header on top of the client defaults.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets how many attempts a 429 or 500 response may use up.
    ///
    /// The client's configured tries apply when they are higher.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.request.tries = tries;
        self
    }

    /// Finishes the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] when [`HttpRequest::verify`] fails.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_writes_require_a_body() {
        assert!(HttpMethod::Post.requires_body());
        assert!(HttpMethod::Put.requires_body());
        assert!(!HttpMethod::Get.requires_body());
        assert!(!HttpMethod::Delete.requires_body());
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_json_request_sets_body_type() {
        let request = HttpRequest::json(
            HttpMethod::Put,
            "v2/applications/abc",
            json!({"name": "Renamed"}),
        );

        assert_eq!(request.body_type, Some(DataType::Json));
        assert_eq!(request.body.unwrap()["name"], "Renamed");
        assert_eq!(request.tries, 1);
    }

    #[test]
    fn test_url_joins_with_single_slash() {
        let request = HttpRequest::builder(HttpMethod::Get, "/v2/applications/abc")
            .build()
            .unwrap();

        assert_eq!(
            request.url("https://api.nexmo.com/"),
            "https://api.nexmo.com/v2/applications/abc"
        );
        assert_eq!(
            request.url("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080/v2/applications/abc"
        );
    }

    #[test]
    fn test_delete_without_body_is_valid() {
        assert!(HttpRequest::builder(HttpMethod::Delete, "v2/applications/abc")
            .build()
            .is_ok());
    }

    #[test]
    fn test_create_without_body_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "v2/applications").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));
    }

    #[test]
    fn test_untyped_body_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Post, "verify/json")
            .body(json!({"number": "14845551212"}))
            .build();

        assert!(matches!(result, Err(InvalidHttpRequestError::MissingBodyType)));
    }

    #[test]
    fn test_repeated_query_param_keeps_last_value() {
        let request = HttpRequest::builder(HttpMethod::Get, "v2/applications")
            .query_param("page", "1")
            .query_param("page", "3")
            .build()
            .unwrap();

        assert_eq!(request.query.unwrap().get("page"), Some(&"3".to_string()));
    }
}

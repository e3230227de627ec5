//! Request snapshot given to the resolver.
//!
//! The [`RequestSnapshot`] is the "raw request" this crate sees: an owned
//! copy of the parts of an inbound request that resolution may consult.
//! The enclosing dispatch layer builds one per request; routing itself
//! stays outside this crate.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

/// An owned snapshot of an inbound request.
///
/// # Example
///
/// ```rust
/// use janus_resolve::RequestSnapshot;
/// use http::Method;
///
/// let request = RequestSnapshot::builder()
///     .method(Method::POST)
///     .uri("/no-auth-test/json-principal-entity")
///     .header("content-type", "application/json")
///     .body(r#"{"name": "alice"}"#)
///     .build();
///
/// assert_eq!(request.path(), "/no-auth-test/json-principal-entity");
/// assert!(!request.is_body_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestSnapshot {
    /// Creates a snapshot from its parts.
    #[must_use]
    pub const fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> RequestSnapshotBuilder {
        RequestSnapshotBuilder::new()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a specific header value as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> Option<&str> {
        self.header("authorization")
    }

    /// Returns the request body as bytes.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Checks if the request body is empty.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Builder for constructing a [`RequestSnapshot`].
#[derive(Debug)]
pub struct RequestSnapshotBuilder {
    method: Method,
    uri: Option<Uri>,
    headers: HeaderMap,
    body: Bytes,
}

impl RequestSnapshotBuilder {
    /// Creates a new builder. The method defaults to `POST`, matching the
    /// entity-carrying routes this layer usually fronts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: Method::POST,
            uri: None,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the URI.
    ///
    /// Invalid input is ignored and leaves the builder's URI unset.
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        if let Ok(uri) = uri.parse() {
            self.uri = Some(uri);
        }
        self
    }

    /// Adds a single header. Values that are not valid header values are
    /// ignored.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = value.parse() {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the snapshot. An unset URI defaults to `/`.
    #[must_use]
    pub fn build(self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            uri: self.uri.unwrap_or_else(|| Uri::from_static("/")),
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestSnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

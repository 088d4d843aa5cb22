use crate::http::headers::Headers;
use crate::http::status::Status;

/// Represents a complete HTTP response ready to be sent to a client.
///
/// `content-length` does not need to be set by hand; serialization always
/// recomputes it from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status
    pub status: Status,
    /// Protocol version (typically "1.1")
    pub version: String,
    /// Response headers
    pub headers: Headers,
    /// Response body as bytes
    pub body: Vec<u8>,
}

impl Response {
    /// Retrieves a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Creates a simple 200 OK response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(Status::Ok).body(body.into()).build()
    }

    /// Creates a 404 Not Found response naming the unmatched path.
    pub fn not_found(path: &str) -> Self {
        ResponseBuilder::new(Status::NotFound)
            .header("Content-Type", "text/plain")
            .header("Connection", "close")
            .body(format!("404 Not Found: {path}").into_bytes())
            .build()
    }

    /// Creates a plain-text error page for the given status, with
    /// `Connection: close` set.
    pub fn error_page(status: Status) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .header("Connection", "close")
            .body(format!("{} {}", status.code(), status.reason()).into_bytes())
            .build()
    }

    /// Creates a 400 Bad Request response.
    pub fn bad_request() -> Self {
        Self::error_page(Status::BadRequest)
    }

    /// Creates a 500 Internal Server Error response.
    pub fn internal_error() -> Self {
        Self::error_page(Status::InternalServerError)
    }
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// use shoal::http::response::ResponseBuilder;
/// use shoal::http::status::Status;
///
/// let response = ResponseBuilder::new(Status::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: Status,
    version: String,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status.
    pub fn new(status: Status) -> Self {
        Self {
            status,
            version: "1.1".to_string(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}

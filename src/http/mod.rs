//! HTTP protocol implementation.
//!
//! This module implements a minimal HTTP/1.1 server core. Each accepted
//! connection handles exactly one request/response exchange and then closes;
//! there is no keep-alive, pipelining or chunked transfer support.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The per-connection state machine enforcing size and
//!   timeout limits around read → dispatch → write
//! - **`codec`**: Parses requests/responses from byte buffers and serializes
//!   messages back onto the wire
//! - **`request`** / **`response`**: Message representations with builders
//! - **`method`** / **`status`**: Closed tables of HTTP verbs and status codes
//! - **`headers`**: Case-insensitive, order-preserving header collection
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │  Reading headers │ ← bounded by max_header_bytes + read timeout
//!        └──────┬───────────┘
//!               │ blank line seen
//!               ▼
//!        ┌──────────────────┐
//!        │   Reading body   │ ← exactly content-length bytes, bounded
//!        └──────┬───────────┘
//!               │ request complete
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← root handler (typically a Router)
//!        └──────┬───────────┘
//!               │ response ready
//!               ▼
//!        ┌──────────────────┐
//!        │     Writing      │ → close
//!        └──────────────────┘
//! ```

pub mod codec;
pub mod connection;
pub mod headers;
pub mod method;
pub mod mime;
pub mod request;
pub mod response;
pub mod status;

use std::fmt;

/// Lookup failure for the closed [`method::Method`] and [`status::Status`]
/// tables. Carries the identifier that was not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIdentifier(pub String);

impl fmt::Display for UnknownIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown identifier: {}", self.0)
    }
}

impl std::error::Error for UnknownIdentifier {}

//! Conversion between raw bytes and structured messages.
//!
//! Request parsing is head-only: on a live connection the body length is only
//! known after the headers have been read (`content-length`), so the
//! connection layer reads the body separately and attaches it. Response
//! parsing takes a complete, bounded buffer and splits it once on the first
//! blank line.

use std::fmt;

use crate::http::headers::Headers;
use crate::http::method::Method;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::status::Status;

/// Uniform parse failure carrying a human-readable cause.
///
/// Every way a message can fail to parse collapses into this one type;
/// callers branch on "parse failed", never on a finer taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedMessage(pub String);

impl MalformedMessage {
    fn new(cause: impl Into<String>) -> Self {
        Self(cause.into())
    }
}

impl fmt::Display for MalformedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed message: {}", self.0)
    }
}

impl std::error::Error for MalformedMessage {}

/// Serializes a request into wire bytes.
///
/// A `content-length` header equal to the body's byte length is always
/// injected, overwriting any existing value. No other header is synthesized,
/// and header values are not escaped; callers must not place CR/LF in them.
pub fn pack_request(request: &Request) -> Vec<u8> {
    let title = format!(
        "{} {} HTTP/{}",
        request.method.as_str(),
        request.path,
        request.version
    );
    pack(&title, &request.headers, &request.body)
}

/// Serializes a response into wire bytes. Same `content-length` rule as
/// [`pack_request`].
pub fn pack_response(response: &Response) -> Vec<u8> {
    let title = format!(
        "HTTP/{} {} {}",
        response.version,
        response.status.code(),
        response.status.reason()
    );
    pack(&title, &response.headers, &response.body)
}

fn pack(title: &str, headers: &Headers, body: &[u8]) -> Vec<u8> {
    let mut headers = headers.clone();
    headers.insert("content-length", body.len().to_string());

    let mut buf = Vec::with_capacity(title.len() + body.len() + 128);
    buf.extend_from_slice(title.as_bytes());
    buf.extend_from_slice(b"\r\n");
    for (name, value) in headers.iter() {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(body);
    buf
}

/// Parses a request head (request line + header lines) into a [`Request`]
/// with an empty body.
///
/// The input is the header block only; finding the blank-line terminator is
/// the connection layer's job. Blank lines inside the block are skipped.
pub fn parse_request_head(head: &[u8]) -> Result<Request, MalformedMessage> {
    let text = std::str::from_utf8(head)
        .map_err(|_| MalformedMessage::new("request head is not valid UTF-8"))?;

    let mut lines = text.split("\r\n");
    let request_line = lines
        .next()
        .ok_or_else(|| MalformedMessage::new("empty request head"))?;

    let tokens: Vec<&str> = request_line.split_whitespace().collect();
    let [method_name, path, protocol] = tokens[..] else {
        return Err(MalformedMessage::new(format!(
            "bad request line: {request_line:?}"
        )));
    };

    let method = Method::from_name(method_name)
        .map_err(|e| MalformedMessage::new(e.to_string()))?;
    let version = parse_version(protocol)?;
    let headers = parse_header_lines(lines)?;

    Ok(Request {
        method,
        path: path.to_string(),
        version,
        headers,
        body: Vec::new(),
    })
}

/// Parses a complete response buffer into a [`Response`].
///
/// The buffer is split once on the first `\r\n\r\n`; everything after it is
/// taken verbatim as the body with no `content-length` inspection. Only
/// suitable for input that is already complete and bounded, not for a network
/// stream of unknown length.
pub fn parse_response(data: &[u8]) -> Result<Response, MalformedMessage> {
    let (head, body) = match find_blank_line(data) {
        Some(pos) => (&data[..pos], &data[pos + 4..]),
        None => (data, &[][..]),
    };

    let text = std::str::from_utf8(head)
        .map_err(|_| MalformedMessage::new("response head is not valid UTF-8"))?;

    let mut lines = text.split("\r\n");
    let status_line = lines
        .next()
        .ok_or_else(|| MalformedMessage::new("empty response head"))?;

    // Reason phrases contain spaces, so split off at most three fields.
    let mut tokens = status_line.splitn(3, ' ');
    let protocol = tokens
        .next()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| MalformedMessage::new(format!("bad status line: {status_line:?}")))?;
    let code_str = tokens
        .next()
        .ok_or_else(|| MalformedMessage::new(format!("bad status line: {status_line:?}")))?;
    tokens
        .next()
        .ok_or_else(|| MalformedMessage::new(format!("bad status line: {status_line:?}")))?;

    let code: u16 = code_str
        .parse()
        .map_err(|_| MalformedMessage::new(format!("bad status code: {code_str:?}")))?;
    let status =
        Status::from_code(code).map_err(|e| MalformedMessage::new(e.to_string()))?;
    let version = parse_version(protocol)?;
    let headers = parse_header_lines(lines)?;

    Ok(Response {
        status,
        version,
        headers,
        body: body.to_vec(),
    })
}

/// Extracts the version from a protocol token like `HTTP/1.1`.
/// The slash is mandatory; a missing version part defaults to "1.1".
fn parse_version(protocol: &str) -> Result<String, MalformedMessage> {
    let (_, version) = protocol
        .split_once('/')
        .ok_or_else(|| MalformedMessage::new(format!("bad protocol token: {protocol:?}")))?;
    if version.is_empty() {
        Ok("1.1".to_string())
    } else {
        Ok(version.to_string())
    }
}

/// Parses header lines, splitting each on the first ":" (both ": " and ":"
/// with no following space are tolerated). Blank lines are skipped.
fn parse_header_lines<'a>(
    lines: impl Iterator<Item = &'a str>,
) -> Result<Headers, MalformedMessage> {
    let mut headers = Headers::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| MalformedMessage::new(format!("bad header line: {line:?}")))?;
        headers.insert(name.trim(), value.trim());
    }
    Ok(headers)
}

/// Byte offset of the first `\r\n\r\n` in the buffer, if any.
pub fn find_blank_line(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

use crate::http::status::{Status, reason_phrase};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::io::{self, Write};

pub type StreamFunc = Box<dyn FnOnce(&mut dyn Write) -> io::Result<()> + Send>;

pub enum Body {
    Empty,
    Fixed(Bytes),
    /// Invoked with the connection once the header block has been written.
    Streaming(StreamFunc),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Empty"),
            Body::Fixed(b) => f.debug_tuple("Fixed").field(b).finish(),
            Body::Streaming(_) => f.write_str("Streaming(..)"),
        }
    }
}

/// A response, built once and written once.
///
/// Header keys are lowercased on insertion and written in sorted order.
#[derive(Debug)]
pub struct Response {
    pub(crate) code: u16,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) body: Body,
}

impl Response {
    /// A response with a status line and headers only.
    pub fn new(code: impl Into<u16>) -> Response {
        Response {
            code: code.into(),
            headers: BTreeMap::new(),
            body: Body::Empty,
        }
    }

    pub fn content(code: impl Into<u16>, mime_type: &str, body: impl Into<Bytes>) -> Response {
        Response {
            body: Body::Fixed(body.into()),
            ..Response::new(code)
        }
        .header("content-type", mime_type)
    }

    pub fn streaming<F>(code: impl Into<u16>, mime_type: &str, f: F) -> Response
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()> + Send + 'static,
    {
        Response {
            body: Body::Streaming(Box::new(f)),
            ..Response::new(code)
        }
        .header("content-type", mime_type)
    }

    /// A `text/plain` response carrying the error's message.
    pub fn wrap_err(code: impl Into<u16>, err: impl Display) -> Response {
        Response::content(code, "text/plain", err.to_string())
    }

    pub fn header(mut self, key: &str, value: impl Into<String>) -> Response {
        self.headers.insert(key.to_lowercase(), value.into());
        self
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers.get(&k.to_lowercase()).map(|v| v.as_str())
    }

    /// Writes status line, headers, blank line and body to `out`.
    pub fn write_response<W: Write>(self, out: &mut W, http_version: &str) -> io::Result<()> {
        let mut head = Vec::with_capacity(64 + self.headers.len() * 32);
        write!(
            head,
            "{} {} {}\r\n",
            http_version,
            self.code,
            reason_phrase(self.code)
        )?;
        for (key, value) in &self.headers {
            write!(head, "{}: {}\r\n", key, value)?;
        }
        head.extend_from_slice(b"\r\n");
        out.write_all(&head)?;

        match self.body {
            Body::Empty => {}
            Body::Fixed(content) => out.write_all(&content)?,
            Body::Streaming(f) => f(&mut *out)?,
        }
        out.flush()
    }
}

pub fn ok() -> Response {
    Response::new(Status::Ok)
}

pub fn not_found() -> Response {
    Response::wrap_err(Status::NotFound, Status::NotFound.reason())
}

pub fn bad_request(err: impl Display) -> Response {
    Response::wrap_err(Status::BadRequest, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::parse::ParseError;

    fn written(resp: Response, version: &str) -> String {
        let mut out = Vec::new();
        resp.write_response(&mut out, version).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn content_response_on_the_wire() {
        let resp = Response::content(Status::Ok, "text/plain", "hello");
        assert_eq!(
            written(resp, "HTTP/1.1"),
            "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\n\r\nhello"
        );
    }

    #[test]
    fn version_is_echoed() {
        let resp = Response::new(204u16);
        assert_eq!(written(resp, "HTTP/1.0"), "HTTP/1.0 204 No Content\r\n\r\n");
    }

    #[test]
    fn unknown_code_has_empty_reason() {
        let resp = Response::new(299u16);
        assert_eq!(written(resp, "HTTP/1.1"), "HTTP/1.1 299 \r\n\r\n");
    }

    #[test]
    fn header_overwrites_and_lowercases() {
        let resp = ok().header("X", "1").header("x", "2");
        assert_eq!(resp.headers().len(), 1);
        assert_eq!(resp.get_header("X"), Some("2"));
        assert_eq!(written(resp, "HTTP/1.1"), "HTTP/1.1 200 OK\r\nx: 2\r\n\r\n");
    }

    #[test]
    fn headers_are_written_sorted_before_body() {
        let resp = Response::content(Status::Created, "application/json", "{}")
            .header("X-B", "b")
            .header("X-A", "a");
        assert_eq!(
            written(resp, "HTTP/1.1"),
            "HTTP/1.1 201 Created\r\ncontent-type: application/json\r\nx-a: a\r\nx-b: b\r\n\r\n{}"
        );
    }

    #[test]
    fn streaming_body_runs_after_headers() {
        let resp = Response::streaming(Status::Ok, "text/plain", |w| {
            w.write_all(b"part one, ")?;
            w.write_all(b"part two")
        })
        .header("x-stream", "yes");
        assert_eq!(
            written(resp, "HTTP/1.1"),
            "HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\nx-stream: yes\r\n\r\npart one, part two"
        );
    }

    #[test]
    fn streaming_error_is_returned() {
        let resp = Response::streaming(Status::Ok, "text/plain", |_| {
            Err(io::Error::other("boom"))
        });
        let mut out = Vec::new();
        let err = resp.write_response(&mut out, "HTTP/1.1").unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(out.starts_with(b"HTTP/1.1 200 OK\r\n"));
    }

    #[test]
    fn wrap_err_uses_error_message() {
        let err = ParseError::MalformedHeaderLine("oops".to_string());
        let resp = bad_request(&err);
        assert_eq!(resp.code(), 400);
        assert_eq!(
            written(resp, "HTTP/1.1"),
            "HTTP/1.1 400 Bad Request\r\ncontent-type: text/plain\r\n\r\nheader line \"oops\" did not contain 2 parts"
        );
    }

    #[test]
    fn default_not_found() {
        assert_eq!(
            written(not_found(), "HTTP/1.1"),
            "HTTP/1.1 404 Not Found\r\ncontent-type: text/plain\r\n\r\nNot Found"
        );
    }
}

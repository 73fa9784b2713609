use crate::http::BUFFER_SIZE;
use crate::http::request::Request;
use bytes::BytesMut;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::min;
use std::collections::HashMap;
use std::io::{self, BufRead, Read};
use thiserror::Error;

static CONTENT_LENGTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("request line {0:?} did not contain 3 parts")]
    MalformedRequestLine(String),
    #[error("header line {0:?} did not contain 2 parts")]
    MalformedHeaderLine(String),
    #[error("invalid content-length {0:?}")]
    InvalidContentLength(String),
    #[error("body truncated: expected {expected} bytes, got {received}")]
    TruncatedBody { expected: usize, received: usize },
    #[error("error reading request: {0}")]
    ConnectionReadError(#[from] io::Error),
}

/// Reads one request from `rdr`, consuming no more than the declared body.
pub fn parse_request(rdr: &mut impl BufRead) -> Result<Request, ParseError> {
    // Request-Line = Method SP Request-URI SP HTTP-Version CRLF
    let first_line = read_line(rdr)?;
    let first_line = first_line.trim_ascii();

    let (method, uri, http_version) = match first_line.split(' ').collect::<Vec<_>>()[..] {
        [method, target, version] => (method.to_string(), target.to_string(), version.to_string()),
        _ => return Err(ParseError::MalformedRequestLine(first_line.to_string())),
    };

    let mut headers: HashMap<String, String> = HashMap::new();
    loop {
        let line = read_line(rdr)?;
        let line = line.trim_ascii();
        if line.is_empty() {
            break;
        }

        let (k, v) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedHeaderLine(line.to_string()))?;
        headers.insert(k.trim_ascii().to_lowercase(), v.trim_ascii().to_string());
    }

    // transfer-encoding is not supported, only content-length frames a body
    let body = match headers.get("content-length") {
        Some(raw) => {
            let content_length = parse_content_length(raw)?;
            read_content(rdr, content_length)?
        }
        None => BytesMut::new(),
    };

    Ok(Request {
        method,
        uri,
        http_version,
        headers,
        body: body.freeze(),
    })
}

fn parse_content_length(raw: &str) -> Result<usize, ParseError> {
    if !CONTENT_LENGTH_RE.is_match(raw) {
        return Err(ParseError::InvalidContentLength(raw.to_string()));
    }
    raw.parse()
        .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))
}

/// Reads up to and including the next `\n`. A stream that ends before the
/// terminator is a read error.
fn read_line(rdr: &mut impl BufRead) -> Result<String, ParseError> {
    let mut buf = Vec::new();
    rdr.read_until(b'\n', &mut buf)?;
    if buf.last() != Some(&b'\n') {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before end of line",
        )
        .into());
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn read_content(rdr: &mut impl BufRead, content_length: usize) -> Result<BytesMut, ParseError> {
    // grows as bytes arrive; the declared length is untrusted
    let mut content = BytesMut::with_capacity(min(content_length, BUFFER_SIZE));
    let mut remaining = content_length;
    let mut buf = [0u8; BUFFER_SIZE];

    while remaining > 0 {
        let slice_to_read = &mut buf[..min(BUFFER_SIZE, remaining)];
        let bytes_read = match rdr.read(slice_to_read) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if bytes_read == 0 {
            return Err(ParseError::TruncatedBody {
                expected: content_length,
                received: content.len(),
            });
        }
        content.extend_from_slice(&slice_to_read[..bytes_read]);
        remaining -= bytes_read;
    }
    Ok(content)
}

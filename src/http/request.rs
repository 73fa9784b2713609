use bytes::Bytes;
use std::collections::HashMap;

/// A parsed request. Header names are stored lowercased.
#[derive(Debug, Clone)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) uri: String,
    pub(crate) http_version: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Bytes,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        uri: impl Into<String>,
        http_version: impl Into<String>,
        headers: HashMap<String, String>,
        body: impl Into<Bytes>,
    ) -> Request {
        Request {
            method: method.into(),
            uri: uri.into(),
            http_version: http_version.into(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
            body: body.into(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The raw request-target as sent by the client.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn http_version(&self) -> &str {
        &self.http_version
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers.get(&k.to_lowercase()).map(|v| v.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Path component of the request-target, still percent-encoded.
    ///
    /// Query and fragment are dropped. For absolute-form targets
    /// (`http://host/a/b`) the scheme and authority are dropped as well.
    pub fn path(&self) -> &str {
        let target = strip_authority(&self.uri);
        let end = target.find(['?', '#']).unwrap_or(target.len());
        &target[..end]
    }
}

fn strip_authority(target: &str) -> &str {
    match target.split_once("://") {
        Some((scheme, rest)) if !scheme.contains(['/', '?', '#']) => {
            rest.find(['/', '?', '#']).map(|i| &rest[i..]).unwrap_or("")
        }
        _ => target,
    }
}

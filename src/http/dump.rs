use crate::http::handler::Variables;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::status::Status;
use std::collections::HashMap;
use std::io::Write;

fn sorted(map: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut entries: Vec<_> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    entries.sort();
    entries
}

/// Echoes the request back as plain text, written straight to the connection.
pub fn dump_request(req: &Request, vars: &Variables) -> Response {
    let req = req.clone();
    let headers = sorted(req.headers());
    let vars = sorted(vars);

    Response::streaming(Status::Ok, "text/plain", move |w: &mut dyn Write| {
        write!(w, "Method: {}\r\n", req.method())?;
        write!(w, "URI: {}\r\n", req.uri())?;
        write!(w, "HTTP Version: {}\r\n", req.http_version())?;
        if !headers.is_empty() {
            w.write_all(b"Headers:\r\n")?;
            for (k, v) in &headers {
                write!(w, "  {}: {}\r\n", k, v)?;
            }
        }
        if !vars.is_empty() {
            w.write_all(b"Variables:\r\n")?;
            for (k, v) in &vars {
                write!(w, "  {}: {}\r\n", k, v)?;
            }
        }
        if !req.body().is_empty() {
            w.write_all(b"Body:\r\n\r\n")?;
            w.write_all(req.body())?;
        }
        Ok(())
    })
}

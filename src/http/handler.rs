use crate::http::request::Request;
use crate::http::response::Response;
use std::collections::HashMap;
use std::sync::Arc;

/// Path variables captured while routing, keyed by name.
pub type Variables = HashMap<String, String>;

pub type Handler = Arc<dyn Fn(&Request, &Variables) -> Response + Sync + Send>;

pub type NotFoundFunc = Box<dyn Fn(&Request) -> Response + Sync + Send>;

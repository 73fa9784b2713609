pub mod dump;
pub mod handler;
pub mod parse;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod status;

pub use handler::{Handler, Variables};
pub use parse::{ParseError, parse_request};
pub use request::Request;
pub use response::{Body, Response, bad_request, not_found, ok};
pub use router::{Router, RoutingFunc, check_routes, constant, leaf, path_leaf, variable};
pub use status::{Status, reason_phrase};

const BUFFER_SIZE: usize = 1024;

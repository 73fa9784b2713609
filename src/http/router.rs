//! Routing on trees of path-segment matchers.
//!
//! The request path is percent-decoded (`%2f` included), stripped of leading and
//! trailing slashes and split on `/`. Each [`RoutingFunc`] consumes some prefix of
//! the segments and either resolves a handler or declines. Siblings are tried in
//! registration order and the first whose whole subtree resolves wins.

use crate::http::handler::{Handler, NotFoundFunc, Variables};
use crate::http::request::Request;
use crate::http::response::{Response, not_found};
use percent_encoding::percent_decode_str;
use std::sync::Arc;
use tracing::debug;

/// Consumes path segments, returning the matched handler and any captured variables.
pub type RoutingFunc = Box<dyn Fn(&[String]) -> Option<(Handler, Variables)> + Send + Sync>;

/// Returns the first match among `routes` for `segments`.
///
/// Exposed so that custom routing functions can defer to their own children.
pub fn check_routes(segments: &[String], routes: &[RoutingFunc]) -> Option<(Handler, Variables)> {
    routes.iter().find_map(|route| route(segments))
}

/// Consumes one segment equal to `segment`, then defers to `children`.
pub fn constant(segment: impl Into<String>, children: Vec<RoutingFunc>) -> RoutingFunc {
    let segment = segment.into();
    Box::new(move |segments: &[String]| match segments.split_first() {
        Some((first, rest)) if *first == segment => check_routes(rest, &children),
        _ => None,
    })
}

/// Consumes any one segment, stores it under `name`, then defers to `children`.
pub fn variable(name: impl Into<String>, children: Vec<RoutingFunc>) -> RoutingFunc {
    let name = name.into();
    Box::new(move |segments: &[String]| {
        let (first, rest) = segments.split_first()?;
        let (handler, mut vars) = check_routes(rest, &children)?;
        vars.insert(name.clone(), first.clone());
        Some((handler, vars))
    })
}

/// Resolves `handler` when no segments are left.
pub fn leaf<F>(handler: F) -> RoutingFunc
where
    F: Fn(&Request, &Variables) -> Response + Send + Sync + 'static,
{
    let handler: Handler = Arc::new(handler);
    Box::new(move |segments: &[String]| {
        segments
            .is_empty()
            .then(|| (Arc::clone(&handler), Variables::new()))
    })
}

/// Resolves `handler` when at least one segment is left, storing the rest of
/// the path (rejoined with `/`) under `name`.
pub fn path_leaf<F>(handler: F, name: impl Into<String>) -> RoutingFunc
where
    F: Fn(&Request, &Variables) -> Response + Send + Sync + 'static,
{
    let handler: Handler = Arc::new(handler);
    let name = name.into();
    Box::new(move |segments: &[String]| {
        if segments.is_empty() {
            return None;
        }
        Some((
            Arc::clone(&handler),
            Variables::from([(name.clone(), segments.join("/"))]),
        ))
    })
}

pub fn path_segments(path: &str) -> Vec<String> {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let trimmed = decoded.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').map(String::from).collect()
    }
}

pub struct Router {
    routes: Vec<RoutingFunc>,
    not_found: NotFoundFunc,
}

impl Router {
    /// Requests are handled by the first of `routes` that matches.
    pub fn new(routes: Vec<RoutingFunc>) -> Router {
        Router {
            routes,
            not_found: Box::new(|_: &Request| not_found()),
        }
    }

    pub fn not_found_handler<F>(&mut self, f: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.not_found = Box::new(f);
    }

    pub fn resolve(&self, req: &Request) -> Option<(Handler, Variables)> {
        check_routes(&path_segments(req.path()), &self.routes)
    }

    pub fn handle(&self, req: &Request) -> Response {
        match self.resolve(req) {
            Some((handler, vars)) => {
                debug!(path = req.path(), ?vars, "route matched");
                (handler)(req, &vars)
            }
            None => {
                debug!(path = req.path(), "no route matched");
                (self.not_found)(req)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ok;
    use crate::http::status::Status;
    use bytes::Bytes;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(uri: &str) -> Request {
        Request::new("GET", uri, "HTTP/1.1", HashMap::new(), Bytes::new())
    }

    /// Responds with `name` and the sorted variables in the body.
    fn tagged(name: &'static str) -> impl Fn(&Request, &Variables) -> Response + Send + Sync {
        move |_: &Request, vars: &Variables| {
            let mut pairs: Vec<_> = vars.iter().map(|(k, v)| format!("{k}={v}")).collect();
            pairs.sort();
            Response::content(Status::Ok, "text/plain", format!("{name} {}", pairs.join(",")))
        }
    }

    fn body_of(resp: Response) -> String {
        let mut out = Vec::new();
        resp.write_response(&mut out, "HTTP/1.1").unwrap();
        let text = String::from_utf8(out).unwrap();
        text.split_once("\r\n\r\n").unwrap().1.to_string()
    }

    #[test]
    fn segments_are_trimmed_and_split() {
        assert!(path_segments("").is_empty());
        assert!(path_segments("/").is_empty());
        assert!(path_segments("//").is_empty());
        assert_eq!(path_segments("/a/b/"), ["a", "b"]);
        assert_eq!(path_segments("a//b"), ["a", "", "b"]);
    }

    #[test]
    fn segments_are_decoded_before_splitting() {
        assert_eq!(path_segments("/a%20b/c"), ["a b", "c"]);
        assert_eq!(path_segments("/a%2fb"), ["a", "b"]);
        assert_eq!(path_segments("/a%2Fb%2F"), ["a", "b"]);
    }

    #[test]
    fn constant_wins_over_later_variable() {
        let router = Router::new(vec![
            constant("a", vec![leaf(tagged("h1"))]),
            variable("x", vec![leaf(tagged("h2"))]),
        ]);
        assert_eq!(body_of(router.handle(&request("/a"))), "h1 ");
        assert_eq!(body_of(router.handle(&request("/b"))), "h2 x=b");
    }

    #[test]
    fn constant_is_case_sensitive() {
        let router = Router::new(vec![constant("a", vec![leaf(tagged("h1"))])]);
        assert_eq!(router.handle(&request("/A")).code(), 404);
    }

    #[test]
    fn failed_subtree_does_not_block_later_siblings() {
        let router = Router::new(vec![
            constant("a", vec![constant("deep", vec![leaf(tagged("h1"))])]),
            constant("a", vec![leaf(tagged("h2"))]),
        ]);
        assert_eq!(body_of(router.handle(&request("/a"))), "h2 ");
        assert_eq!(body_of(router.handle(&request("/a/deep"))), "h1 ");
    }

    #[test]
    fn variable_declines_without_a_segment() {
        let router = Router::new(vec![
            variable("x", vec![leaf(tagged("var"))]),
            leaf(tagged("index")),
        ]);
        assert_eq!(body_of(router.handle(&request("/"))), "index ");
        assert_eq!(body_of(router.handle(&request("/b"))), "var x=b");
    }

    #[test]
    fn path_leaf_captures_remainder() {
        let router = Router::new(vec![constant("files", vec![path_leaf(tagged("files"), "rest")])]);
        assert_eq!(
            body_of(router.handle(&request("/files/a/b/c"))),
            "files rest=a/b/c"
        );
        assert_eq!(router.handle(&request("/files")).code(), 404);
        assert_eq!(router.handle(&request("/files/")).code(), 404);
    }

    #[test]
    fn variables_accumulate_through_the_tree() {
        let router = Router::new(vec![constant(
            "dump",
            vec![
                leaf(tagged("root")),
                variable(
                    "some_var",
                    vec![leaf(tagged("var")), path_leaf(tagged("path"), "path")],
                ),
            ],
        )]);
        assert_eq!(body_of(router.handle(&request("/dump"))), "root ");
        assert_eq!(body_of(router.handle(&request("/dump/x"))), "var some_var=x");
        assert_eq!(
            body_of(router.handle(&request("/dump/x/y/z?q=1"))),
            "path path=y/z,some_var=x"
        );
    }

    #[test]
    fn ancestor_variable_overwrites_same_name_from_below() {
        let router = Router::new(vec![variable("v", vec![path_leaf(tagged("h"), "v")])]);
        assert_eq!(body_of(router.handle(&request("/outer/inner"))), "h v=outer");
    }

    #[test]
    fn encoded_slash_splits_segments() {
        let router = Router::new(vec![constant(
            "a",
            vec![variable("x", vec![leaf(tagged("two"))])],
        )]);
        assert_eq!(body_of(router.handle(&request("/a%2fb"))), "two x=b");
    }

    #[test]
    fn unmatched_path_uses_not_found_without_calling_handlers() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let router = Router::new(vec![constant(
            "a",
            vec![leaf(move |_: &Request, _: &Variables| {
                counter.fetch_add(1, Ordering::SeqCst);
                ok()
            })],
        )]);

        let resp = router.handle(&request("/nonexistent"));
        assert_eq!(resp.code(), 404);
        assert_eq!(body_of(resp), "Not Found");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn custom_not_found_handler() {
        let mut router = Router::new(Vec::new());
        router.not_found_handler(|req| {
            Response::content(Status::NotFound, "text/plain", format!("no {}", req.path()))
        });
        assert_eq!(body_of(router.handle(&request("/x/y"))), "no /x/y");
    }

    #[test]
    fn empty_path_matches_root_leaf() {
        let router = Router::new(vec![leaf(tagged("index"))]);
        assert_eq!(body_of(router.handle(&request("/"))), "index ");
        assert_eq!(router.handle(&request("/a")).code(), 404);
    }

    #[test]
    fn custom_routing_func_with_check_routes() {
        // matches any segment starting with '@' and defers to children
        fn handle_prefix(children: Vec<RoutingFunc>) -> RoutingFunc {
            Box::new(move |segments: &[String]| match segments.split_first() {
                Some((first, rest)) if first.starts_with('@') => check_routes(rest, &children),
                _ => None,
            })
        }

        let router = Router::new(vec![handle_prefix(vec![leaf(tagged("user"))])]);
        assert_eq!(body_of(router.handle(&request("/@bob"))), "user ");
        assert_eq!(router.handle(&request("/bob")).code(), 404);
    }
}

use clap::Parser;
use segment_http::config::Config;
use segment_http::http::dump::dump_request;
use segment_http::http::router::{Router, constant, leaf, path_leaf, variable};
use segment_http::http::server::Server;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "segment_http=info".into()),
        )
        .init();

    let config = Config::parse();

    let router = Router::new(vec![constant(
        "dump",
        vec![
            leaf(dump_request),
            variable(
                "some_var",
                vec![leaf(dump_request), path_leaf(dump_request, "path")],
            ),
        ],
    )]);

    Server::bind(&config, router)?.run()
}

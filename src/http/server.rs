use crate::concurrency::ThreadPool;
use crate::config::Config;
use crate::http::parse::parse_request;
use crate::http::response::bad_request;
use crate::http::router::Router;
use anyhow::Context;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span, warn};

/// Version echoed when the request failed to parse far enough to know the client's.
const FALLBACK_VERSION: &str = "HTTP/1.1";

pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    pool: ThreadPool,
    read_timeout: Option<Duration>,
}

impl Server {
    pub fn bind(config: &Config, router: Router) -> anyhow::Result<Server> {
        let addr = config.addr();
        let listener =
            TcpListener::bind(&addr).with_context(|| format!("Can't bind address {addr}"))?;
        let pool = ThreadPool::new(config.workers.into())?;

        Ok(Server {
            listener,
            router: Arc::new(router),
            pool,
            read_timeout: config.read_timeout(),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.listener
            .local_addr()
            .context("Can't read listener address")
    }

    /// Accepts connections until the listener fails.
    pub fn run(self) -> anyhow::Result<()> {
        info!(addr = %self.local_addr()?, workers = self.pool.size(), "server listening");

        for stream in self.listener.incoming() {
            let stream = stream.context("Failed to accept connection")?;
            let router = Arc::clone(&self.router);
            let read_timeout = self.read_timeout;
            self.pool
                .execute(move || process_incoming(&router, stream, read_timeout))?;
        }
        Ok(())
    }
}

fn process_incoming(router: &Router, stream: TcpStream, read_timeout: Option<Duration>) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let _span = info_span!("conn", %peer).entered();
    debug!("accepted new connection");

    if let Err(e) = stream.set_read_timeout(read_timeout) {
        warn!(error = %e, "can't set read timeout");
    }

    let mut reader = BufReader::new(&stream);
    let mut writer = &stream;
    if let Err(e) = serve(router, &mut reader, &mut writer) {
        warn!(error = %e, "failed to write response");
    }
    // stream is dropped, closing the connection
}

/// Runs one request-response exchange: parse, route, write.
///
/// Parse failures become a `400 Bad Request` carrying the error message. Only
/// write failures are returned.
pub fn serve<R: BufRead, W: Write>(router: &Router, reader: &mut R, writer: &mut W) -> io::Result<()> {
    match parse_request(reader) {
        Ok(request) => {
            info!(
                method = request.method(),
                uri = request.uri(),
                version = request.http_version(),
                "request"
            );
            let response = router.handle(&request);
            debug!(code = response.code(), "response");
            response.write_response(writer, request.http_version())
        }
        Err(e) => {
            warn!(error = %e, "bad request");
            bad_request(&e).write_response(writer, FALLBACK_VERSION)
        }
    }
}

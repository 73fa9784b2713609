use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "segment-http")]
#[command(about = "Single-exchange HTTP/1.x server with segment-tree routing", long_about = None)]
pub struct Config {
    /// Host for the server to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port for the server to listen on
    #[arg(short, long, default_value_t = 80)]
    pub port: u16,

    /// Number of connection worker threads
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,

    /// Seconds to wait on a silent client before giving up (0 waits forever)
    #[arg(long, default_value_t = 5)]
    pub read_timeout_secs: u64,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            workers: 10,
            read_timeout_secs: 5,
        }
    }
}

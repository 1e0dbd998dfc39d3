use clap::Parser;
use std::env;
use std::time::Duration;
use tracing::warn;

/// Hop sizes scanned when none are configured.
pub const DEFAULT_HOPS: [usize; 5] = [1, 5, 15, 30, 60];

/// Exchange chart endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://www.mcxindia.com/BackPage.aspx/GetGraphForScrip";

/// Referer the chart endpoint expects.
pub const DEFAULT_UPSTREAM_REFERER: &str = "https://www.mcxindia.com/home";

/// Command line flags. Each overrides its environment variable.
#[derive(Debug, Default, Parser)]
#[command(name = "minmax", version, about = "Commodity min/max band server")]
pub struct Cli {
    /// PORT at which the server will run
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Comma separated hop sizes, e.g. "1,5,15"
    #[arg(long)]
    pub hops: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Hop sizes to scan, sorted and without duplicates.
    pub hops: Vec<usize>,
    /// Chart endpoint URL.
    pub upstream_url: String,
    /// Referer header sent with chart requests.
    pub upstream_referer: String,
    /// Timeout for one chart request.
    pub upstream_timeout: Duration,
    /// Verbose logging.
    pub debug: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            hops: env::var("HOPS")
                .map(|v| parse_hops(&v))
                .unwrap_or_else(|_| DEFAULT_HOPS.to_vec()),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            upstream_referer: env::var("UPSTREAM_REFERER")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_REFERER.to_string()),
            upstream_timeout: Duration::from_secs(
                env::var("UPSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            ),
            debug: env::var("DEBUG").map(|v| !v.is_empty()).unwrap_or(false),
        }
    }

    /// Apply command line overrides.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(ref host) = cli.host {
            self.host = host.clone();
        }
        if let Some(ref hops) = cli.hops {
            self.hops = parse_hops(hops);
        }
        self
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "minmax=debug,tower_http=debug"
        } else {
            "minmax=info,tower_http=info"
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            hops: DEFAULT_HOPS.to_vec(),
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_referer: DEFAULT_UPSTREAM_REFERER.to_string(),
            upstream_timeout: Duration::from_secs(60),
            debug: false,
        }
    }
}

/// Parse a comma separated hop list.
///
/// Entries that are not positive integers are skipped. Falls back to
/// [`DEFAULT_HOPS`] when nothing usable remains.
pub fn parse_hops(value: &str) -> Vec<usize> {
    let mut hops: Vec<usize> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<usize>() {
            Ok(hop) if hop > 0 => Some(hop),
            _ => {
                warn!("Ignoring invalid hop '{}'", s);
                None
            }
        })
        .collect();

    hops.sort_unstable();
    hops.dedup();

    if hops.is_empty() {
        DEFAULT_HOPS.to_vec()
    } else {
        hops
    }
}

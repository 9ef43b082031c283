/// Front API configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The worker URL
/// is the only value that changes behaviour: without it `/generate` answers
/// 503.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Outer HTTP request timeout in seconds (default: `150`). Must exceed
    /// `worker_timeout_secs` so the worker hop reports its own timeout.
    pub request_timeout_secs: u64,
    /// Bound on the front-to-worker round trip in seconds (default: `120`).
    pub worker_timeout_secs: u64,
    /// Worker base URL from `PERCHANCE_WORKER_URL`; `None` when unset or blank.
    pub worker_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default  |
    /// |------------------------|----------|
    /// | `HOST`                 | `0.0.0.0`|
    /// | `PORT`                 | `5000`   |
    /// | `CORS_ORIGINS`         | (any)    |
    /// | `REQUEST_TIMEOUT_SECS` | `150`    |
    /// | `WORKER_TIMEOUT_SECS`  | `120`    |
    /// | `PERCHANCE_WORKER_URL` | unset    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && s != "*")
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "150".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let worker_timeout_secs: u64 = std::env::var("WORKER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("WORKER_TIMEOUT_SECS must be a valid u64");

        let worker_url = std::env::var("PERCHANCE_WORKER_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            worker_timeout_secs,
            worker_url,
        };
        config.assert_timeout_order();
        config
    }

    /// Panics unless the worker bound is strictly inside the outer request
    /// timeout, so a slow worker surfaces as a JSON `WORKER_TIMEOUT` body
    /// rather than a bare 504 from the timeout layer.
    pub fn assert_timeout_order(&self) {
        assert!(
            self.worker_timeout_secs < self.request_timeout_secs,
            "WORKER_TIMEOUT_SECS ({}) must be less than REQUEST_TIMEOUT_SECS ({})",
            self.worker_timeout_secs,
            self.request_timeout_secs,
        );
    }
}

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `10000`).
    pub port: u16,
    /// Base URL of the image generation provider.
    pub provider_url: String,
    /// Optional bearer credential for the provider.
    pub provider_api_key: Option<String>,
}

impl WorkerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Default    |
    /// |--------------------|------------|
    /// | `HOST`             | `0.0.0.0`  |
    /// | `PORT`             | `10000`    |
    /// | `PROVIDER_URL`     | (required) |
    /// | `PROVIDER_API_KEY` | unset      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "10000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let provider_url = std::env::var("PROVIDER_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .expect("PROVIDER_URL must be set");

        let provider_api_key = std::env::var("PROVIDER_API_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            provider_url,
            provider_api_key,
        }
    }
}

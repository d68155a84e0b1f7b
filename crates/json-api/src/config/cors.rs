//! CORS Config

use clap::Args;

/// Cross-origin settings for browser clients.
#[derive(Debug, Args)]
pub struct CorsConfig {
    /// Origins allowed to call the API, comma separated; `*` allows any
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_allowed_origins: Vec<String>,
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*")
    }
}

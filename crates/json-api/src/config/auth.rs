//! Auth Config

use clap::Args;

/// Session token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hours a login session stays valid; 0 disables expiry
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 24_u16)]
    pub session_ttl_hours: u16,
}

impl AuthConfig {
    /// Session lifetime in hours, `None` when sessions never expire.
    #[must_use]
    pub fn session_ttl(&self) -> Option<u16> {
        (self.session_ttl_hours > 0).then_some(self.session_ttl_hours)
    }
}

//! Media Config

use std::path::PathBuf;

use clap::Args;

/// Uploaded media settings.
#[derive(Debug, Args)]
pub struct MediaConfig {
    /// Root directory for uploaded files, served under `/uploads`
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,
}

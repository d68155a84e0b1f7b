use std::{path::PathBuf, sync::Arc};

use clap::Args;
use jiff::SignedDuration;
use vitrine_app::{
    database::{self, Db},
    domain::{
        media::LocalMediaStore,
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Args)]
pub(crate) struct PruneArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Root directory of uploaded files
    #[arg(long, env = "UPLOADS_DIR", default_value = "uploads")]
    uploads_dir: PathBuf,

    /// Leave files younger than this alone (e.g. "1h", "30m")
    #[arg(long, default_value = "1h")]
    grace: SignedDuration,
}

pub(crate) async fn run(args: PruneArgs) -> Result<(), String> {
    if args.grace.is_negative() {
        return Err("grace cannot be negative".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(
        Db::new(pool),
        Arc::new(LocalMediaStore::new(&args.uploads_dir)),
    );

    let removed = service
        .prune_orphaned_media(args.grace)
        .await
        .map_err(|error| format!("failed to prune media: {error}"))?;

    for path in &removed {
        println!("removed: {path}");
    }

    println!("removed_count: {}", removed.len());

    Ok(())
}

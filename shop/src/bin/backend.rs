use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use common::config::Config;
use shop::api;
use shop::schema;
use shop::shop_storage::ShopStorage;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config/shop.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting backend...");
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(&args.config)?;

    api::init_tracing(&config.backend.log_level);
    info!(project = %config.common.project_name, "loaded config from {}", args.config);

    let storage = Arc::new(ShopStorage::connect(&config.common.database_url).await?);
    schema::create_schema(storage.connection()).await?;

    api::serve(&config.backend, storage).await
}

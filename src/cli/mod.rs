mod commands;
pub mod error;


use std::net::IpAddr;

use clap::Parser;

use crate::api::{self, Config};
use crate::config::StoreConfig;

#[derive(Parser, Debug)]
#[command(name = "todo-mcp")]
#[command(author, version, about = "Todo list MCP server (stdio + HTTP)", long_about = None)]
pub struct Cli {
    /// Store URI (default: TODO_STORE_URI env or sqlite://todo.db?mode=rwc)
    #[arg(long)]
    pub store_uri: Option<String>,

    /// Database name (default: TODO_DATABASE_NAME env or todo_db)
    #[arg(long)]
    pub database: Option<String>,

    /// Collection name (default: TODO_COLLECTION_NAME env or tasks)
    #[arg(long)]
    pub collection: Option<String>,

    /// Host address for the HTTP listener
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port for the HTTP listener
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Serve HTTP only; do not attach MCP to stdin/stdout
    #[arg(long)]
    pub http_only: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolve store settings: flag, then environment, then default.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::from_env()
            .with_uri(self.store_uri.clone())
            .with_database(self.database.clone())
            .with_collection(self.collection.clone())
    }

    pub fn api_config(&self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            verbosity: self.verbose,
        }
    }
}

pub async fn run() -> miette::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    api::init_tracing(cli.verbose);

    commands::serve::run(cli.store_config(), cli.api_config(), !cli.http_only).await?;
    Ok(())
}

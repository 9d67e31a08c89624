pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod io_utils;
pub mod pipeline;
pub mod reconcile;
pub mod rows;
pub mod schema;
pub mod store;
pub mod table;
pub mod table_render;
pub mod upsert;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("reco_sync", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Items(args) => pipeline::execute(&args, &schema::ITEM_PROFILE),
        Commands::Users(args) => pipeline::execute(&args, &schema::USER_PROFILE),
        Commands::Sync(args) => pipeline::execute_sync(&args),
    }
}

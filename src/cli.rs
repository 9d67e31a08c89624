use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Upload CSV datasets to a recommendation store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Normalize a book catalog CSV and upload it as items
    Items(ImportArgs),
    /// Normalize a salespeople CSV and upload it as users
    Users(ImportArgs),
    /// Run the item import followed by the user import
    Sync(SyncArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Input CSV file ('-' reads from stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Maximum requests per batch submission
    #[arg(long = "batch-size", default_value_t = 1000)]
    pub batch_size: usize,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Limit number of source rows to read
    #[arg(long)]
    pub limit: Option<usize>,
    /// Build and preview rows without contacting the store
    #[arg(long = "dry-run")]
    pub dry_run: bool,
    /// Rows to display in the dry-run preview
    #[arg(long = "preview-rows", default_value_t = 3)]
    pub preview_rows: usize,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Book catalog CSV to upload as items
    #[arg(long = "items")]
    pub items: PathBuf,
    /// Salespeople CSV to upload as users
    #[arg(long = "users")]
    pub users: PathBuf,
    /// Maximum requests per item batch submission
    #[arg(long = "items-batch-size", default_value_t = 1000)]
    pub items_batch_size: usize,
    /// Maximum requests per user batch submission
    #[arg(long = "users-batch-size", default_value_t = 1000)]
    pub users_batch_size: usize,
    /// CSV delimiter character for both inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Limit number of source rows to read per input
    #[arg(long)]
    pub limit: Option<usize>,
    /// Build and preview rows without contacting the store
    #[arg(long = "dry-run")]
    pub dry_run: bool,
    /// Rows to display in the dry-run preview
    #[arg(long = "preview-rows", default_value_t = 3)]
    pub preview_rows: usize,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}

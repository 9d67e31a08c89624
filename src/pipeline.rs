//! Per-kind import orchestration: read, build, reconcile, upsert.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{ImportArgs, SyncArgs},
    config::StoreConfig,
    io_utils,
    reconcile,
    rows::{self, EntityRow},
    schema::{ImportProfile, ITEM_PROFILE, USER_PROFILE},
    store::http::HttpStore,
    table::SourceTable,
    table_render, upsert,
};

pub fn execute(args: &ImportArgs, profile: &ImportProfile) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Importing {}s from '{}' (delimiter '{}')",
        profile.kind,
        args.input.display(),
        printable_delimiter(delimiter)
    );

    let table = SourceTable::read(&args.input, delimiter, encoding, args.limit)
        .with_context(|| format!("Reading source table from {:?}", args.input))?;
    let rows = rows::build_rows(&table, profile)?;
    info!(
        "Built {} {} row(s) from {} source row(s)",
        rows.len(),
        profile.kind,
        table.row_count()
    );

    if args.dry_run {
        preview(profile, &rows, args.preview_rows);
        info!("Dry run: skipping schema reconciliation and upload");
        return Ok(());
    }

    let config = StoreConfig::from_env()?;
    let store = HttpStore::new(&config).context("Building store client")?;
    reconcile::ensure_properties(&store, profile.kind, &profile.desired_properties())?;
    upsert::upsert(&store, profile.kind, &rows, args.batch_size)?;
    info!("Finished uploading {} {} row(s)", rows.len(), profile.kind);
    Ok(())
}

/// Runs the item import to completion, then the user import; the two touch
/// disjoint id spaces and schemas, so an item failure leaves users untouched.
pub fn execute_sync(args: &SyncArgs) -> Result<()> {
    execute(&import_args(args, args.items.clone(), args.items_batch_size), &ITEM_PROFILE)?;
    execute(&import_args(args, args.users.clone(), args.users_batch_size), &USER_PROFILE)
}

fn import_args(args: &SyncArgs, input: std::path::PathBuf, batch_size: usize) -> ImportArgs {
    ImportArgs {
        input,
        batch_size,
        delimiter: args.delimiter,
        input_encoding: args.input_encoding.clone(),
        limit: args.limit,
        dry_run: args.dry_run,
        preview_rows: args.preview_rows,
    }
}

fn preview(profile: &ImportProfile, rows: &[EntityRow], preview_rows: usize) {
    let mut headers = vec!["id".to_string()];
    headers.extend(profile.columns.iter().map(|c| c.property.to_string()));

    let rendered: Vec<Vec<String>> = rows
        .iter()
        .take(preview_rows)
        .map(|row| {
            let mut cells = vec![row.id.clone()];
            cells.extend(profile.columns.iter().map(|column| {
                row.values
                    .get(column.property)
                    .and_then(|value| value.as_ref())
                    .map(display_value)
                    .unwrap_or_default()
            }));
            cells
        })
        .collect();

    table_render::print_table(&headers, &rendered);
    info!("Previewed {} of {} row(s)", rendered.len(), rows.len());
}

fn display_value(value: &crate::data::PropertyValue) -> String {
    match value {
        crate::data::PropertyValue::String(s) => s.clone(),
        crate::data::PropertyValue::Int(i) => i.to_string(),
        crate::data::PropertyValue::Double(f) => f.to_string(),
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}

//! Generic table → typed-rows engine.
//!
//! [`build_rows`] turns a [`SourceTable`] into entity rows under the control
//! of an [`ImportProfile`]: columns are resolved once per table by alias
//! priority, then every row is normalized cell-by-cell into the profile's
//! property schema. Input row order is preserved.

use std::collections::BTreeMap;

use log::debug;

use crate::{
    data::{self, PropertyValue},
    error::SyncError,
    schema::{ColumnFallback, ColumnSpec, IdPolicy, ImportProfile},
    table::SourceTable,
};

/// One entity ready for upload: a non-empty id plus a value per schema
/// property (absent or unparseable cells become `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRow {
    pub id: String,
    pub values: BTreeMap<String, Option<PropertyValue>>,
}

/// Where one schema property reads from, fixed once per table.
enum ColumnSource {
    Cell(usize),
    YearOfCell(usize),
    MirrorId,
    Missing,
}

pub fn build_rows(table: &SourceTable, profile: &ImportProfile) -> Result<Vec<EntityRow>, SyncError> {
    let headers: Vec<String> = table
        .headers
        .iter()
        .map(|name| profile.header_style.apply(name))
        .collect();
    let position = |name: &str| headers.iter().position(|header| header == name);

    let id_index = profile
        .id_aliases
        .iter()
        .find_map(|alias| position(alias))
        .ok_or_else(|| {
            SyncError::Schema(format!(
                "missing identifier column for {} import (expected one of {})",
                profile.kind,
                profile.id_aliases.join(", ")
            ))
        })?;

    let sources = profile
        .columns
        .iter()
        .map(|column| resolve_column(column, profile, &position))
        .collect::<Result<Vec<_>, SyncError>>()?;

    let mut rows = Vec::with_capacity(table.row_count());
    let mut skipped = 0usize;
    for raw in &table.rows {
        let cell = |idx: usize| raw.get(idx).map(String::as_str).unwrap_or("");

        let id = match profile.id_policy {
            IdPolicy::Verbatim => cell(id_index).to_string(),
            IdPolicy::NormalizedRequired => match data::normalize_string(cell(id_index)) {
                Some(id) => id,
                None => {
                    skipped += 1;
                    continue;
                }
            },
        };

        let mut values = BTreeMap::new();
        for (column, source) in profile.columns.iter().zip(&sources) {
            let value = match source {
                ColumnSource::Cell(idx) => data::normalize_typed_value(cell(*idx), column.data_type),
                ColumnSource::YearOfCell(idx) => {
                    data::year_from_date(cell(*idx)).map(|year| PropertyValue::Int(year.into()))
                }
                ColumnSource::MirrorId => Some(PropertyValue::String(id.clone())),
                ColumnSource::Missing => None,
            };
            values.insert(column.property.to_string(), value);
        }
        rows.push(EntityRow { id, values });
    }

    if skipped > 0 {
        debug!("Skipped {skipped} {} row(s) with a blank identifier", profile.kind);
    }
    Ok(rows)
}

fn resolve_column(
    column: &ColumnSpec,
    profile: &ImportProfile,
    position: &dyn Fn(&str) -> Option<usize>,
) -> Result<ColumnSource, SyncError> {
    if column.mirrors_id {
        return Ok(ColumnSource::MirrorId);
    }
    if let Some(idx) = column.candidates().iter().find_map(|alias| position(alias)) {
        return Ok(ColumnSource::Cell(idx));
    }
    if let Some(ColumnFallback::YearOfDate(date_column)) = column.fallback
        && let Some(idx) = position(date_column)
    {
        debug!(
            "Column '{}' absent; deriving it from '{date_column}'",
            column.property
        );
        return Ok(ColumnSource::YearOfCell(idx));
    }
    if column.required {
        return Err(SyncError::Schema(format!(
            "missing required column '{}' for {} import (expected one of {})",
            column.property,
            profile.kind,
            column.candidates().join(", ")
        )));
    }
    Ok(ColumnSource::Missing)
}

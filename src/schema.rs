//! Property schemas and per-kind import profiles.
//!
//! The desired property schema for each entity kind is fixed at compile time
//! and append-only against the remote store: this tool creates missing
//! properties but never retypes or deletes existing ones.
//!
//! An [`ImportProfile`] is a declarative descriptor that drives the generic
//! row-building engine in [`crate::rows`]: how headers are normalized before
//! lookup, which columns may act as the entity identifier, and how each
//! property maps onto source columns (including fallback derivations).

use std::{fmt, sync::OnceLock};

use regex::Regex;
use serde::Serialize;

use crate::store::EntityKind;

/// Declared type of a property, as registered with the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Int,
    Double,
}

impl PropertyType {
    pub fn wire_name(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Double => "double",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single property in a kind's desired schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub data_type: PropertyType,
}

/// How source headers are normalized before column lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Trim surrounding whitespace only; lookups are case-sensitive.
    Trimmed,
    /// Trim, case-fold, and collapse inner whitespace to underscores
    /// ("Sales Person" → "sales_person").
    SnakeCase,
}

impl HeaderStyle {
    pub fn apply(&self, name: &str) -> String {
        match self {
            HeaderStyle::Trimmed => name.trim().to_string(),
            HeaderStyle::SnakeCase => {
                static WHITESPACE: OnceLock<Regex> = OnceLock::new();
                let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
                whitespace
                    .replace_all(name.trim(), "_")
                    .to_ascii_lowercase()
            }
        }
    }
}

/// How the identifier cell becomes the entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicy {
    /// Use the raw cell string as-is. The id must stay stable even when
    /// normalization would alter it.
    Verbatim,
    /// Trim the cell; rows whose id normalizes to empty are skipped.
    NormalizedRequired,
}

/// Fallback source for a property whose own column is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFallback {
    /// Derive the value by extracting a year from the named date column.
    YearOfDate(&'static str),
}

/// Mapping from one schema property to the source table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub property: &'static str,
    pub data_type: PropertyType,
    /// Acceptable source column names, in priority order. Empty means the
    /// property name itself is the only candidate.
    pub aliases: &'static [&'static str],
    /// Missing column aborts with a schema error instead of yielding nulls.
    pub required: bool,
    pub fallback: Option<ColumnFallback>,
    /// The property duplicates the entity id rather than reading a column.
    pub mirrors_id: bool,
}

impl ColumnSpec {
    const fn new(property: &'static str, data_type: PropertyType) -> Self {
        Self {
            property,
            data_type,
            aliases: &[],
            required: false,
            fallback: None,
            mirrors_id: false,
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn with_fallback(mut self, fallback: ColumnFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    const fn mirroring_id(mut self) -> Self {
        self.mirrors_id = true;
        self
    }

    pub fn candidates(&self) -> &[&'static str] {
        if self.aliases.is_empty() {
            std::slice::from_ref(&self.property)
        } else {
            self.aliases
        }
    }
}

/// Declarative import descriptor for one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct ImportProfile {
    pub kind: EntityKind,
    pub header_style: HeaderStyle,
    /// Acceptable identifier column names, in priority order.
    pub id_aliases: &'static [&'static str],
    pub id_policy: IdPolicy,
    pub columns: &'static [ColumnSpec],
}

impl ImportProfile {
    /// The fixed property schema this profile populates, in column order.
    pub fn desired_properties(&self) -> Vec<PropertyDef> {
        self.columns
            .iter()
            .map(|column| PropertyDef {
                name: column.property,
                data_type: column.data_type,
            })
            .collect()
    }
}

static ITEM_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("title", PropertyType::String),
    ColumnSpec::new("authors", PropertyType::String),
    ColumnSpec::new("average_rating", PropertyType::Double),
    ColumnSpec::new("num_pages", PropertyType::Int),
    ColumnSpec::new("language_code", PropertyType::String),
    ColumnSpec::new("publisher", PropertyType::String),
    ColumnSpec::new("ratings_count", PropertyType::Int),
    ColumnSpec::new("text_reviews_count", PropertyType::Int),
    ColumnSpec::new("publication_year", PropertyType::Int)
        .with_fallback(ColumnFallback::YearOfDate("publication_date")),
    ColumnSpec::new("isbn", PropertyType::String),
    ColumnSpec::new("isbn13", PropertyType::String),
];

static USER_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("sales_person", PropertyType::String)
        .with_aliases(&["sales_person", "salesperson", "name", "full_name"])
        .required(),
    ColumnSpec::new("sp_id", PropertyType::String).mirroring_id(),
    ColumnSpec::new("team", PropertyType::String),
    ColumnSpec::new("location", PropertyType::String),
];

/// Book catalog profile: headers are trimmed verbatim, `bookID` is required,
/// and ids are carried through unmodified.
pub static ITEM_PROFILE: ImportProfile = ImportProfile {
    kind: EntityKind::Item,
    header_style: HeaderStyle::Trimmed,
    id_aliases: &["bookID"],
    id_policy: IdPolicy::Verbatim,
    columns: ITEM_COLUMNS,
};

/// Salespeople profile: headers are snake-cased, the id and name columns are
/// resolved from alias lists, and blank-id rows are filtered out.
pub static USER_PROFILE: ImportProfile = ImportProfile {
    kind: EntityKind::User,
    header_style: HeaderStyle::SnakeCase,
    id_aliases: &["sp_id", "spid", "user_id", "id"],
    id_policy: IdPolicy::NormalizedRequired,
    columns: USER_COLUMNS,
};

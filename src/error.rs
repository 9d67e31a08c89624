//! Error taxonomy for import runs.
//!
//! Type conflicts between the desired and remote schemas are deliberately not
//! represented here: the remote store cannot retype a property, so a conflict
//! is logged as a warning and the run continues.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Which stage of an import a failed batch belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    CreateProperties,
    CreateEntities,
    SetValues,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::CreateProperties => f.write_str("create-properties"),
            Phase::CreateEntities => f.write_str("create-entities"),
            Phase::SetValues => f.write_str("set-values"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// Missing credentials or an unusable run option; no network call was made.
    #[error("configuration error: {0}")]
    Config(String),

    /// The source table is missing a required column; raised before any row
    /// is processed.
    #[error("schema error: {0}")]
    Schema(String),

    /// A batch submission failed. Previously submitted chunks are not rolled
    /// back; operations are idempotent at the store, so the run can be
    /// repeated safely.
    #[error("{phase} batch {chunk} ({size} request(s)) failed")]
    Upstream {
        phase: Phase,
        chunk: usize,
        size: usize,
        #[source]
        source: StoreError,
    },
}

//! Append-only schema reconciliation against the remote store.

use std::collections::HashMap;

use log::{info, warn};

use crate::{
    error::{Phase, SyncError},
    schema::PropertyDef,
    store::{EntityKind, EntityStore, Operation},
};

/// Ensures every desired property is registered with the store.
///
/// Missing properties are created in a single batch; properties that already
/// exist with a different type only produce a warning, since the store cannot
/// retype them. A failed listing is treated as an empty remote set so a fresh
/// database does not abort the run. Idempotent: a second call with the same
/// schema submits nothing.
pub fn ensure_properties(
    store: &dyn EntityStore,
    kind: EntityKind,
    desired: &[PropertyDef],
) -> Result<(), SyncError> {
    let existing: HashMap<String, String> = match store.list_properties(kind) {
        Ok(listed) => listed
            .into_iter()
            .map(|property| (property.name, property.data_type))
            .collect(),
        Err(err) => {
            warn!("Listing {kind} properties failed ({err}); assuming none exist");
            HashMap::new()
        }
    };

    let mut requests = Vec::new();
    for property in desired {
        match existing.get(property.name) {
            None => requests.push(Operation::CreateProperty {
                name: property.name.to_string(),
                data_type: property.data_type,
            }),
            Some(remote) if remote != property.data_type.wire_name() => {
                warn!(
                    "{kind} property '{}' exists as '{remote}', requested '{}'; remote types cannot be changed",
                    property.name, property.data_type
                );
            }
            Some(_) => {}
        }
    }

    if requests.is_empty() {
        info!("All {} {kind} properties already registered", desired.len());
        return Ok(());
    }

    let size = requests.len();
    store
        .submit_batch(kind, &requests)
        .map_err(|source| SyncError::Upstream {
            phase: Phase::CreateProperties,
            chunk: 0,
            size,
            source,
        })?;
    info!("Registered {size} new {kind} propert{}", if size == 1 { "y" } else { "ies" });
    Ok(())
}

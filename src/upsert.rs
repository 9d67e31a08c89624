//! Two-phase batched upsert: create every entity, then set its values.
//!
//! Phase 2 starts only after every create batch has been submitted, so a
//! set-values call (issued with cascade-create disabled) never races the
//! existence of its entity. Failed batches are fatal; completed batches are
//! not rolled back — both operations are idempotent at the store, so a rerun
//! is the recovery path.

use log::info;

use crate::{
    error::{Phase, SyncError},
    rows::EntityRow,
    store::{EntityKind, EntityStore, Operation},
};

pub fn upsert(
    store: &dyn EntityStore,
    kind: EntityKind,
    rows: &[EntityRow],
    batch_size: usize,
) -> Result<(), SyncError> {
    if batch_size == 0 {
        return Err(SyncError::Config(
            "batch size must be greater than zero".to_string(),
        ));
    }
    if rows.is_empty() {
        info!("No {kind} rows to upload");
        return Ok(());
    }

    let creates: Vec<Operation> = rows
        .iter()
        .map(|row| Operation::CreateEntity { id: row.id.clone() })
        .collect();
    let mut create_batches = 0usize;
    for (chunk, operations) in creates.chunks(batch_size).enumerate() {
        submit(store, kind, Phase::CreateEntities, chunk, operations)?;
        create_batches += 1;
    }
    info!(
        "Created {} {kind} entit{} in {create_batches} batch(es)",
        rows.len(),
        if rows.len() == 1 { "y" } else { "ies" }
    );

    let sets: Vec<Operation> = rows
        .iter()
        .map(|row| Operation::SetValues {
            id: row.id.clone(),
            values: row.values.clone(),
            cascade_create: false,
        })
        .collect();
    let total = sets.len();
    let mut sent = 0usize;
    for (chunk, operations) in sets.chunks(batch_size).enumerate() {
        submit(store, kind, Phase::SetValues, chunk, operations)?;
        sent += operations.len();
        info!("  progress: {sent}/{total} {kind} rows");
    }
    Ok(())
}

fn submit(
    store: &dyn EntityStore,
    kind: EntityKind,
    phase: Phase,
    chunk: usize,
    operations: &[Operation],
) -> Result<(), SyncError> {
    store
        .submit_batch(kind, operations)
        .map_err(|source| SyncError::Upstream {
            phase,
            chunk,
            size: operations.len(),
            source,
        })
}

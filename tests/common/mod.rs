#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

use reco_sync::store::{EntityKind, EntityStore, Operation, PropertyInfo, StoreError};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// In-memory store double: records every submitted batch and applies
/// `CreateProperty` operations to its own listing, so reconciliation runs
/// observe their earlier writes.
#[derive(Default)]
pub struct MockStore {
    pub properties: RefCell<Vec<PropertyInfo>>,
    pub batches: RefCell<Vec<(EntityKind, Vec<Operation>)>>,
    pub fail_listing: Cell<bool>,
    /// Zero-based index of the submission that should fail, counted across
    /// the store's lifetime.
    pub fail_submission_at: Cell<Option<usize>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Vec<PropertyInfo>) -> Self {
        let store = Self::default();
        *store.properties.borrow_mut() = properties;
        store
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches
            .borrow()
            .iter()
            .map(|(_, operations)| operations.len())
            .collect()
    }
}

impl EntityStore for MockStore {
    fn list_properties(&self, _kind: EntityKind) -> Result<Vec<PropertyInfo>, StoreError> {
        if self.fail_listing.get() {
            return Err(StoreError::Api {
                status: 503,
                message: "listing unavailable".to_string(),
            });
        }
        Ok(self.properties.borrow().clone())
    }

    fn submit_batch(&self, kind: EntityKind, operations: &[Operation]) -> Result<(), StoreError> {
        let submitted = self.batches.borrow().len();
        if self.fail_submission_at.get() == Some(submitted) {
            return Err(StoreError::Api {
                status: 500,
                message: "batch rejected".to_string(),
            });
        }
        for operation in operations {
            if let Operation::CreateProperty { name, data_type } = operation {
                self.properties.borrow_mut().push(PropertyInfo {
                    name: name.clone(),
                    data_type: data_type.wire_name().to_string(),
                });
            }
        }
        self.batches
            .borrow_mut()
            .push((kind, operations.to_vec()));
        Ok(())
    }
}

//! Remote entity store client seam.
//!
//! The import pipelines talk to the recommendation service exclusively through
//! the [`EntityStore`] trait: a property listing plus an ordered batch of
//! atomic operations. The production implementation is [`http::HttpStore`];
//! tests substitute an in-memory recorder.

pub mod http;

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{data::PropertyValue, schema::PropertyType};

/// Which remote collection an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Item,
    User,
}

impl EntityKind {
    /// Path segment used by the REST API ("items" / "users").
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityKind::Item => "items",
            EntityKind::User => "users",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Item => f.write_str("item"),
            EntityKind::User => f.write_str("user"),
        }
    }
}

/// One atomic request inside a batch submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Operation {
    CreateEntity {
        id: String,
    },
    CreateProperty {
        name: String,
        #[serde(rename = "type")]
        data_type: PropertyType,
    },
    SetValues {
        id: String,
        values: BTreeMap<String, Option<PropertyValue>>,
        cascade_create: bool,
    },
}

/// A property as reported by the remote store.
///
/// The remote type is kept as a raw string: the store may know types this
/// tool never registers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store rejected the request with status {status}: {message}")]
    Api { status: u16, message: String },
}

/// Blocking client surface of the recommendation store.
///
/// Batch atomicity is delegated to the store; callers must treat every
/// operation as idempotent and safe to resubmit.
pub trait EntityStore {
    fn list_properties(&self, kind: EntityKind) -> Result<Vec<PropertyInfo>, StoreError>;
    fn submit_batch(&self, kind: EntityKind, operations: &[Operation]) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_serialize_to_tagged_json() {
        let create = Operation::CreateEntity { id: "42".into() };
        assert_eq!(
            serde_json::to_string(&create).unwrap(),
            r#"{"op":"createEntity","id":"42"}"#
        );

        let property = Operation::CreateProperty {
            name: "num_pages".into(),
            data_type: PropertyType::Int,
        };
        assert_eq!(
            serde_json::to_string(&property).unwrap(),
            r#"{"op":"createProperty","name":"num_pages","type":"int"}"#
        );

        let mut values = BTreeMap::new();
        values.insert("title".to_string(), Some(PropertyValue::String("Dune".into())));
        values.insert("num_pages".to_string(), None);
        let set = Operation::SetValues {
            id: "42".into(),
            values,
            cascade_create: false,
        };
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"op":"setValues","id":"42","values":{"num_pages":null,"title":"Dune"},"cascadeCreate":false}"#
        );
    }

    #[test]
    fn property_listing_deserializes_wire_shape() {
        let listed: Vec<PropertyInfo> =
            serde_json::from_str(r#"[{"name":"title","type":"string"}]"#).unwrap();
        assert_eq!(listed[0].name, "title");
        assert_eq!(listed[0].data_type, "string");
    }
}

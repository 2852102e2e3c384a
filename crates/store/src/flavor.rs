//! Payload shapes of the supported remote stores.
//!
//! The two stores differ only in the identifier field name (`_id` for
//! crudcrud, `id` for mockapi). Request bodies never carry the top-level
//! identifier: it is part of the URL, and crudcrud rejects PUT bodies that
//! include `_id`.

use std::fmt;
use std::str::FromStr;

use dinodex_core::model::{Dinosaur, Feature, NewDinosaur};
use serde_json::{json, Map, Value};

/// Which remote store dialect to speak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreFlavor {
    /// crudcrud.com: `_id` identifiers, empty PUT responses.
    CrudCrud,
    /// mockapi.io: `id` identifiers, PUT echoes the updated record.
    #[default]
    MockApi,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown store flavor '{0}' (expected 'crudcrud' or 'mockapi')")]
pub struct UnknownFlavor(pub String);

impl StoreFlavor {
    /// Field name the store uses for identifiers, including nested ones.
    pub fn id_field(self) -> &'static str {
        match self {
            StoreFlavor::CrudCrud => "_id",
            StoreFlavor::MockApi => "id",
        }
    }

    /// Body for `POST {base}`: the scalars plus an empty feature list.
    pub fn create_body(self, input: &NewDinosaur) -> Value {
        json!({
            "name": input.name,
            "size": input.size,
            "diet": input.diet,
            "environment": input.environment,
            "features": [],
        })
    }

    /// Body for `PUT {base}/{id}`: every scalar and the full feature list.
    pub fn update_body(self, dinosaur: &Dinosaur) -> Value {
        let features: Vec<Value> = dinosaur
            .features
            .iter()
            .map(|f| self.feature_json(f))
            .collect();

        json!({
            "name": dinosaur.name,
            "size": dinosaur.size,
            "diet": dinosaur.diet,
            "environment": dinosaur.environment,
            "features": features,
        })
    }

    fn feature_json(self, feature: &Feature) -> Value {
        let mut obj = Map::new();
        if let Some(id) = &feature.id {
            obj.insert(self.id_field().to_string(), Value::String(id.clone()));
        }
        obj.insert("part".into(), Value::String(feature.part.clone()));
        obj.insert("color".into(), Value::String(feature.color.clone()));
        Value::Object(obj)
    }
}

impl fmt::Display for StoreFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreFlavor::CrudCrud => f.write_str("crudcrud"),
            StoreFlavor::MockApi => f.write_str("mockapi"),
        }
    }
}

impl FromStr for StoreFlavor {
    type Err = UnknownFlavor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crudcrud" => Ok(StoreFlavor::CrudCrud),
            "mockapi" => Ok(StoreFlavor::MockApi),
            other => Err(UnknownFlavor(other.to_string())),
        }
    }
}

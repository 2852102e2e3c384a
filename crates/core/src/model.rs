//! Dinosaur and feature records.
//!
//! Both store flavors are decoded by the same types: identifiers arrive as
//! `_id` (crudcrud) or `id` (mockapi), and `size` may be a JSON string or
//! number. Encoding for the wire is the store client's job, since the
//! identifier field name depends on the flavor.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{EntityId, FeatureId};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A dinosaur record as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dinosaur {
    #[serde(alias = "_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub size: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub diet: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub environment: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub features: Vec<Feature>,
}

impl Dinosaur {
    /// Position of the feature with the given identifier, if present.
    pub fn feature_position(&self, feature_id: &str) -> Option<usize> {
        self.features
            .iter()
            .position(|f| f.id.as_deref() == Some(feature_id))
    }

    /// Remove the feature with the given identifier, returning it.
    ///
    /// Order of the remaining features is preserved.
    pub fn remove_feature(&mut self, feature_id: &str) -> Option<Feature> {
        let index = self.feature_position(feature_id)?;
        Some(self.features.remove(index))
    }

    /// Scalar fields only, as submitted on creation.
    pub fn scalars(&self) -> NewDinosaur {
        NewDinosaur {
            name: self.name.clone(),
            size: self.size.clone(),
            diet: self.diet.clone(),
            environment: self.environment.clone(),
        }
    }
}

/// Linear scan of a snapshot for the entity with the given identifier.
pub fn find_dinosaur<'a>(entities: &'a mut [Dinosaur], id: &str) -> Option<&'a mut Dinosaur> {
    entities.iter_mut().find(|d| d.id == id)
}

/// Input for creating a dinosaur. New records always start without features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDinosaur {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default)]
    pub environment: String,
}

// ---------------------------------------------------------------------------
// Feature
// ---------------------------------------------------------------------------

/// A body part and its color, nested inside a [`Dinosaur`].
///
/// `id` is optional because records written by other clients may carry
/// features without one. Such features cannot be targeted for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub part: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub color: String,
}

/// Input for appending a feature to a dinosaur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFeature {
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub color: String,
}

impl NewFeature {
    /// Build the stored feature, minting a fresh UUID v4 identifier.
    ///
    /// Neither public mock store assigns ids to nested objects, so the id
    /// is chosen here and survives the full-entity round trip.
    pub fn into_feature(self) -> Feature {
        Feature {
            id: Some(uuid::Uuid::new_v4().to_string()),
            part: self.part,
            color: self.color,
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoding
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(TextOrNumber::Text(s)) => s,
        Some(TextOrNumber::Number(n)) => n.to_string(),
        Some(TextOrNumber::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rex() -> Dinosaur {
        Dinosaur {
            id: "1".into(),
            name: "Rex".into(),
            size: "large".into(),
            diet: "carnivore".into(),
            environment: "forest".into(),
            features: vec![
                Feature {
                    id: Some("f1".into()),
                    part: "scales".into(),
                    color: "green".into(),
                },
                Feature {
                    id: Some("f2".into()),
                    part: "horns".into(),
                    color: "ivory".into(),
                },
            ],
        }
    }

    #[test]
    fn decodes_mockapi_payload() {
        let d: Dinosaur = serde_json::from_value(json!({
            "id": "7",
            "name": "Rex",
            "size": "large",
            "diet": "carnivore",
            "environment": "forest",
            "features": [{"id": "f1", "part": "scales", "color": "green"}]
        }))
        .unwrap();

        assert_eq!(d.id, "7");
        assert_eq!(d.features.len(), 1);
        assert_eq!(d.features[0].id.as_deref(), Some("f1"));
    }

    #[test]
    fn decodes_crudcrud_underscore_ids() {
        let d: Dinosaur = serde_json::from_value(json!({
            "_id": "63a1",
            "name": "Trike",
            "size": 9,
            "diet": "herbivore",
            "environment": "plains",
            "features": [{"_id": "f9", "part": "frill", "color": "red"}]
        }))
        .unwrap();

        assert_eq!(d.id, "63a1");
        assert_eq!(d.size, "9");
        assert_eq!(d.features[0].id.as_deref(), Some("f9"));
    }

    #[test]
    fn missing_or_null_features_decode_as_empty() {
        let missing: Dinosaur = serde_json::from_value(json!({"id": "1", "name": "A"})).unwrap();
        let null: Dinosaur =
            serde_json::from_value(json!({"id": "2", "name": "B", "features": null})).unwrap();

        assert!(missing.features.is_empty());
        assert!(null.features.is_empty());
        assert_eq!(missing.diet, "");
    }

    #[test]
    fn feature_without_id_decodes() {
        let f: Feature = serde_json::from_value(json!({"part": "tail", "color": "grey"})).unwrap();
        assert_eq!(f.id, None);
    }

    #[test]
    fn remove_feature_preserves_order_of_rest() {
        let mut d = rex();
        d.features.push(Feature {
            id: Some("f3".into()),
            part: "claws".into(),
            color: "black".into(),
        });

        let removed = d.remove_feature("f2").unwrap();

        assert_eq!(removed.part, "horns");
        let ids: Vec<_> = d.features.iter().map(|f| f.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["f1", "f3"]);
    }

    #[test]
    fn remove_unknown_feature_is_none() {
        let mut d = rex();
        assert!(d.remove_feature("nope").is_none());
        assert_eq!(d.features.len(), 2);
    }

    #[test]
    fn find_dinosaur_scans_by_id() {
        let mut entities = vec![rex(), Dinosaur { id: "2".into(), ..rex() }];
        assert_eq!(find_dinosaur(&mut entities, "2").map(|d| d.id.clone()), Some("2".into()));
        assert!(find_dinosaur(&mut entities, "3").is_none());
    }

    #[test]
    fn new_feature_mints_unique_ids() {
        let a = NewFeature { part: "a".into(), color: "b".into() }.into_feature();
        let b = NewFeature { part: "a".into(), color: "b".into() }.into_feature();
        assert!(a.id.is_some());
        assert_ne!(a.id, b.id);
    }
}

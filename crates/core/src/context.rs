//! Context payload model: the normalized shape a normalizer produces and a
//! provider forwards to its SDK.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Flat string-keyed payload handed to an analytics SDK.
pub type Dictionary = BTreeMap<String, serde_json::Value>;

pub const HIT_NAME_KEY: &str = "hitName";
pub const HIT_TYPE_KEY: &str = "hitType";

/// Which SDK primitive a hit is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HitType {
    TrackAction,
    TrackState,
}

/// Normalizer output: routing information plus arbitrary payload fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextData {
    pub hit_name: String,
    pub hit_type: HitType,
    #[serde(flatten)]
    pub fields: Dictionary,
}

impl ContextData {
    pub fn action(hit_name: impl Into<String>) -> Self {
        Self {
            hit_name: hit_name.into(),
            hit_type: HitType::TrackAction,
            fields: Dictionary::new(),
        }
    }

    pub fn state(hit_name: impl Into<String>) -> Self {
        Self {
            hit_name: hit_name.into(),
            hit_type: HitType::TrackState,
            fields: Dictionary::new(),
        }
    }

    pub fn with_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Split into `(hit_name, hit_type, payload)`. The routing keys never
    /// travel in the payload, even if a normalizer copied them into `fields`.
    pub fn into_parts(self) -> (String, HitType, Dictionary) {
        let mut fields = self.fields;
        fields.remove(HIT_NAME_KEY);
        fields.remove(HIT_TYPE_KEY);
        (self.hit_name, self.hit_type, fields)
    }
}

//! Common base field group for credential subjects.
//!
//! Every variant embeds [`SubjectBase`] via `#[serde(flatten)]` — the
//! flattened-composition answer to the deep inheritance chains found in
//! older catalog schema generations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fields shared by every credential-subject variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectBase {
    /// Subject identifier (a URI, typically a DID or catalog URL).
    ///
    /// Live documents use both `id` and `@id`; decode accepts either,
    /// encode writes `id`.
    #[serde(rename = "id", alias = "@id")]
    pub id: String,

    /// JSON-LD context prefixes for the variant's field names.
    ///
    /// Carried as an opaque prefix→IRI map; context *resolution* is the
    /// job of an external JSON-LD processor.
    #[serde(rename = "@context", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
}

impl SubjectBase {
    /// Build a base with the given subject id and no context map.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            context: BTreeMap::new(),
        }
    }

    /// Add a context prefix mapping.
    pub fn with_context(mut self, prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        self.context.insert(prefix.into(), iri.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_accepts_at_id_alias() {
        let base: SubjectBase =
            serde_json::from_value(json!({"@id": "did:web:provider.example"})).unwrap();
        assert_eq!(base.id, "did:web:provider.example");
    }

    #[test]
    fn encode_writes_plain_id() {
        let base = SubjectBase::new("did:web:provider.example");
        let value = serde_json::to_value(&base).unwrap();
        assert_eq!(value, json!({"id": "did:web:provider.example"}));
    }

    #[test]
    fn context_round_trips() {
        let base = SubjectBase::new("did:web:x").with_context("gx", "https://w3id.org/sdx/core#");
        let value = serde_json::to_value(&base).unwrap();
        assert_eq!(value["@context"]["gx"], "https://w3id.org/sdx/core#");
        let back: SubjectBase = serde_json::from_value(value).unwrap();
        assert_eq!(back, base);
    }
}

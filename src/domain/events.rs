use serde::{Deserialize, Serialize};

use crate::error::JarError;

/// A source record that should show up in the jar as one marble.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnEvent {
    /// Unique id of the source record.
    pub id: String,
    /// Color/tag; interpretation is up to the renderer.
    pub category: String,
}

impl SpawnEvent {
    pub fn new(id: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
        }
    }
}

/// Decode a JSON array of `{ "id": ..., "category": ... }` objects.
pub fn events_from_json(json: &str) -> Result<Vec<SpawnEvent>, JarError> {
    serde_json::from_str(json).map_err(JarError::EventParse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_event_array() {
        let events = events_from_json(
            r#"[{ "id": "d-1", "category": "girl" }, { "id": "d-2", "category": "boy" }]"#,
        )
        .unwrap();
        assert_eq!(events, vec![SpawnEvent::new("d-1", "girl"), SpawnEvent::new("d-2", "boy")]);
    }

    #[test]
    fn missing_category_is_rejected() {
        let err = events_from_json(r#"[{ "id": "d-1" }]"#).unwrap_err();
        assert!(matches!(err, JarError::EventParse(_)));
    }
}

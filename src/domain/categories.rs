use std::collections::HashMap;

use serde::Serialize;

pub type CategoryId = u16;

/// Interns category tags into small integer ids so the render buffer can stay
/// a flat `f32` array. Ids are handed out in first-seen order and never reused
/// until `clear`.
#[derive(Clone, Default)]
pub struct CategoryRegistry {
    key_to_id: HashMap<String, CategoryId>,
    keys: Vec<String>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `key`, registering it if unseen.
    ///
    /// Once `CategoryId::MAX` tags are registered every new tag maps to
    /// `CategoryId::MAX`, which has no key.
    pub fn intern(&mut self, key: &str) -> CategoryId {
        if let Some(id) = self.key_to_id.get(key) {
            return *id;
        }
        if self.keys.len() >= CategoryId::MAX as usize {
            return CategoryId::MAX;
        }
        let id = self.keys.len() as CategoryId;
        self.keys.push(key.to_string());
        self.key_to_id.insert(key.to_string(), id);
        id
    }

    pub fn key(&self, id: CategoryId) -> Option<&str> {
        self.keys.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.key_to_id.clear();
        self.keys.clear();
    }

    pub fn manifest_json(&self) -> String {
        let categories: Vec<CategoryManifestEntry<'_>> = self
            .keys
            .iter()
            .enumerate()
            .map(|(idx, key)| CategoryManifestEntry {
                id: idx as CategoryId,
                key,
            })
            .collect();
        let out = CategoryManifest {
            format_version: 1,
            categories,
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryManifest<'a> {
    format_version: u32,
    categories: Vec<CategoryManifestEntry<'a>>,
}

#[derive(Serialize)]
struct CategoryManifestEntry<'a> {
    id: CategoryId,
    key: &'a str,
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field_value::FieldValue;

/// One catalogue record. The remote feed calls the field map `data`;
/// items without one deserialize with `fields: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "data", default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldValue>>,
}

impl CatalogueItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        fields: Option<BTreeMap<String, FieldValue>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.as_ref().and_then(|m| m.get(key))
    }

    /// Project the field map as (key, display text) pairs in key order.
    pub fn field_lines(&self) -> Vec<(String, String)> {
        match &self.fields {
            Some(map) => map
                .iter()
                .map(|(k, v)| (k.clone(), v.display_text()))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Order items by name, case-insensitively, for list display.
pub fn sort_for_display(items: &mut [CatalogueItem]) {
    items.sort_by_key(|item| item.name.to_lowercase());
}

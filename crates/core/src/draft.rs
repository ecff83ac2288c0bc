use std::collections::BTreeMap;

use crate::field_value::FieldValue;
use crate::item::CatalogueItem;
use crate::validate::{self, Validation};

/// An in-progress edit of one item. Field values are held as the text a
/// form shows; `build` turns them back into typed values, using the
/// original item's variants as parsing hints.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    original: CatalogueItem,
    name: String,
    fields: BTreeMap<String, String>,
}

impl ItemDraft {
    pub fn new(item: CatalogueItem) -> Self {
        let name = item.name.clone();
        let fields = projected(&item);
        Self {
            original: item,
            name,
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.original.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn field_text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove_field(&mut self, key: &str) -> bool {
        self.fields.remove(key).is_some()
    }

    pub fn validate(&self) -> Validation {
        validate::validate_item(&self.name, &self.fields)
    }

    /// True once the name or any field text differs from the original.
    pub fn has_changes(&self) -> bool {
        self.name != self.original.name || self.fields != projected(&self.original)
    }

    /// Assemble the edited item. Values are trimmed, blank fields are
    /// dropped, and each kept value is re-parsed against the original
    /// field's variant (new keys fall back to plain inference).
    pub fn build(&self) -> CatalogueItem {
        let mut fields = BTreeMap::new();
        for (key, value) in &self.fields {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            let parsed = match self.original.field(key) {
                Some(hint) => hint.reinterpret(trimmed),
                None => FieldValue::infer(trimmed),
            };
            fields.insert(key.clone(), parsed);
        }

        CatalogueItem::new(
            self.original.id.clone(),
            self.name.trim().to_string(),
            if fields.is_empty() { None } else { Some(fields) },
        )
    }
}

fn projected(item: &CatalogueItem) -> BTreeMap<String, String> {
    item.field_lines().into_iter().collect()
}

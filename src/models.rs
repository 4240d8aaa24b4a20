//! Core data models for dex-subset
//!
//! Records and forms are kept as order-preserving JSON objects rather than
//! typed structs: every attribute other than `name`, `forms` and
//! `spriteSuffix` is opaque and must be written back exactly where it was
//! read, so the output stays diff-friendly against the source dex.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key holding the display name of a record or form
pub const NAME_KEY: &str = "name";
/// Key holding a record's alternate forms
pub const FORMS_KEY: &str = "forms";
/// Key holding a form's sprite filename suffix
pub const SPRITE_SUFFIX_KEY: &str = "spriteSuffix";

/// A single Pokémon entry from a dex file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

/// A variant appearance of a [`Record`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Display name, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_KEY).and_then(Value::as_str)
    }

    pub fn has_forms(&self) -> bool {
        self.0.contains_key(FORMS_KEY)
    }

    /// Parse the `forms` list. `None` when the record has no forms key.
    ///
    /// Items that are not objects are skipped; `SourceDex::load` refuses
    /// dexes containing them.
    pub fn forms(&self) -> Option<Vec<Form>> {
        let value = self.0.get(FORMS_KEY)?;
        let forms = value
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_object().cloned().map(Form))
                    .collect()
            })
            .unwrap_or_default();
        Some(forms)
    }

    /// Replace the forms list in place, keeping the key's position
    pub fn set_forms(&mut self, forms: Vec<Form>) {
        let value = Value::Array(forms.into_iter().map(|f| Value::Object(f.0)).collect());
        match self.0.get_mut(FORMS_KEY) {
            Some(slot) => *slot = value,
            None => {
                self.0.insert(FORMS_KEY.to_string(), value);
            }
        }
    }

    /// Drop the forms key entirely, keeping the order of the other keys
    pub fn clear_forms(&mut self) {
        self.0.shift_remove(FORMS_KEY);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl Form {
    pub fn name(&self) -> Option<&str> {
        self.0.get(NAME_KEY).and_then(Value::as_str)
    }

    pub fn sprite_suffix(&self) -> Option<&str> {
        self.0.get(SPRITE_SUFFIX_KEY).and_then(Value::as_str)
    }

    /// The base form is the one without a sprite suffix
    pub fn is_base(&self) -> bool {
        self.sprite_suffix().is_none()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

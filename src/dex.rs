//! Loading the names list and the source dex

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::error::DexError;
use crate::models::{FORMS_KEY, NAME_KEY, Record, SPRITE_SUFFIX_KEY};

/// Read the names to copy, one per line, in order.
///
/// Lines are trimmed and blank lines skipped.
pub fn read_names(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|e| DexError::from_io(path, e))?;

    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    log::info!("Read {} names from {}", names.len(), path.display());
    Ok(names)
}

/// Position of the first form that is not an object with a string name
/// and an optional string sprite suffix
fn malformed_form(items: &[Value]) -> Option<usize> {
    items.iter().position(|item| {
        let Some(form) = item.as_object() else {
            return true;
        };
        let named = form.get(NAME_KEY).is_some_and(Value::is_string);
        let suffix_ok = form.get(SPRITE_SUFFIX_KEY).is_none_or(Value::is_string);
        !(named && suffix_ok)
    })
}

/// The complete dex, indexed by record name
#[derive(Debug, Default)]
pub struct SourceDex {
    by_name: HashMap<String, Record>,
}

impl SourceDex {
    /// Load a dex file: a JSON array of records, each with a string `name`.
    ///
    /// A `forms` value must be an array of objects, each with a string `name`
    /// and, if present, a string `spriteSuffix`. When two records share a
    /// name the later one wins.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DexError::from_io(path, e))?;
        let records: Vec<Value> = serde_json::from_str(&text).map_err(|source| {
            DexError::InvalidJson {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let mut by_name = HashMap::with_capacity(records.len());
        for (index, value) in records.into_iter().enumerate() {
            let invalid = || DexError::InvalidRecord {
                path: path.to_path_buf(),
                index,
            };
            let Value::Object(fields) = value else {
                return Err(invalid().into());
            };
            let record = Record::new(fields);
            let name = record.name().ok_or_else(invalid)?.to_string();

            match record.fields().get(FORMS_KEY) {
                None => {}
                Some(Value::Array(items)) => {
                    if let Some(form_index) = malformed_form(items) {
                        return Err(DexError::InvalidForm {
                            path: path.to_path_buf(),
                            record: name,
                            index: form_index,
                        }
                        .into());
                    }
                }
                Some(_) => return Err(invalid().into()),
            }

            if by_name.insert(name.clone(), record).is_some() {
                log::warn!("Duplicate entry {:?} in {}; keeping the last one", name, path.display());
            }
        }

        log::info!("Loaded {} records from {}", by_name.len(), path.display());
        Ok(Self { by_name })
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Record> {
        self.by_name.get(name)
    }

    /// Copies of the records for `names`, in the order given.
    ///
    /// Every missing name is reported at once.
    pub fn select(&self, names: &[String]) -> Result<Vec<Record>> {
        let mut missing = Vec::new();
        let mut selected = Vec::with_capacity(names.len());

        for name in names {
            match self.by_name.get(name) {
                Some(record) => selected.push(record.clone()),
                None => missing.push(name.clone()),
            }
        }

        if !missing.is_empty() {
            return Err(DexError::MissingNames(missing).into());
        }
        Ok(selected)
    }
}

//! Selective copying of records and their forms
//!
//! Records without forms pass through untouched. For the rest, forms whose
//! sprite suffix is in the skip set are dropped silently and every other form
//! is offered to the user (default: keep).

use anyhow::Result;
use std::collections::BTreeSet;

use crate::config::DexConfig;
use crate::error::DexError;
use crate::models::{Form, Record};
use crate::prompt::Prompter;

/// Decides which forms of a record survive the copy
#[derive(Debug, Clone, PartialEq)]
pub struct FormFilter {
    skip_suffixes: BTreeSet<String>,
}

impl FormFilter {
    pub fn new(skip_suffixes: BTreeSet<String>) -> Self {
        Self { skip_suffixes }
    }

    pub fn from_config(config: &DexConfig) -> Self {
        Self::new(config.skip_suffixes.clone())
    }

    /// Whether `form` is dropped without asking
    pub fn is_skipped(&self, form: &Form) -> bool {
        form.sprite_suffix()
            .is_some_and(|suffix| self.skip_suffixes.contains(suffix))
    }

    /// Ask about `form` unless it is skipped outright
    pub fn should_copy(&self, form: &Form, prompter: &mut dyn Prompter) -> Result<bool> {
        if self.is_skipped(form) {
            log::debug!("Skipping form {:?} (suffix {:?})", form.name(), form.sprite_suffix());
            return Ok(false);
        }

        let suffix = form
            .sprite_suffix()
            .map(|s| format!(" (suffix: {})", s))
            .unwrap_or_default();
        let question = format!("\tInclude {}{}? (Y/n) ", form.name().unwrap_or("?"), suffix);

        Ok(prompter.confirm(&question, true)?)
    }

    /// Filter the forms of a single record.
    ///
    /// Fails with [`DexError::NoFormsSelected`] when no form is kept. A lone
    /// surviving base form is folded away: the record is written without a
    /// `forms` key.
    pub fn copy_record(&self, mut record: Record, prompter: &mut dyn Prompter) -> Result<Record> {
        let Some(forms) = record.forms() else {
            return Ok(record);
        };
        let name = record.name().unwrap_or_default().to_string();

        let suffixes: Vec<&str> = forms.iter().filter_map(Form::sprite_suffix).collect();
        prompter.say(&format!("{} has {} forms ({}).", name, forms.len(), suffixes.join(", ")))?;

        let mut kept = Vec::with_capacity(forms.len());
        for form in forms {
            if self.should_copy(&form, prompter)? {
                kept.push(form);
            }
        }

        match kept.len() {
            0 => {
                prompter.say(&format!("No forms selected for {}.", name))?;
                return Err(DexError::NoFormsSelected { name }.into());
            }
            1 if kept[0].is_base() => {
                log::debug!("Only the base form of {} kept; dropping forms", name);
                record.clear_forms();
            }
            _ => {
                log::debug!("Keeping {} forms of {}", kept.len(), name);
                record.set_forms(kept);
            }
        }

        Ok(record)
    }

    /// Filter every record in order, stopping at the first failure
    pub fn copy_all(&self, records: Vec<Record>, prompter: &mut dyn Prompter) -> Result<Vec<Record>> {
        records
            .into_iter()
            .map(|record| self.copy_record(record, prompter))
            .collect()
    }
}

impl Default for FormFilter {
    fn default() -> Self {
        Self::from_config(&DexConfig::default())
    }
}

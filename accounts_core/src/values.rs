use crate::Field;
use serde::Serialize;
use std::collections::BTreeMap;

/// The current contents of a form: one string per field the form declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<Field, String>,
}

impl FormValues {
    /// Empty strings for each of the given fields. This is what every form
    /// starts with and returns to after a submission.
    pub fn empty(fields: &[Field]) -> Self {
        Self {
            values: fields.iter().map(|field| (*field, String::new())).collect(),
        }
    }

    /// Set a field's value. Returns `false` (and changes nothing) if the field
    /// is not part of this form.
    pub fn set(&mut self, field: Field, value: String) -> bool {
        match self.values.get_mut(&field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The raw value of a field, as typed. Fields outside this form read as
    /// empty.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// The value of a field with surrounding whitespace removed. All
    /// validation rules look at this rather than the raw value.
    pub fn trimmed(&self, field: Field) -> &str {
        self.get(field).trim()
    }

    /// Whether this form has the given field.
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Whether every field is an empty string.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    /// Reset every field to an empty string.
    pub fn clear(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
    }

    /// Iterate over the fields and their raw values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values
            .iter()
            .map(|(field, value)| (*field, value.as_str()))
    }
}

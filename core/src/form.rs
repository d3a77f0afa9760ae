//! The create/edit form.
//!
//! A form with an id submits as an update of that exact id; without one it
//! submits as a create.

use crate::error::ApiError;
use crate::types::{Country, CountryInput};

/// Which request a submit will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Empty,
    Editing(i32),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub id: Option<i32>,
    pub name: String,
    pub code: String,
}

impl FormState {
    pub fn mode(&self) -> FormMode {
        match self.id {
            Some(id) => FormMode::Editing(id),
            None => FormMode::Empty,
        }
    }

    /// Load the current remote values of a country for editing.
    pub fn populate(&mut self, country: &Country) {
        self.id = Some(country.id);
        self.name = country.name.clone();
        self.code = country.code.clone();
    }

    pub fn clear(&mut self) {
        *self = FormState::default();
    }

    /// Trimmed payload, or a validation error if either field is blank.
    pub fn validate(&self) -> Result<CountryInput, ApiError> {
        let name = self.name.trim();
        let code = self.code.trim();
        if name.is_empty() || code.is_empty() {
            return Err(ApiError::Validation(
                "Country name and code are required".to_string(),
            ));
        }
        Ok(CountryInput {
            name: name.to_string(),
            code: code.to_string(),
        })
    }
}

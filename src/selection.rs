use thiserror::Error;

use crate::data::model::{Field, FORM_FIELDS};
use crate::error::PreconditionError;

// ---------------------------------------------------------------------------
// Selection – the user's in-progress choice
// ---------------------------------------------------------------------------

/// Every field starts unset. The only cross-field rule is that picking a
/// different company clears the model; see [`Selection::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub company: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub kms_driven: Option<u64>,
}

/// One user edit. `None` (or an empty string) unsets the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Company(Option<String>),
    Model(Option<String>),
    Year(Option<i32>),
    FuelType(Option<String>),
    KmsDriven(Option<u64>),
}

/// A selection with every field present, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteSelection {
    pub company: String,
    pub model: String,
    pub year: i32,
    pub fuel_type: String,
    pub kms_driven: u64,
}

impl Selection {
    /// Return the selection with `change` applied.
    pub fn apply(mut self, change: Change) -> Self {
        match change {
            Change::Company(company) => {
                let company = non_empty(company);
                if company != self.company {
                    self.model = None;
                }
                self.company = company;
            }
            Change::Model(model) => self.model = non_empty(model),
            Change::Year(year) => self.year = year,
            Change::FuelType(fuel_type) => self.fuel_type = non_empty(fuel_type),
            Change::KmsDriven(kms) => self.kms_driven = kms,
        }
        self
    }

    /// Unset fields, in request order.
    pub fn missing(&self) -> Vec<Field> {
        FORM_FIELDS
            .iter()
            .map(|(field, _)| *field)
            .filter(|field| !self.is_set(*field))
            .collect()
    }

    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Company => self.company.is_some(),
            Field::Model => self.model.is_some(),
            Field::Year => self.year.is_some(),
            Field::FuelType => self.fuel_type.is_some(),
            Field::KmsDriven => self.kms_driven.is_some(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn complete(&self) -> Result<CompleteSelection, PreconditionError> {
        match (
            &self.company,
            &self.model,
            self.year,
            &self.fuel_type,
            self.kms_driven,
        ) {
            (Some(company), Some(model), Some(year), Some(fuel_type), Some(kms_driven)) => {
                Ok(CompleteSelection {
                    company: company.clone(),
                    model: model.clone(),
                    year,
                    fuel_type: fuel_type.clone(),
                    kms_driven,
                })
            }
            _ => Err(PreconditionError::Incomplete {
                missing: self.missing(),
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Odometer text input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KmsInputError {
    #[error("Kms Driven cannot be negative")]
    Negative,
    #[error("Kms Driven must be a whole number")]
    NotANumber,
}

/// Interpret the odometer text box. Blank input means "unset", never zero.
pub fn parse_kms_input(text: &str) -> Result<Option<u64>, KmsInputError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<u64>() {
        Ok(kms) => Ok(Some(kms)),
        Err(_) if text.parse::<i64>().is_ok_and(|v| v < 0) => Err(KmsInputError::Negative),
        Err(_) => Err(KmsInputError::NotANumber),
    }
}

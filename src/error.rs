use thiserror::Error;

use crate::data::model::Field;

/// Failure while fetching or parsing the dataset. Never shown raw to the
/// user; the loader absorbs it into an empty row set plus a status message.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("fetching dataset: {0}")]
    Http(String),
    #[error("parsing dataset: {0:#}")]
    Csv(anyhow::Error),
}

/// The selection cannot be submitted as it stands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("missing fields: {}", join_fields(.missing))]
    Incomplete { missing: Vec<Field> },
    #[error("{field} {value:?} is not an available option")]
    NotOffered { field: Field, value: String },
}

/// Anything that went wrong between sending the request and reading the body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("reading response body: {0}")]
    Body(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("response is not a number: {0:?}")]
    InvalidResponse(String),
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

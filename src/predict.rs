use std::time::Duration;

use crate::data::index::OptionIndex;
use crate::data::model::{Field, FORM_FIELDS};
use crate::error::{PreconditionError, PredictError, TransportError};
use crate::selection::{CompleteSelection, Selection};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const PRECONDITION_MESSAGE: &str =
    "Please select Company, Model, Year, Fuel and enter Kms Driven.";
pub const TRANSPORT_MESSAGE: &str = "Prediction request failed. Backend may not be running yet.";
pub const INVALID_RESPONSE_MESSAGE: &str = "Prediction service returned an unexpected response.";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// State of the most recent prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    /// Predicted price exactly as the service sent it (trimmed).
    Success(String),
    /// User-facing message.
    Failure(String),
}

impl Outcome {
    pub fn from_result(result: Result<String, PredictError>) -> Self {
        match result {
            Ok(price) => Outcome::Success(price),
            Err(e) => Outcome::Failure(failure_message(&e)),
        }
    }
}

/// Map an error to what the user sees. Transport details stay in the log.
pub fn failure_message(error: &PredictError) -> String {
    match error {
        PredictError::Precondition(PreconditionError::Incomplete { .. }) => {
            PRECONDITION_MESSAGE.to_string()
        }
        PredictError::Precondition(PreconditionError::NotOffered { field, value }) => {
            format!("Selected {field} \"{value}\" is not one of the available options.")
        }
        PredictError::Transport(_) => TRANSPORT_MESSAGE.to_string(),
        PredictError::InvalidResponse(_) => INVALID_RESPONSE_MESSAGE.to_string(),
    }
}

pub fn display_price(currency_symbol: &str, price: &str) -> String {
    format!("{currency_symbol} {price}")
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Sends one form-encoded POST and returns the response body.
pub trait Transport: Send + Sync {
    fn post_form(&self, url: &str, body: &str) -> Result<String, TransportError>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
        }
    }
}

impl Transport for UreqTransport {
    fn post_form(&self, url: &str, body: &str) -> Result<String, TransportError> {
        let response = self
            .agent
            .post(url)
            .set("Content-Type", FORM_CONTENT_TYPE)
            .send_string(body)
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => TransportError::Status(code),
                ureq::Error::Transport(t) => TransportError::Network(t.to_string()),
            })?;

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(TransportError::Status(status));
        }
        response
            .into_string()
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Request building
// ---------------------------------------------------------------------------

/// A validated request, ready to hand to a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub url: String,
    pub body: String,
}

/// Validate `selection` against `index` and encode it. No I/O happens here,
/// so an incomplete or stale selection never reaches the network.
pub fn prepare(
    selection: &Selection,
    index: &OptionIndex,
    url: &str,
) -> Result<PredictionRequest, PreconditionError> {
    let complete = selection.complete()?;

    for (field, _) in FORM_FIELDS {
        let value = field_value(&complete, field);
        if !index.offers(field, &value, &complete.company) {
            return Err(PreconditionError::NotOffered { field, value });
        }
    }

    Ok(PredictionRequest {
        url: url.to_string(),
        body: form_body(&complete),
    })
}

/// `company=…&car_models=…&year=…&fuel_type=…&kilo_driven=…`
pub fn form_body(selection: &CompleteSelection) -> String {
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    for (field, name) in FORM_FIELDS {
        form.append_pair(name, &field_value(selection, field));
    }
    form.finish()
}

fn field_value(selection: &CompleteSelection, field: Field) -> String {
    match field {
        Field::Company => selection.company.clone(),
        Field::Model => selection.model.clone(),
        Field::Year => selection.year.to_string(),
        Field::FuelType => selection.fuel_type.clone(),
        Field::KmsDriven => selection.kms_driven.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

/// Perform exactly one attempt; there is no retry.
pub fn send(
    transport: &dyn Transport,
    request: &PredictionRequest,
) -> Result<String, PredictError> {
    log::debug!("POST {} {}", request.url, request.body);
    let body = transport
        .post_form(&request.url, &request.body)
        .inspect_err(|e| log::error!("Prediction request to {} failed: {e}", request.url))?;
    parse_price(&body)
}

/// Validate, send, and resolve into an [`Outcome`] in one call.
pub fn predict(
    transport: &dyn Transport,
    selection: &Selection,
    index: &OptionIndex,
    url: &str,
) -> Outcome {
    let result = prepare(selection, index, url)
        .map_err(PredictError::from)
        .and_then(|request| send(transport, &request));
    Outcome::from_result(result)
}

fn parse_price(body: &str) -> Result<String, PredictError> {
    let text = body.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(text.to_string()),
        _ => {
            log::warn!("Prediction service returned a non-numeric body: {text:?}");
            Err(PredictError::InvalidResponse(text.to_string()))
        }
    }
}

use crate::data::index::OptionIndex;
use crate::data::loader::LoadOutcome;
use crate::data::model::Row;
use crate::error::PredictError;
use crate::predict::{self, Outcome, PredictionRequest};
use crate::selection::{parse_kms_input, Change, Selection};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Rows of the last completed load. Replaced wholesale, never edited.
    rows: Vec<Row>,

    /// Option lists derived from `rows`; rebuilt together with them.
    index: OptionIndex,

    /// Where the dataset is read from.
    pub dataset_source: String,

    /// Whether a dataset load is in progress.
    pub loading: bool,

    /// Status message of the last failed load.
    pub load_error: Option<String>,

    pub selection: Selection,

    /// Raw contents of the odometer text box.
    pub kms_text: String,

    /// Inline hint shown when `kms_text` is not a valid reading.
    pub kms_hint: Option<String>,

    /// Result of the most recent prediction, if any was requested.
    pub outcome: Option<Outcome>,

    /// Prediction requests sent but not yet resolved.
    pub in_flight: usize,
}

impl AppState {
    pub fn new(dataset_source: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            index: OptionIndex::default(),
            dataset_source: dataset_source.into(),
            loading: false,
            load_error: None,
            selection: Selection::default(),
            kms_text: String::new(),
            kms_hint: None,
            outcome: None,
            in_flight: 0,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn index(&self) -> &OptionIndex {
        &self.index
    }

    /// Mark a load as started. Returns `false` if one is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.load_error = None;
        true
    }

    /// Ingest a finished load (successful or not) and rebuild the index.
    pub fn finish_load(&mut self, outcome: LoadOutcome) {
        self.index = OptionIndex::from_rows(&outcome.rows);
        self.rows = outcome.rows;
        self.load_error = outcome.error;
        self.loading = false;
    }

    pub fn update_selection(&mut self, change: Change) {
        self.selection = std::mem::take(&mut self.selection).apply(change);
    }

    /// Store the odometer text and update the selection from it. Invalid
    /// text leaves the reading unset.
    pub fn set_kms_text(&mut self, text: String) {
        let kms = match parse_kms_input(&text) {
            Ok(kms) => {
                self.kms_hint = None;
                kms
            }
            Err(e) => {
                self.kms_hint = Some(e.to_string());
                None
            }
        };
        self.kms_text = text;
        self.update_selection(Change::KmsDriven(kms));
    }

    pub fn models_for_selected_company(&self) -> &[String] {
        match &self.selection.company {
            Some(company) => self.index.models_for(company),
            None => &[],
        }
    }

    /// Validate the selection and, if it can be sent, mark a request as
    /// pending. A rejected selection resolves immediately as a failure.
    pub fn begin_prediction(&mut self, url: &str) -> Option<PredictionRequest> {
        match predict::prepare(&self.selection, &self.index, url) {
            Ok(request) => {
                self.outcome = Some(Outcome::Pending);
                self.in_flight += 1;
                Some(request)
            }
            Err(e) => {
                log::info!("Prediction not sent: {e}");
                self.outcome = Some(Outcome::from_result(Err(e.into())));
                None
            }
        }
    }

    /// Apply a response. Whatever resolves last is what the user sees.
    pub fn resolve_prediction(&mut self, result: Result<String, PredictError>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.outcome = Some(Outcome::from_result(result));
    }

    pub fn is_predicting(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::LOAD_FAILED_MESSAGE;
    use crate::error::TransportError;
    use crate::predict::{PRECONDITION_MESSAGE, TRANSPORT_MESSAGE};

    const URL: &str = "http://localhost:5000/predict";

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Swift".into(),
                company: "Maruti".into(),
                year: "2015".into(),
                kms_driven: "45000".into(),
                fuel_type: "Petrol".into(),
            },
            Row {
                name: "City".into(),
                company: "Honda".into(),
                year: "2018".into(),
                kms_driven: "12000".into(),
                fuel_type: "Diesel".into(),
            },
        ]
    }

    fn loaded() -> AppState {
        let mut state = AppState::new("public/Cleaned_Car_data.csv");
        assert!(state.begin_load());
        state.finish_load(LoadOutcome {
            rows: rows(),
            error: None,
        });
        state
    }

    fn select_all(state: &mut AppState) {
        state.update_selection(Change::Company(Some("Maruti".into())));
        state.update_selection(Change::Model(Some("Swift".into())));
        state.update_selection(Change::Year(Some(2015)));
        state.update_selection(Change::FuelType(Some("Petrol".into())));
        state.set_kms_text("45000".into());
    }

    #[test]
    fn load_replaces_rows_and_index_together() {
        let mut state = loaded();
        assert!(!state.loading);
        assert_eq!(state.rows().len(), 2);
        assert_eq!(state.index().companies, vec!["Honda", "Maruti"]);

        assert!(state.begin_load());
        assert!(!state.begin_load(), "second load while loading is ignored");
        state.finish_load(LoadOutcome {
            rows: rows()[..1].to_vec(),
            error: None,
        });
        assert_eq!(state.index().companies, vec!["Maruti"]);
        assert_eq!(state.index(), &OptionIndex::from_rows(state.rows()));
    }

    #[test]
    fn failed_load_leaves_usable_empty_state() {
        let mut state = loaded();
        assert!(state.begin_load());
        state.finish_load(LoadOutcome {
            rows: Vec::new(),
            error: Some(LOAD_FAILED_MESSAGE.into()),
        });

        assert!(!state.loading);
        assert_eq!(state.load_error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert!(state.index().is_empty());
        assert!(state.models_for_selected_company().is_empty());
        assert!(state.begin_prediction(URL).is_none());
    }

    #[test]
    fn model_list_follows_company() {
        let mut state = loaded();
        assert!(state.models_for_selected_company().is_empty());
        state.update_selection(Change::Company(Some("Honda".into())));
        assert_eq!(state.models_for_selected_company(), ["City"]);
    }

    #[test]
    fn kms_text_drives_selection() {
        let mut state = loaded();
        state.set_kms_text("45000".into());
        assert_eq!(state.selection.kms_driven, Some(45_000));
        assert_eq!(state.kms_hint, None);

        state.set_kms_text("-3".into());
        assert_eq!(state.selection.kms_driven, None);
        assert!(state.kms_hint.is_some());

        state.set_kms_text(String::new());
        assert_eq!(state.selection.kms_driven, None);
        assert_eq!(state.kms_hint, None);
    }

    #[test]
    fn incomplete_prediction_fails_without_request() {
        let mut state = loaded();
        state.outcome = Some(Outcome::Success("1".into()));
        assert!(state.begin_prediction(URL).is_none());
        assert_eq!(
            state.outcome,
            Some(Outcome::Failure(PRECONDITION_MESSAGE.into()))
        );
        assert!(!state.is_predicting());
    }

    #[test]
    fn prediction_lifecycle_clears_then_resolves() {
        let mut state = loaded();
        select_all(&mut state);
        state.outcome = Some(Outcome::Failure(TRANSPORT_MESSAGE.into()));

        let request = state.begin_prediction(URL).expect("complete selection");
        assert_eq!(request.url, URL);
        assert_eq!(state.outcome, Some(Outcome::Pending));
        assert!(state.is_predicting());

        state.resolve_prediction(Ok("412345.67".into()));
        assert_eq!(state.outcome, Some(Outcome::Success("412345.67".into())));
        assert!(!state.is_predicting());

        // Selection survives for resubmission.
        assert!(state.selection.is_complete());
    }

    #[test]
    fn last_resolved_response_wins() {
        let mut state = loaded();
        select_all(&mut state);
        state.begin_prediction(URL).expect("first");
        state.begin_prediction(URL).expect("second");
        assert_eq!(state.in_flight, 2);

        state.resolve_prediction(Ok("100".into()));
        assert_eq!(state.outcome, Some(Outcome::Success("100".into())));
        state.resolve_prediction(Err(TransportError::Status(500).into()));
        assert_eq!(
            state.outcome,
            Some(Outcome::Failure(TRANSPORT_MESSAGE.into()))
        );
        assert_eq!(state.in_flight, 0);
    }
}

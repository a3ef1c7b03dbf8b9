use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use eframe::egui;

use crate::data::loader::{self, LoadOutcome};
use crate::error::PredictError;
use crate::predict::{self, PredictionRequest, Transport};

// ---------------------------------------------------------------------------
// Background work
// ---------------------------------------------------------------------------

/// A finished background job, delivered back to the UI thread.
#[derive(Debug)]
pub enum TaskResult {
    Loaded(LoadOutcome),
    Predicted(Result<String, PredictError>),
}

/// Runs dataset loads and prediction requests off the UI thread.
///
/// Results come back through a channel that the app drains once per frame;
/// when a repaint context is attached, each result wakes the UI.
pub struct Tasks {
    tx: Sender<TaskResult>,
    rx: Receiver<TaskResult>,
    transport: Arc<dyn Transport>,
    repaint: Option<egui::Context>,
}

impl Tasks {
    pub fn new(transport: Arc<dyn Transport>, repaint: Option<egui::Context>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            transport,
            repaint,
        }
    }

    pub fn spawn_load(&self, source: String) -> std::io::Result<()> {
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        thread::Builder::new()
            .name("dataset-loader".into())
            .spawn(move || {
                let outcome = loader::load_dataset(&source);
                deliver(&tx, repaint.as_ref(), TaskResult::Loaded(outcome));
            })?;
        Ok(())
    }

    pub fn spawn_prediction(&self, request: PredictionRequest) -> std::io::Result<()> {
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let transport = Arc::clone(&self.transport);
        thread::Builder::new()
            .name("prediction".into())
            .spawn(move || {
                let result = predict::send(transport.as_ref(), &request);
                deliver(&tx, repaint.as_ref(), TaskResult::Predicted(result));
            })?;
        Ok(())
    }

    /// Results that have arrived since the last call, in arrival order.
    pub fn drain(&self) -> Vec<TaskResult> {
        self.rx.try_iter().collect()
    }
}

fn deliver(tx: &Sender<TaskResult>, repaint: Option<&egui::Context>, result: TaskResult) {
    // The receiver only goes away when the app is shutting down.
    if tx.send(result).is_err() {
        log::debug!("Dropping background result; UI has closed");
        return;
    }
    if let Some(ctx) = repaint {
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    use crate::error::TransportError;

    struct Echo;

    impl Transport for Echo {
        fn post_form(&self, _url: &str, body: &str) -> Result<String, TransportError> {
            if body.contains("fail") {
                Err(TransportError::Status(503))
            } else {
                Ok("250000".into())
            }
        }
    }

    fn wait_for(tasks: &Tasks, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(tasks.drain());
            thread::sleep(Duration::from_millis(10));
        }
        results
    }

    fn request(body: &str) -> PredictionRequest {
        PredictionRequest {
            url: "http://localhost:5000/predict".into(),
            body: body.into(),
        }
    }

    #[test]
    fn prediction_results_arrive_through_channel() {
        let tasks = Tasks::new(Arc::new(Echo), None);
        tasks.spawn_prediction(request("company=Maruti")).expect("spawn");

        let results = wait_for(&tasks, 1);
        assert!(matches!(
            results.as_slice(),
            [TaskResult::Predicted(Ok(price))] if price == "250000"
        ));
    }

    #[test]
    fn failed_prediction_is_delivered_as_error() {
        let tasks = Tasks::new(Arc::new(Echo), None);
        tasks.spawn_prediction(request("fail")).expect("spawn");

        let results = wait_for(&tasks, 1);
        assert!(matches!(
            results.as_slice(),
            [TaskResult::Predicted(Err(PredictError::Transport(TransportError::Status(503))))]
        ));
    }

    #[test]
    fn load_results_arrive_through_channel() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "name,company,year,kms_driven,fuel_type").expect("header");
        writeln!(file, "Swift,Maruti,2015,45000,Petrol").expect("row");

        let tasks = Tasks::new(Arc::new(Echo), None);
        tasks
            .spawn_load(file.path().to_string_lossy().into_owned())
            .expect("spawn");

        let results = wait_for(&tasks, 1);
        match results.as_slice() {
            [TaskResult::Loaded(outcome)] => {
                assert_eq!(outcome.rows.len(), 1);
                assert_eq!(outcome.error, None);
            }
            other => panic!("unexpected results: {other:?}"),
        }
    }
}

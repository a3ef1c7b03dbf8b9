use std::sync::Arc;

use eframe::egui;

use crate::config::Config;
use crate::data::loader::{LoadOutcome, LOAD_FAILED_MESSAGE};
use crate::error::TransportError;
use crate::predict::UreqTransport;
use crate::state::AppState;
use crate::tasks::{TaskResult, Tasks};
use crate::ui::panels::{self, UiAction};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CarPriceApp {
    pub state: AppState,
    config: Config,
    tasks: Tasks,
}

impl CarPriceApp {
    /// Build the app and kick off the initial dataset load.
    pub fn new(config: Config, ctx: &egui::Context) -> Self {
        let transport = Arc::new(UreqTransport::new(config.timeout()));
        let tasks = Tasks::new(transport, Some(ctx.clone()));
        let mut app = Self {
            state: AppState::new(config.dataset.clone()),
            config,
            tasks,
        };
        app.start_load();
        app
    }

    fn start_load(&mut self) {
        if !self.state.begin_load() {
            return;
        }
        if let Err(e) = self.tasks.spawn_load(self.state.dataset_source.clone()) {
            log::error!("Could not start dataset loader: {e}");
            self.state.finish_load(LoadOutcome {
                rows: Vec::new(),
                error: Some(LOAD_FAILED_MESSAGE.to_string()),
            });
        }
    }

    fn start_prediction(&mut self) {
        let url = self.config.predict_url();
        let Some(request) = self.state.begin_prediction(&url) else {
            return;
        };
        if let Err(e) = self.tasks.spawn_prediction(request) {
            log::error!("Could not start prediction request: {e}");
            let error = TransportError::Network(e.to_string());
            self.state.resolve_prediction(Err(error.into()));
        }
    }

    fn apply_results(&mut self) {
        for result in self.tasks.drain() {
            match result {
                TaskResult::Loaded(outcome) => self.state.finish_load(outcome),
                TaskResult::Predicted(result) => self.state.resolve_prediction(result),
            }
        }
    }

    fn handle(&mut self, action: UiAction) {
        match action {
            UiAction::Reload => self.start_load(),
            UiAction::OpenDataset(path) => {
                if !self.state.loading {
                    self.state.dataset_source = path;
                    self.start_load();
                }
            }
            UiAction::Predict => self.start_prediction(),
        }
    }
}

impl eframe::App for CarPriceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_results();

        let mut actions = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state, &mut actions);
        });

        // ---- Central panel: selection form ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::prediction_form(
                ui,
                &mut self.state,
                &self.config.currency_symbol,
                &mut actions,
            );
        });

        for action in actions {
            self.handle(action);
        }
    }
}

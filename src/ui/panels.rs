use eframe::egui::{self, Color32, RichText, Ui};

use crate::predict::{display_price, Outcome};
use crate::selection::Change;
use crate::state::AppState;

/// What the user asked for this frame; the app turns these into tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Reload,
    OpenDataset(String),
    Predict,
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, actions: &mut Vec<UiAction>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(!state.loading, egui::Button::new("Open dataset…"))
                .clicked()
            {
                if let Some(path) = open_file_dialog() {
                    actions.push(UiAction::OpenDataset(path));
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(!state.loading, egui::Button::new("Reload dataset"))
                .clicked()
            {
                actions.push(UiAction::Reload);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Loading dataset...");
        } else if state.load_error.is_none() && state.index().is_empty() {
            ui.label("Dataset has no usable rows");
        } else {
            ui.label(format!("{} rows loaded", state.rows().len()));
        }

        if let Some(msg) = &state.load_error {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central form
// ---------------------------------------------------------------------------

/// Render the selection form and the prediction result.
pub fn prediction_form(
    ui: &mut Ui,
    state: &mut AppState,
    currency_symbol: &str,
    actions: &mut Vec<UiAction>,
) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Car Price Predictor");
    });
    ui.add_space(8.0);

    let enabled = !state.loading;
    let index = state.index().clone();
    let models = state.models_for_selected_company().to_vec();
    let years: Vec<String> = index.years.iter().map(i32::to_string).collect();

    egui::Grid::new("selection_form")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Company");
            let current = state.selection.company.clone();
            if let Some(choice) = combo(
                ui,
                "company",
                "Select company",
                current,
                &index.companies,
                enabled,
            ) {
                state.update_selection(Change::Company(choice));
            }
            ui.end_row();

            ui.label("Model");
            let current = state.selection.model.clone();
            let has_company = state.selection.company.is_some();
            if let Some(choice) = combo(
                ui,
                "model",
                "Select model",
                current,
                &models,
                enabled && has_company,
            ) {
                state.update_selection(Change::Model(choice));
            }
            ui.end_row();

            ui.label("Year");
            let current = state.selection.year.map(|y| y.to_string());
            if let Some(choice) = combo(ui, "year", "Select year", current, &years, enabled) {
                let year = choice.and_then(|y| y.parse().ok());
                state.update_selection(Change::Year(year));
            }
            ui.end_row();

            ui.label("Fuel Type");
            let current = state.selection.fuel_type.clone();
            if let Some(choice) = combo(
                ui,
                "fuel_type",
                "Select fuel",
                current,
                &index.fuel_types,
                enabled,
            ) {
                state.update_selection(Change::FuelType(choice));
            }
            ui.end_row();

            ui.label("Kms Driven");
            let mut text = state.kms_text.clone();
            let response = ui.add(egui::TextEdit::singleline(&mut text).hint_text("e.g. 45000"));
            if response.changed() {
                state.set_kms_text(text);
            }
            ui.end_row();
        });

    if let Some(hint) = &state.kms_hint {
        ui.label(RichText::new(hint).color(Color32::YELLOW).small());
    }

    ui.add_space(8.0);
    let hover = if state.selection.is_complete() {
        "Request a price for this vehicle"
    } else {
        "Choose every field, then request a price"
    };
    let predict = ui
        .add_enabled(enabled, egui::Button::new("Predict"))
        .on_hover_text(hover);
    if predict.clicked() {
        actions.push(UiAction::Predict);
    }
    ui.add_space(8.0);

    outcome_panel(ui, state.outcome.as_ref(), currency_symbol);
}

/// A combo box with a leading "unset" entry.
///
/// Returns `Some(new_value)` when the user picked something different from
/// `current`; the inner `None` means the placeholder was chosen.
fn combo(
    ui: &mut Ui,
    id: &str,
    placeholder: &str,
    current: Option<String>,
    options: &[String],
    enabled: bool,
) -> Option<Option<String>> {
    let mut picked = current.clone();
    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        egui::ComboBox::from_id_salt(id)
            .width(240.0)
            .selected_text(picked.clone().unwrap_or_else(|| placeholder.to_string()))
            .show_ui(ui, |ui: &mut Ui| {
                ui.selectable_value(&mut picked, None, placeholder);
                for option in options {
                    ui.selectable_value(&mut picked, Some(option.clone()), option);
                }
            });
    });
    (picked != current).then_some(picked)
}

fn outcome_panel(ui: &mut Ui, outcome: Option<&Outcome>, currency_symbol: &str) {
    match outcome {
        None => {}
        Some(Outcome::Pending) => {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label("Predicting...");
            });
        }
        Some(Outcome::Success(price)) => {
            ui.group(|ui: &mut Ui| {
                ui.heading("Predicted Price");
                ui.label(
                    RichText::new(display_price(currency_symbol, price))
                        .size(24.0)
                        .color(Color32::LIGHT_GREEN),
                );
            });
        }
        Some(Outcome::Failure(message)) => {
            ui.group(|ui: &mut Ui| {
                ui.label(RichText::new(message).color(Color32::RED));
            });
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<String> {
    rfd::FileDialog::new()
        .set_title("Open vehicle dataset")
        .add_filter("CSV", &["csv"])
        .pick_file()
        .map(|path| path.to_string_lossy().into_owned())
}

use car_price_predictor::app::CarPriceApp;
use car_price_predictor::config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load();
    log::info!(
        "Dataset: {}, prediction endpoint: {}",
        config.dataset,
        config.predict_url()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 560.0])
            .with_min_inner_size([420.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Car Price Predictor",
        options,
        Box::new(|cc| Ok(Box::new(CarPriceApp::new(config, &cc.egui_ctx)))),
    )
}

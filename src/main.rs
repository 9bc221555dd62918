use anyhow::Context;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use vehicle_price::application::ml::smartcore_predictor::SmartCorePricePredictor;
use vehicle_price::application::session::PredictionSession;
use vehicle_price::config::Config;
use vehicle_price::interfaces::ui::PredictorApp;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();
    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    let config = Config::from_env().context("Failed to load config")?;
    info!("Loading model from {:?}", config.model_path);

    // No degraded mode: the window never opens without a model
    let predictor = SmartCorePricePredictor::load(&config.model_path)
        .context("Failed to load vehicle price model")?;

    let session = PredictionSession::new(config.reference_year);
    let app = PredictorApp::new(Box::new(predictor), session, config.export_dir, log_rx);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 860.0])
            .with_title("Vehicle Price Prediction"),
        ..Default::default()
    };

    eframe::run_native(
        "Vehicle Price Prediction",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    Ok(())
}

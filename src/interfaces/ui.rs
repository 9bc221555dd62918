use crate::application::ml::predictor::PricePredictor;
use crate::application::session::{ActionOutcome, PredictionSession, SessionAction};
use crate::domain::vehicle::VehicleSpec;
use crate::infrastructure::csv_export::{EXPORT_MIME_TYPE, write_export};
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::{render_status_pill, render_value_card};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::history_panel::{HistoryCommand, render_history};
use crate::interfaces::vehicle_form::render_vehicle_form;
use crossbeam_channel::Receiver;
use eframe::egui;
use std::path::PathBuf;
use tracing::error;

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Price { formatted: String, caption: String },
    Info(String),
    Error(String),
}

/// Window state: the form being edited, the session and the latest status.
pub struct PredictorApp {
    predictor: Box<dyn PricePredictor>,
    session: PredictionSession,
    form: VehicleSpec,
    status: Option<Status>,
    export_dir: PathBuf,
    log_rx: Receiver<String>,
    log_lines: Vec<String>,
}

impl PredictorApp {
    pub fn new(
        predictor: Box<dyn PricePredictor>,
        session: PredictionSession,
        export_dir: PathBuf,
        log_rx: Receiver<String>,
    ) -> Self {
        Self {
            predictor,
            session,
            form: VehicleSpec::default(),
            status: None,
            export_dir,
            log_rx,
            log_lines: Vec::new(),
        }
    }

    fn drain_logs(&mut self) {
        self.log_lines.extend(self.log_rx.try_iter());
        if self.log_lines.len() > MAX_LOG_LINES {
            let excess = self.log_lines.len() - MAX_LOG_LINES;
            self.log_lines.drain(..excess);
        }
    }

    fn dispatch(&mut self, action: SessionAction) {
        let outcome = self.session.handle(self.predictor.as_ref(), action);
        self.status = Some(match outcome {
            ActionOutcome::Predicted(prediction) => Status::Price {
                formatted: prediction.formatted(),
                caption: format!(
                    "{} {} ({})",
                    prediction.entry.make, prediction.entry.model, prediction.entry.year
                ),
            },
            ActionOutcome::Failed(e) => Status::Error(e.to_string()),
            ActionOutcome::Cleared { .. } => Status::Info("Previous predictions cleared!".to_string()),
            ActionOutcome::Exported(bytes) => match write_export(&self.export_dir, &bytes) {
                Ok(path) => {
                    Status::Info(format!("Saved {} ({})", path.display(), EXPORT_MIME_TYPE))
                }
                Err(e) => {
                    error!("Export failed: {:#}", e);
                    Status::Error(format!("Export failed: {:#}", e))
                }
            },
            ActionOutcome::ExportFailed(reason) => Status::Error(format!("Export failed: {}", reason)),
        });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        match &self.status {
            Some(Status::Price { formatted, caption }) => render_value_card(
                ui,
                "💰 Estimated Vehicle Price",
                formatted,
                DesignSystem::SUCCESS,
                Some(caption),
            ),
            Some(Status::Info(msg)) => {
                ui.colored_label(DesignSystem::TEXT_SECONDARY, msg);
            }
            Some(Status::Error(msg)) => {
                Card::new().title("Error").highlight(DesignSystem::DANGER).show(ui, |ui| {
                    ui.colored_label(DesignSystem::DANGER, msg);
                });
            }
            None => {}
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());
        self.drain_logs();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("🚗 Vehicle Price Prediction");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_status_pill(ui, &self.predictor.describe(), DesignSystem::ACCENT_PRIMARY);
                });
            });
        });

        egui::TopBottomPanel::bottom("log_panel")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Activity").strong());
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for line in &self.log_lines {
                            let color = if line.contains("ERROR") {
                                DesignSystem::DANGER
                            } else if line.contains("WARN") {
                                DesignSystem::WARNING
                            } else {
                                DesignSystem::TEXT_MUTED
                            };
                            ui.label(egui::RichText::new(line.trim_end()).monospace().color(color));
                        }
                    });
            });

        let mut pending: Option<SessionAction> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.label("Enter vehicle details below to predict its price.");
                ui.add_space(DesignSystem::SPACING_SMALL);

                Card::new().title("Vehicle").show(ui, |ui| {
                    if render_vehicle_form(ui, &mut self.form) {
                        pending = Some(SessionAction::Submit(self.form.clone()));
                    }
                });

                ui.add_space(DesignSystem::SPACING_MEDIUM);
                self.render_status(ui);
                ui.add_space(DesignSystem::SPACING_MEDIUM);

                Card::new().title("📋 Previous Predictions").show(ui, |ui| {
                    match render_history(ui, self.session.history().entries()) {
                        Some(HistoryCommand::Export) => pending = Some(SessionAction::ExportCsv),
                        Some(HistoryCommand::Clear) => pending = Some(SessionAction::ClearHistory),
                        None => {}
                    }
                });
            });
        });

        if let Some(action) = pending {
            self.dispatch(action);
        }
    }
}

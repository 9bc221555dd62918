use crate::application::session::format_currency;
use crate::domain::history::{HISTORY_COLUMNS, HistoryEntry};
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommand {
    Export,
    Clear,
}

/// Table of all predictions this session plus the export and clear buttons.
pub fn render_history(ui: &mut egui::Ui, entries: &[HistoryEntry]) -> Option<HistoryCommand> {
    if entries.is_empty() {
        ui.label(
            egui::RichText::new("No predictions yet.")
                .italics()
                .color(DesignSystem::TEXT_MUTED),
        );
        return None;
    }

    render_price_trend(ui, entries);
    ui.add_space(DesignSystem::SPACING_SMALL);

    egui::ScrollArea::both()
        .id_salt("history_scroll")
        .max_height(240.0)
        .show(ui, |ui| {
            egui::Grid::new("history_grid")
                .striped(true)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.strong("#");
                    for column in HISTORY_COLUMNS {
                        ui.strong(*column);
                    }
                    ui.end_row();

                    for (i, e) in entries.iter().enumerate() {
                        ui.label((i + 1).to_string());
                        ui.label(&e.make);
                        ui.label(&e.model);
                        ui.label(e.year.to_string());
                        ui.label(e.age.to_string());
                        ui.label(e.mileage.to_string());
                        ui.label(e.cylinders.to_string());
                        ui.label(e.fuel.to_string());
                        ui.label(e.transmission.to_string());
                        ui.label(e.body.to_string());
                        ui.label(e.doors.to_string());
                        ui.label(e.drivetrain.to_string());
                        ui.colored_label(DesignSystem::SUCCESS, format_currency(e.predicted_price));
                        ui.end_row();
                    }
                });
        });

    ui.add_space(DesignSystem::SPACING_SMALL);

    let mut command = None;
    ui.horizontal(|ui| {
        if ui.button("⬇ Download Predictions as CSV").clicked() {
            command = Some(HistoryCommand::Export);
        }
        if ui.button("🧹 Clear History").clicked() {
            command = Some(HistoryCommand::Clear);
        }
    });
    command
}

fn render_price_trend(ui: &mut egui::Ui, entries: &[HistoryEntry]) {
    if entries.len() < 2 {
        return;
    }

    let points: Vec<[f64; 2]> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| [(i + 1) as f64, e.predicted_price])
        .collect();

    let line = egui_plot::Line::new("Predicted price", egui_plot::PlotPoints::from(points))
        .color(DesignSystem::ACCENT_PRIMARY)
        .width(2.0);

    egui_plot::Plot::new("price_trend_plot")
        .height(140.0)
        .show_grid([false, true])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

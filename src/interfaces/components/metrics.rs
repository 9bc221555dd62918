use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Large headline value with an optional caption, e.g. the estimated price
pub fn render_value_card(
    ui: &mut egui::Ui,
    title: &str,
    value: &str,
    value_color: egui::Color32,
    caption: Option<&str>,
) {
    Card::new().title(title).highlight(value_color).show(ui, |ui| {
        ui.label(
            egui::RichText::new(value)
                .size(28.0)
                .strong()
                .color(value_color),
        );

        if let Some(text) = caption {
            ui.label(
                egui::RichText::new(text)
                    .size(11.0)
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}

/// Small rounded label, used for model metadata in the header
pub fn render_status_pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(12)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(12.0).strong().color(color));
        });
}

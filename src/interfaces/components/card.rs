use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Titled container used for the form, result and history sections
#[derive(Default)]
pub struct Card {
    title: Option<String>,
    highlight: Option<egui::Color32>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Draws the border in `color` instead of the subtle default.
    pub fn highlight(mut self, color: egui::Color32) -> Self {
        self.highlight = Some(color);
        self
    }

    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        let mut frame = DesignSystem::card_frame();
        if let Some(color) = self.highlight {
            frame = frame.stroke(egui::Stroke::new(1.5, color));
        }

        frame.show(ui, |ui| {
            ui.set_width(ui.available_width());

            if let Some(title) = self.title {
                ui.label(
                    egui::RichText::new(title)
                        .size(13.0)
                        .color(DesignSystem::TEXT_SECONDARY)
                        .strong(),
                );
                ui.add_space(DesignSystem::SPACING_SMALL);
            }

            add_contents(ui)
        })
    }
}

//! Input form. Widgets are clamped to the record bounds so out-of-range
//! values never reach the model.

use crate::domain::vehicle::record::{CYLINDERS_RANGE, DOOR_OPTIONS, MILEAGE_RANGE, YEAR_RANGE};
use crate::domain::vehicle::{Choice, VehicleSpec};
use eframe::egui;

/// Renders every field of `spec`; returns true when Predict was clicked.
pub fn render_vehicle_form(ui: &mut egui::Ui, spec: &mut VehicleSpec) -> bool {
    egui::Grid::new("vehicle_form_grid")
        .num_columns(2)
        .spacing([24.0, 10.0])
        .show(ui, |ui| {
            ui.label("Make");
            ui.add(
                egui::TextEdit::singleline(&mut spec.make)
                    .hint_text("e.g., Toyota, Ford, BMW"),
            );
            ui.end_row();

            ui.label("Model");
            ui.add(
                egui::TextEdit::singleline(&mut spec.model)
                    .hint_text("e.g., Camry, F-150, X5"),
            );
            ui.end_row();

            ui.label("Year");
            ui.add(egui::DragValue::new(&mut spec.year).range(YEAR_RANGE));
            ui.end_row();

            ui.label("Mileage (in miles)");
            ui.add(
                egui::DragValue::new(&mut spec.mileage)
                    .range(MILEAGE_RANGE)
                    .speed(100.0),
            );
            ui.end_row();

            ui.label("Cylinders");
            ui.add(egui::DragValue::new(&mut spec.cylinders).range(CYLINDERS_RANGE));
            ui.end_row();

            choice_row(ui, "Fuel Type", &mut spec.fuel);
            choice_row(ui, "Transmission", &mut spec.transmission);
            choice_row(ui, "Body Type", &mut spec.body);

            ui.label("Doors");
            egui::ComboBox::from_id_salt("doors_combo")
                .selected_text(spec.doors.to_string())
                .show_ui(ui, |ui| {
                    for &doors in DOOR_OPTIONS {
                        ui.selectable_value(&mut spec.doors, doors, doors.to_string());
                    }
                });
            ui.end_row();

            choice_row(ui, "Drivetrain", &mut spec.drivetrain);
        });

    ui.add_space(12.0);
    ui.button("🔮 Predict Price").clicked()
}

fn choice_row<T: Choice>(ui: &mut egui::Ui, label: &str, value: &mut T) {
    ui.label(label);
    egui::ComboBox::from_id_salt(T::FIELD)
        .selected_text(value.label())
        .show_ui(ui, |ui| {
            for option in T::ALL {
                ui.selectable_value(value, *option, option.label());
            }
        });
    ui.end_row();
}

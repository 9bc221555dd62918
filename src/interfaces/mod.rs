pub mod components;
pub mod design_system;
pub mod history_panel;
pub mod ui;
pub mod vehicle_form;

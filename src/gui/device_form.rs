//! Device Form Panel
//! Left side panel: searchable dropdowns, implant flag and the submit button.

use crate::data::{ReferenceField, ReferenceLoader};
use crate::form::{DeviceForm, FormState};
use crate::gui::SearchableSelect;
use crate::prediction::Implanted;
use egui::{Color32, RichText};

/// Left side panel with the device inputs and service actions.
pub struct DeviceFormPanel {
    device_select: SearchableSelect,
    manufacturer_select: SearchableSelect,
    classification_select: SearchableSelect,
    id_select: SearchableSelect,
    country_select: SearchableSelect,
    code_select: SearchableSelect,
}

impl Default for DeviceFormPanel {
    fn default() -> Self {
        Self {
            device_select: SearchableSelect::new("device_name", "Device Name"),
            manufacturer_select: SearchableSelect::new("manufacturer_name", "Manufacturer Name"),
            classification_select: SearchableSelect::new("classification", "Classification"),
            id_select: SearchableSelect::new("device_id", "ID"),
            country_select: SearchableSelect::new("country", "Country"),
            code_select: SearchableSelect::new("code", "Code"),
        }
    }
}

impl DeviceFormPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the form and every search box.
    pub fn reset(&mut self, form: &mut DeviceForm) {
        form.state = FormState::default();
        for select in [
            &mut self.device_select,
            &mut self.manufacturer_select,
            &mut self.classification_select,
            &mut self.id_select,
            &mut self.country_select,
            &mut self.code_select,
        ] {
            select.set_query("");
            select.close();
        }
    }

    /// Draw the form
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        form: &mut DeviceForm,
        loader: &ReferenceLoader,
        history_len: usize,
    ) -> DeviceFormAction {
        let mut action = DeviceFormAction::None;
        let mut reset = false;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🩺 Device Information")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        if let Some(value) = self.device_select.show(
            ui,
            loader.options(ReferenceField::DeviceName),
            &form.state.device_name,
        ) {
            form.state.device_name = value;
        }
        ui.add_space(8.0);

        if let Some(value) = self.manufacturer_select.show(
            ui,
            loader.options(ReferenceField::Manufacturer),
            &form.state.manufacturer_name,
        ) {
            form.state.manufacturer_name = value;
        }
        ui.add_space(8.0);

        if let Some(value) = self.classification_select.show(
            ui,
            loader.options(ReferenceField::Classification),
            &form.state.classification,
        ) {
            form.state.classification = value;
        }
        ui.add_space(8.0);

        ui.collapsing(RichText::new("Additional details").size(13.0), |ui| {
            let details = &mut form.state.details;
            if let Some(value) =
                self.id_select
                    .show(ui, loader.options(ReferenceField::DeviceId), &details.device_id)
            {
                details.device_id = value;
            }
            ui.add_space(6.0);
            if let Some(value) =
                self.country_select
                    .show(ui, loader.options(ReferenceField::Country), &details.country)
            {
                details.country = value;
            }
            ui.add_space(6.0);
            if let Some(value) =
                self.code_select
                    .show(ui, loader.options(ReferenceField::Code), &details.code)
            {
                details.code = value;
            }
        });
        ui.add_space(8.0);

        ui.label(RichText::new("Implanted").size(13.0).strong());
        ui.horizontal(|ui| {
            for implanted in Implanted::ALL {
                ui.radio_value(&mut form.state.implanted, implanted, implanted.label());
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new(form.button_label()).size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add_enabled(form.can_submit(), button).clicked() {
                action = DeviceFormAction::Submit;
            }

            ui.add_space(5.0);
            let hint = if loader.is_loaded() {
                "All dropdowns are searchable."
            } else {
                "Loading options…"
            };
            ui.label(RichText::new(hint).size(11.0).color(Color32::GRAY));

            ui.add_space(15.0);
            ui.horizontal(|ui| {
                if ui.button("🔌 Check service").clicked() {
                    action = DeviceFormAction::CheckHealth;
                }
                let export = ui.add_enabled(history_len > 0, egui::Button::new("📄 Export history…"));
                if export.clicked() {
                    action = DeviceFormAction::ExportHistory;
                }
            });
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!form.is_submitting(), egui::Button::new("↺ Reset form"))
                    .clicked()
                {
                    reset = true;
                }
                let clear = ui.add_enabled(history_len > 0, egui::Button::new("🗑 Clear history"));
                if clear.clicked() {
                    action = DeviceFormAction::ClearHistory;
                }
            });
        });

        if reset {
            self.reset(form);
        }
        action
    }
}

/// Actions triggered by the device form
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceFormAction {
    None,
    Submit,
    CheckHealth,
    ExportHistory,
    ClearHistory,
}

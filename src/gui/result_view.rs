//! Result View Widget
//! Central panel: latest prediction or error, recommended actions and the
//! session history.

use crate::form::{DeviceForm, SubmissionPhase};
use crate::history::{HistorySummary, PredictionHistory};
use crate::prediction::{PredictionResponse, SeverityClass};
use egui::{Color32, RichText, ScrollArea};

const FAQS: [(&str, &str); 4] = [
    (
        "What is recall?",
        "A correction or removal action taken by a manufacturer to address a problem with a medical device. \
         Recalls occur when a medical device is defective, when it could be a risk to health, or when it is both. \
         A recall does not always mean that a patient must stop using the product or return it to the company; \
         sometimes the device needs to be checked, adjusted, or fixed.",
    ),
    (
        "What are recall classes?",
        "Class I: a reasonable chance that a product will cause serious health problems or death. \
         Class II: a product may cause a temporary or reversible health problem, or there is a slight chance of \
         serious health problems or death. Class III: a product is not likely to cause any health problem or injury.",
    ),
    (
        "What is a safety alert?",
        "Alerts provide important information and recommendations about products. An alert does not necessarily \
         mean a product is unsafe. Safety alerts are addressed to health workers and users and may include recalls.",
    ),
    (
        "What is a Field Safety Notice?",
        "A communication sent by a device manufacturer or its representative about actions taken on a product \
         already on the market. Mainly for health workers, but also for users. It can include recalls and alerts.",
    ),
];

/// Stateless renderer for the central panel.
pub struct ResultView;

impl ResultView {
    pub fn show(ui: &mut egui::Ui, form: &DeviceForm, history: &PredictionHistory) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if let Some(prediction) = form.prediction() {
                    Self::draw_prediction(ui, prediction);
                } else if let Some(error) = form.error() {
                    Self::card(ui, Color32::from_rgb(220, 53, 69), |ui| {
                        ui.label(
                            RichText::new(format!("Error: {error}"))
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    });
                } else if let SubmissionPhase::Submitting { ticket } = form.phase() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Waiting for the prediction service (request #{ticket})…"));
                    });
                } else {
                    ui.label(
                        RichText::new("Pick a device, manufacturer and classification to predict recall severity.")
                            .color(Color32::GRAY),
                    );
                }

                ui.add_space(15.0);
                Self::draw_history(ui, history);

                ui.add_space(15.0);
                ui.collapsing(RichText::new("FAQs").size(14.0).strong(), |ui| {
                    for (question, answer) in FAQS {
                        ui.label(RichText::new(question).strong());
                        ui.label(RichText::new(answer).size(12.0));
                        ui.add_space(6.0);
                    }
                });
            });
    }

    fn card(ui: &mut egui::Ui, color: Color32, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                add_contents(ui);
            });
    }

    fn draw_prediction(ui: &mut egui::Ui, prediction: &PredictionResponse) {
        let accent = Color32::from_rgb(100, 149, 237);
        Self::card(ui, accent, |ui| {
            ui.label(RichText::new("Prediction Result").size(18.0).strong().color(accent));
            ui.add_space(6.0);
            ui.label(RichText::new(format!("Severity Class: {}", prediction.prediction)).size(15.0));
            if let Some(confidence) = prediction.confidence {
                ui.label(format!("Confidence: {:.1}%", confidence * 100.0));
            }
            if let Some(method) = &prediction.method {
                ui.label(RichText::new(format!("Method: {method}")).color(Color32::GRAY));
            }
            for (key, value) in &prediction.extra {
                let value = match value {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                ui.label(
                    RichText::new(format!("{key}: {value}"))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            }
        });

        ui.add_space(10.0);

        match prediction.severity() {
            Some(severity) => Self::draw_recommendation(ui, severity),
            None => {
                ui.label(
                    RichText::new(format!(
                        "No recommended actions are defined for class \"{}\".",
                        prediction.prediction
                    ))
                    .italics()
                    .color(Color32::GRAY),
                );
            }
        }
    }

    fn draw_recommendation(ui: &mut egui::Ui, severity: SeverityClass) {
        let recommendation = severity.recommendation();
        Self::card(ui, Color32::from_rgb(245, 158, 11), |ui| {
            ui.label(RichText::new("Recommended Actions").size(16.0).strong());
            ui.add_space(4.0);
            ui.label(
                RichText::new(recommendation.headline)
                    .strong()
                    .color(severity.color()),
            );
            ui.add_space(4.0);
            for action in recommendation.actions {
                ui.label(format!("• {action}"));
            }
        });
    }

    fn draw_summary(ui: &mut egui::Ui, summary: &HistorySummary) {
        let classes = summary
            .class_counts
            .iter()
            .map(|(class, count)| format!("class {class}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        let methods = summary
            .method_counts
            .iter()
            .map(|(method, count)| format!("{method}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");

        ui.label(RichText::new(format!("Classes: {classes}")).size(12.0));
        ui.label(RichText::new(format!("Methods: {methods}")).size(12.0));
        if let Some(average) = summary.average_confidence {
            let recent = summary
                .recent_average_confidence
                .map(|r| format!(", last {}: {:.1}%", summary.recent_count, r * 100.0))
                .unwrap_or_default();
            ui.label(
                RichText::new(format!("Average confidence: {:.1}%{recent}", average * 100.0))
                    .size(12.0),
            );
        }
    }

    fn draw_history(ui: &mut egui::Ui, history: &PredictionHistory) {
        ui.label(
            RichText::new(format!("🕘 Session History ({})", history.len()))
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);
        if history.is_empty() {
            ui.label(RichText::new("No predictions yet").size(12.0).color(Color32::GRAY));
            return;
        }

        Self::draw_summary(ui, &history.summary());
        ui.add_space(8.0);

        egui::Grid::new("prediction_history")
            .striped(true)
            .num_columns(5)
            .show(ui, |ui| {
                for header in ["Time", "Device", "Manufacturer", "Implanted", "Class"] {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                for record in history.newest_first() {
                    ui.label(&record.timestamp);
                    ui.label(&record.name);
                    ui.label(&record.name_manufacturer);
                    ui.label(&record.implanted);
                    let class = SeverityClass::from_prediction(&record.prediction)
                        .map(|s| s.color())
                        .unwrap_or(Color32::GRAY);
                    ui.label(RichText::new(&record.prediction).strong().color(class));
                    ui.end_row();
                }
            });
    }
}

//! Device Risk Main Application
//! Main window with the device form and the prediction results.

use crate::data::{ReferenceIndex, ReferenceLoader};
use crate::form::{DeviceDetails, DeviceForm, Ticket};
use crate::gui::{DeviceFormAction, DeviceFormPanel, ResultView};
use crate::history::{PredictionHistory, PredictionRecord};
use crate::prediction::{
    PredictionClient, PredictionOutcome, PredictionRequest, PredictionService,
};
use crate::settings::Settings;
use egui::{Color32, RichText, SidePanel};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete(ReferenceIndex),
    Error(String),
}

/// Prediction service result from background thread
enum ServiceResult {
    Prediction {
        ticket: Ticket,
        request: PredictionRequest,
        details: DeviceDetails,
        outcome: PredictionOutcome,
    },
    Health(Result<String, String>),
}

/// Main application window.
pub struct DeviceRiskApp {
    loader: ReferenceLoader,
    form: DeviceForm,
    form_panel: DeviceFormPanel,
    history: PredictionHistory,

    // Either a ready client or the reason it could not be built
    service: Result<Arc<dyn PredictionService>, String>,
    service_tx: Sender<ServiceResult>,
    service_rx: Receiver<ServiceResult>,
    is_checking_health: bool,

    // One-time CSV load
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    status: String,
}

impl DeviceRiskApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        cc.egui_ctx.set_visuals(if settings.general.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let service = PredictionClient::new(&settings.service.endpoint, settings.service.timeout())
            .map(|client| {
                info!("Prediction service endpoint: {}", client.endpoint());
                Arc::new(client) as Arc<dyn PredictionService>
            })
            .map_err(|e| {
                error!("Prediction service unavailable: {}", e);
                e.to_string()
            });

        let mut app = Self::with_service(settings, service);
        app.start_loading();
        app
    }

    /// Build the app around any service; loading is not started.
    fn with_service(
        settings: Settings,
        service: Result<Arc<dyn PredictionService>, String>,
    ) -> Self {
        let (service_tx, service_rx) = channel();
        Self {
            loader: ReferenceLoader::new(settings.data.reference_csv),
            form: DeviceForm::new(),
            form_panel: DeviceFormPanel::new(),
            history: PredictionHistory::new(),
            service,
            service_tx,
            service_rx,
            is_checking_health: false,
            load_rx: None,
            is_loading: false,
            status: "Ready".to_string(),
        }
    }

    /// Read the reference CSV in a background thread, once per run.
    fn start_loading(&mut self) {
        if self.is_loading || self.loader.is_loaded() {
            return;
        }

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.status = "Loading reference data...".to_string();

        let path = self.loader.file_path().to_path_buf();
        thread::spawn(move || {
            let result = match ReferenceLoader::load_csv(&path) {
                Ok(index) => LoadResult::Complete(index),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(index)) => {
                self.status = format!("Loaded {} reference rows", index.row_count());
                self.loader.set_index(index);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(e)) => {
                // The form stays usable with empty dropdowns
                error!("Failed to load CSV: {}", e);
                self.loader.set_index(ReferenceIndex::default());
                self.status = "Reference data unavailable".to_string();
                self.is_loading = false;
            }
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                error!("CSV loader thread exited without a result");
                self.loader.set_index(ReferenceIndex::default());
                self.status = "Reference data unavailable".to_string();
                self.is_loading = false;
            }
        }
    }

    fn handle_submit(&mut self) {
        let Some(submission) = self.form.begin_submission() else {
            return;
        };
        info!(
            "Submitting prediction request #{}: {:?}",
            submission.ticket, submission.request
        );
        self.status = "Predicting...".to_string();

        let service = match &self.service {
            Ok(service) => Arc::clone(service),
            Err(message) => {
                self.form
                    .settle(submission.ticket, PredictionOutcome::Error(message.clone()));
                self.status = format!("Error: {message}");
                return;
            }
        };

        let tx = self.service_tx.clone();
        thread::spawn(move || {
            let outcome = match service.predict(&submission.request) {
                Ok(response) => PredictionOutcome::Success(response),
                Err(e) => PredictionOutcome::Error(e.to_string()),
            };
            let _ = tx.send(ServiceResult::Prediction {
                ticket: submission.ticket,
                request: submission.request,
                details: submission.details,
                outcome,
            });
        });
    }

    fn handle_check_health(&mut self) {
        if self.is_checking_health {
            return;
        }
        let service = match &self.service {
            Ok(service) => Arc::clone(service),
            Err(message) => {
                self.status = format!("Error: {message}");
                return;
            }
        };

        self.is_checking_health = true;
        self.status = "Checking service...".to_string();
        let tx = self.service_tx.clone();
        thread::spawn(move || {
            let result = service
                .health()
                .map(|health| health.summary())
                .map_err(|e| e.to_string());
            let _ = tx.send(ServiceResult::Health(result));
        });
    }

    /// Check for prediction and health results
    fn check_service_results(&mut self) {
        while let Ok(result) = self.service_rx.try_recv() {
            match result {
                ServiceResult::Prediction {
                    ticket,
                    request,
                    details,
                    outcome,
                } => self.apply_prediction(ticket, &request, &details, outcome),
                ServiceResult::Health(result) => {
                    self.is_checking_health = false;
                    self.status = match result {
                        Ok(summary) => summary,
                        Err(e) => format!("Error: {e}"),
                    };
                }
            }
        }
    }

    fn apply_prediction(
        &mut self,
        ticket: Ticket,
        request: &PredictionRequest,
        details: &DeviceDetails,
        outcome: PredictionOutcome,
    ) {
        let record = match &outcome {
            PredictionOutcome::Success(response) => {
                info!("Prediction #{} settled: class {}", ticket, response.prediction);
                if response.severity().is_none() {
                    warn!("Unrecognised severity class {:?}", response.prediction);
                }
                Some(PredictionRecord::new(request, details, response))
            }
            PredictionOutcome::Error(message) => {
                error!("Prediction #{} failed: {}", ticket, message);
                None
            }
        };

        if !self.form.settle(ticket, outcome) {
            return;
        }
        match record {
            Some(record) => {
                self.status = format!("Complete! Severity class {}", record.prediction);
                self.history.push(record);
            }
            None => self.status = "Error: prediction failed".to_string(),
        }
    }

    fn handle_clear_history(&mut self) {
        self.history.clear();
        self.status = "History cleared".to_string();
    }

    fn handle_export_history(&mut self) {
        if self.history.is_empty() {
            self.status = "No predictions to export".to_string();
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("prediction_history.csv")
            .save_file()
        else {
            return; // User cancelled
        };

        self.status = match self.history.export(&path) {
            Ok(()) => format!("Exported {} predictions", self.history.len()),
            Err(e) => {
                error!("History export failed: {:#}", e);
                format!("Error: {e:#}")
            }
        };
    }
}

impl eframe::App for DeviceRiskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_service_results();

        // Request repaint while anything is in flight
        if self.is_loading || self.form.is_submitting() || self.is_checking_health {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Complete") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        // Left panel - Device Form
        SidePanel::left("device_form")
            .min_width(320.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action =
                        self.form_panel
                            .show(ui, &mut self.form, &self.loader, self.history.len());

                    match action {
                        DeviceFormAction::Submit => {
                            if self.form.can_submit() {
                                self.handle_submit();
                            }
                        }
                        DeviceFormAction::CheckHealth => self.handle_check_health(),
                        DeviceFormAction::ExportHistory => self.handle_export_history(),
                        DeviceFormAction::ClearHistory => self.handle_clear_history(),
                        DeviceFormAction::None => {}
                    }
                });
            });

        // Central panel - Results
        egui::CentralPanel::default().show(ctx, |ui| {
            ResultView::show(ui, &self.form, &self.history);
        });
    }
}

//! Device Form State Machine
//! Idle → Submitting → Settled, with tickets so a stale response can never
//! overwrite a newer one.

use crate::prediction::{Implanted, PredictionOutcome, PredictionRequest, PredictionResponse};
use tracing::{debug, warn};

/// Optional reference values. They are kept with the history but never sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceDetails {
    pub device_id: String,
    pub country: String,
    pub code: String,
}

/// Values the user has picked so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub device_name: String,
    pub manufacturer_name: String,
    pub classification: String,
    pub implanted: Implanted,
    pub details: DeviceDetails,
}

impl FormState {
    /// All three required fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.device_name.is_empty()
            && !self.manufacturer_name.is_empty()
            && !self.classification.is_empty()
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            name: self.device_name.clone(),
            name_manufacturer: self.manufacturer_name.clone(),
            classification: self.classification.clone(),
            implanted: self.implanted,
        }
    }
}

/// Identifies one submission.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPhase {
    Idle,
    Submitting { ticket: Ticket },
    Settled(PredictionOutcome),
}

/// A started submission, to be handed to a worker.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: Ticket,
    pub request: PredictionRequest,
    pub details: DeviceDetails,
}

/// Form values plus submission lifecycle.
#[derive(Debug)]
pub struct DeviceForm {
    pub state: FormState,
    phase: SubmissionPhase,
    last_ticket: Ticket,
}

impl Default for DeviceForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceForm {
    pub fn new() -> Self {
        Self {
            state: FormState::default(),
            phase: SubmissionPhase::Idle,
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SubmissionPhase::Submitting { .. })
    }

    /// Submit button state.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.state.is_complete()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_submitting() {
            "Predicting..."
        } else {
            "Predict Severity"
        }
    }

    /// Move to Submitting, clearing any shown result.
    ///
    /// Returns `None` when a required field is empty. A submission already in
    /// flight is superseded: its ticket stops being current.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if !self.state.is_complete() {
            return None;
        }
        if let SubmissionPhase::Submitting { ticket } = self.phase {
            debug!("Superseding in-flight submission #{}", ticket);
        }

        self.last_ticket += 1;
        let ticket = self.last_ticket;
        self.phase = SubmissionPhase::Submitting { ticket };
        Some(Submission {
            ticket,
            request: self.state.to_request(),
            details: self.state.details.clone(),
        })
    }

    /// Apply a worker's result. Returns `false` if the ticket is stale.
    pub fn settle(&mut self, ticket: Ticket, outcome: PredictionOutcome) -> bool {
        match self.phase {
            SubmissionPhase::Submitting { ticket: current } if current == ticket => {
                self.phase = SubmissionPhase::Settled(outcome);
                true
            }
            _ => {
                warn!("Discarding result of superseded submission #{}", ticket);
                false
            }
        }
    }

    pub fn prediction(&self) -> Option<&PredictionResponse> {
        match &self.phase {
            SubmissionPhase::Settled(PredictionOutcome::Success(response)) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::Settled(PredictionOutcome::Error(message)) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{
        HealthStatus, PredictionError, PredictionService, SeverityClass,
    };

    /// Answers from a fixed script instead of the network.
    struct FakeService {
        reply: fn() -> Result<PredictionResponse, PredictionError>,
    }

    impl PredictionService for FakeService {
        fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionResponse, PredictionError> {
            (self.reply)()
        }

        fn health(&self) -> Result<HealthStatus, PredictionError> {
            Err(PredictionError::Status {
                context: "Health check",
                status: 503,
            })
        }
    }

    fn run(form: &mut DeviceForm, service: &dyn PredictionService) -> Ticket {
        let submission = form.begin_submission().unwrap();
        assert!(form.is_submitting());
        let outcome = match service.predict(&submission.request) {
            Ok(response) => PredictionOutcome::Success(response),
            Err(e) => PredictionOutcome::Error(e.to_string()),
        };
        assert!(form.settle(submission.ticket, outcome));
        submission.ticket
    }

    fn filled() -> DeviceForm {
        let mut form = DeviceForm::new();
        form.state.device_name = "Infusion Pump".to_string();
        form.state.manufacturer_name = "Acme MedTech".to_string();
        form.state.classification = "Class II".to_string();
        form
    }

    fn success_two() -> Result<PredictionResponse, PredictionError> {
        Ok(serde_json::from_str(r#"{"prediction":"2"}"#).unwrap())
    }

    fn server_error() -> Result<PredictionResponse, PredictionError> {
        Err(PredictionError::Status {
            context: "Prediction",
            status: 500,
        })
    }

    #[test]
    fn submit_enabled_only_when_required_fields_set() {
        let mut form = DeviceForm::new();
        assert!(!form.can_submit());

        form.state.device_name = "Pump".to_string();
        form.state.manufacturer_name = "Acme".to_string();
        assert!(!form.can_submit());

        form.state.classification = "Class I".to_string();
        assert!(form.can_submit());

        form.state.manufacturer_name.clear();
        assert!(!form.can_submit());
        assert!(form.begin_submission().is_none());
        assert_eq!(form.phase(), &SubmissionPhase::Idle);
    }

    #[test]
    fn implanted_does_not_gate_submission() {
        let mut form = filled();
        for implanted in Implanted::ALL {
            form.state.implanted = implanted;
            assert!(form.can_submit());
        }
    }

    #[test]
    fn success_goes_idle_submitting_settled() {
        let mut form = filled();
        assert_eq!(form.phase(), &SubmissionPhase::Idle);
        assert_eq!(form.button_label(), "Predict Severity");

        run(&mut form, &FakeService { reply: success_two });

        let prediction = form.prediction().unwrap();
        assert_eq!(prediction.prediction, "2");
        assert_eq!(prediction.severity(), Some(SeverityClass::MediumHigh));
        assert!(form.error().is_none());
        assert!(form.can_submit());
    }

    #[test]
    fn server_error_clears_prior_prediction() {
        let mut form = filled();
        run(&mut form, &FakeService { reply: success_two });
        assert!(form.prediction().is_some());

        run(&mut form, &FakeService { reply: server_error });
        assert!(form.prediction().is_none());
        let message = form.error().unwrap();
        assert!(!message.is_empty());
        assert_eq!(message, "Prediction failed with status: 500");
    }

    #[test]
    fn submitting_clears_previous_result_and_disables_button() {
        let mut form = filled();
        run(&mut form, &FakeService { reply: server_error });

        let submission = form.begin_submission().unwrap();
        assert!(form.error().is_none());
        assert!(form.prediction().is_none());
        assert!(!form.can_submit());
        assert_eq!(form.button_label(), "Predicting...");
        assert_eq!(submission.request.name, "Infusion Pump");
        assert_eq!(submission.request.implanted, Implanted::No);
    }

    #[test]
    fn stale_ticket_cannot_overwrite_newer_submission() {
        let mut form = filled();
        let first = form.begin_submission().unwrap();
        let second = form.begin_submission().unwrap();
        assert!(second.ticket > first.ticket);

        let early = success_two().unwrap();
        assert!(!form.settle(first.ticket, PredictionOutcome::Success(early)));
        assert!(form.is_submitting());

        assert_eq!(
            form.phase(),
            &SubmissionPhase::Submitting {
                ticket: second.ticket
            }
        );
        assert!(form.settle(
            second.ticket,
            PredictionOutcome::Error("Prediction failed with status: 502".to_string())
        ));
        assert!(!form.settle(first.ticket, PredictionOutcome::Error("late".to_string())));
        assert_eq!(form.error(), Some("Prediction failed with status: 502"));
    }

    #[test]
    fn submission_carries_details_but_request_does_not() {
        let mut form = filled();
        form.state.details.device_id = "1002".to_string();
        form.state.details.country = "Germany".to_string();

        let submission = form.begin_submission().unwrap();
        assert_eq!(submission.details.device_id, "1002");
        assert_eq!(submission.details.country, "Germany");
        assert!(submission.details.code.is_empty());

        let wire = serde_json::to_value(&submission.request).unwrap();
        assert_eq!(wire.as_object().unwrap().len(), 4);
        assert!(wire.get("device_id").is_none());
    }
}

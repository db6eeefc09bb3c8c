//! Form module - device form values and submission lifecycle

mod state;

pub use state::{DeviceDetails, DeviceForm, FormState, SubmissionPhase, Ticket};

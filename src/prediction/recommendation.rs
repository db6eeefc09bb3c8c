//! Recommended actions for each severity class.

use egui::Color32;

/// Severity classes returned by the prediction service, "1" being most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityClass {
    High,
    MediumHigh,
    Medium,
    Low,
}

/// Canned guidance shown under a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub headline: &'static str,
    pub actions: &'static [&'static str],
}

const HIGH_ACTIONS: &[&str] = &[
    "Immediate Action → Stop distribution and usage of the device.",
    "Urgent Communication → Notify hospitals, clinics, and distributors immediately with clear instructions.",
    "Recall Execution → Arrange device return, replacement, or field correction.",
    "Root Cause Analysis → Launch urgent investigation (e.g., design flaw, manufacturing defect).",
    "Regulatory Reporting → File formal recall notice with relevant authorities (e.g., national regulator, health ministry).",
    "Patient Safety Measures → Advise on monitoring, treatment, or follow-ups if patients are at risk.",
];

const MEDIUM_HIGH_ACTIONS: &[&str] = &[
    "Controlled Recall / Field Correction → Remove affected batches or issue corrective instructions.",
    "Customer Notification → Inform healthcare providers about the issue and recommended action (inspection, repair, or labeling update).",
    "Failure Mode Investigation → Conduct root cause analysis to prevent recurrence.",
    "Replacement / Repair Program → Offer device servicing, software updates, or replacement parts.",
    "Tracking & Traceability → Identify and monitor all distributed units.",
];

const MEDIUM_ACTIONS: &[&str] = &[
    "Labeling / Instructions Update → Correct information in user manuals, labels, or packaging.",
    "Inform Distributors & Users → Communicate minor risk but clarify device can remain in use with precautions.",
    "Minor Fixes → Implement small design, manufacturing, or software improvements.",
    "Internal Documentation → Record the issue, corrective action, and quality system updates.",
    "Ongoing Monitoring → Keep track of any similar complaints to ensure no escalation.",
];

const LOW_ACTIONS: &[&str] = &[
    "Issue Safety Notice → Publish communication to users, hospitals, and distributors with specific instructions.",
    "Risk Clarification → Provide clear details on the nature of risk, usage precautions, and next steps.",
    "Corrective / Preventive Action (CAPA) → Implement preventive controls in manufacturing/design.",
    "Monitor Feedback → Collect user responses and field data for effectiveness of the alert.",
    "Update Supply Chain → Ensure distributors and partners act on the safety notice.",
];

impl SeverityClass {
    /// Exact match on the service's class string.
    pub fn from_prediction(value: &str) -> Option<Self> {
        match value {
            "1" => Some(SeverityClass::High),
            "2" => Some(SeverityClass::MediumHigh),
            "3" => Some(SeverityClass::Medium),
            "4" => Some(SeverityClass::Low),
            _ => None,
        }
    }

    pub fn recommendation(self) -> Recommendation {
        match self {
            SeverityClass::High => Recommendation {
                headline: "⚠ HIGH SEVERITY - IMMEDIATE ACTION REQUIRED",
                actions: HIGH_ACTIONS,
            },
            SeverityClass::MediumHigh => Recommendation {
                headline: "MEDIUM-HIGH SEVERITY - PROMPT ACTION NEEDED",
                actions: MEDIUM_HIGH_ACTIONS,
            },
            SeverityClass::Medium => Recommendation {
                headline: "MEDIUM SEVERITY - SYSTEMATIC MONITORING",
                actions: MEDIUM_ACTIONS,
            },
            SeverityClass::Low => Recommendation {
                headline: "✓ LOW SEVERITY - STANDARD MONITORING",
                actions: LOW_ACTIONS,
            },
        }
    }

    /// Headline colour, red through green.
    pub fn color(self) -> Color32 {
        match self {
            SeverityClass::High => Color32::from_rgb(185, 28, 28),
            SeverityClass::MediumHigh => Color32::from_rgb(194, 65, 12),
            SeverityClass::Medium => Color32::from_rgb(161, 98, 7),
            SeverityClass::Low => Color32::from_rgb(21, 128, 61),
        }
    }
}

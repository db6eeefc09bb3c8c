//! Prediction History Module
//! Session log of successful predictions with CSV export.

use crate::form::DeviceDetails;
use crate::prediction::{PredictionRequest, PredictionResponse};
use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// One settled, successful submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    pub timestamp: String,
    pub name: String,
    pub name_manufacturer: String,
    pub classification: String,
    pub implanted: String,
    pub prediction: String,
    pub confidence: Option<f64>,
    pub method: Option<String>,
    pub device_id: String,
    pub country: String,
    pub code: String,
}

impl PredictionRecord {
    pub fn new(
        request: &PredictionRequest,
        details: &DeviceDetails,
        response: &PredictionResponse,
    ) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            name: request.name.clone(),
            name_manufacturer: request.name_manufacturer.clone(),
            classification: request.classification.clone(),
            implanted: request.implanted.as_str().to_string(),
            prediction: response.prediction.clone(),
            confidence: response.confidence,
            method: response.method.clone(),
            device_id: details.device_id.clone(),
            country: details.country.clone(),
            code: details.code.clone(),
        }
    }
}

/// Number of most recent records the recent average covers.
const RECENT_WINDOW: usize = 10;

/// Aggregate view of the session history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistorySummary {
    pub total: usize,
    pub class_counts: BTreeMap<String, usize>,
    pub method_counts: BTreeMap<String, usize>,
    /// Mean over records that carry a confidence.
    pub average_confidence: Option<f64>,
    pub recent_average_confidence: Option<f64>,
    pub recent_count: usize,
}

fn mean_confidence<'a>(records: impl Iterator<Item = &'a PredictionRecord>) -> Option<f64> {
    let (sum, n) = records
        .filter_map(|r| r.confidence)
        .fold((0.0, 0usize), |(sum, n), c| (sum + c, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// In-memory, oldest first.
#[derive(Debug, Default)]
pub struct PredictionHistory {
    records: Vec<PredictionRecord>,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PredictionRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        info!("Cleared {} predictions from history", self.records.len());
        self.records.clear();
    }

    /// Class and method counts plus confidence averages.
    pub fn summary(&self) -> HistorySummary {
        let mut summary = HistorySummary {
            total: self.records.len(),
            ..HistorySummary::default()
        };
        for record in &self.records {
            *summary
                .class_counts
                .entry(record.prediction.clone())
                .or_default() += 1;
            let method = record.method.as_deref().unwrap_or("unknown");
            *summary.method_counts.entry(method.to_string()).or_default() += 1;
        }

        let recent = &self.records[self.records.len().saturating_sub(RECENT_WINDOW)..];
        summary.recent_count = recent.len();
        summary.average_confidence = mean_confidence(self.records.iter());
        summary.recent_average_confidence = mean_confidence(recent.iter());
        summary
    }

    /// Newest first, for display.
    pub fn newest_first(&self) -> impl Iterator<Item = &PredictionRecord> {
        self.records.iter().rev()
    }

    /// Write all records as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);
        if self.records.is_empty() {
            csv.write_record([
                "timestamp",
                "name",
                "name_manufacturer",
                "classification",
                "implanted",
                "prediction",
                "confidence",
                "method",
                "device_id",
                "country",
                "code",
            ])?;
        }
        for record in &self.records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Export to a file chosen by the user.
    pub fn export(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.write_csv(file)
            .with_context(|| format!("Failed to write history to {}", path.display()))?;
        info!("Exported {} predictions to {:?}", self.records.len(), path);
        Ok(())
    }
}

//! Reference Data Index Module
//! Header lookup and per-field option lists derived from the reference CSV.

use crate::data::RawRow;
use std::collections::{HashMap, HashSet};

/// Logical fields the form can draw suggestions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    DeviceName,
    Manufacturer,
    Classification,
    DeviceId,
    Country,
    Code,
}

impl ReferenceField {
    pub const ALL: [ReferenceField; 6] = [
        ReferenceField::DeviceName,
        ReferenceField::Manufacturer,
        ReferenceField::Classification,
        ReferenceField::DeviceId,
        ReferenceField::Country,
        ReferenceField::Code,
    ];

    /// Header names to try, in priority order.
    pub fn header_candidates(self) -> &'static [&'static str] {
        match self {
            ReferenceField::DeviceName => &["name", "device_name"],
            ReferenceField::Manufacturer => &["name_manufacturer", "manufacturer"],
            ReferenceField::Classification => &["classification"],
            ReferenceField::DeviceId => &["device_id", "id"],
            ReferenceField::Country => &["country", "country_device", "country_event"],
            ReferenceField::Code => &["code"],
        }
    }

    /// Whether cells go through [`normalize_id`] before dedup.
    fn is_identifier(self) -> bool {
        matches!(self, ReferenceField::DeviceId)
    }
}

/// Parsed reference rows plus the option lists derived from them.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    headers: HashMap<String, usize>,
    row_count: usize,
    options: HashMap<ReferenceField, Vec<String>>,
}

impl ReferenceIndex {
    /// Build the index. Row 0 is the header row, everything after is data.
    pub fn from_rows(rows: &[RawRow]) -> Self {
        let Some((header_row, data_rows)) = rows.split_first() else {
            return Self::default();
        };

        let headers: HashMap<String, usize> = header_row
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_string(), i))
            .collect();

        let mut index = Self {
            headers,
            row_count: data_rows.len(),
            options: HashMap::new(),
        };

        for field in ReferenceField::ALL {
            let Some(col) = index.resolve(field) else {
                continue;
            };
            let cells = data_rows.iter().filter_map(|row| row.get(col));
            let values = if field.is_identifier() {
                unique_strings(cells.map(|c| normalize_id(c)))
            } else {
                unique_strings(cells)
            };
            index.options.insert(field, values);
        }

        index
    }

    /// Column index for an exact (trimmed) header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.get(name).copied()
    }

    /// Column a logical field reads from: the first candidate header present.
    pub fn resolve(&self, field: ReferenceField) -> Option<usize> {
        field
            .header_candidates()
            .iter()
            .find_map(|name| self.column(name))
    }

    /// Option list for a field; empty when the column is missing.
    pub fn options(&self, field: ReferenceField) -> &[String] {
        self.options.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Trim, drop empties and dedup while keeping first-seen order.
pub fn unique_strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if !trimmed.is_empty() && seen.insert(trimmed.to_string()) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Undo spreadsheet float formatting on identifiers: `"1234.0"` becomes `"1234"`.
pub fn normalize_id(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.strip_suffix(".0") {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            let stripped = digits.trim_start_matches('0');
            if stripped.is_empty() {
                "0".to_string()
            } else {
                stripped.to_string()
            }
        }
        _ => trimmed.to_string(),
    }
}

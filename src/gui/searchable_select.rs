//! Searchable Select Widget
//! Text box that filters a candidate list by case-insensitive substring.

use egui::{Color32, RichText, ScrollArea, TextEdit};

const LIST_MAX_HEIGHT: f32 = 160.0;
const PLACEHOLDER: &str = "Search…";

/// Options containing `query` (trimmed, case-insensitive), in original order.
/// A blank query keeps everything.
pub fn filter_options<'a>(options: &'a [String], query: &str) -> Vec<&'a String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    options
        .iter()
        .filter(|opt| opt.to_lowercase().contains(&needle))
        .collect()
}

/// Query text and open flag for one dropdown. The selected value itself lives
/// with the parent form.
pub struct SearchableSelect {
    id: &'static str,
    label: &'static str,
    query: String,
    open: bool,
}

impl SearchableSelect {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            query: String::new(),
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the typed text. The parent's selected value is untouched.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filtered<'a>(&self, options: &'a [String]) -> Vec<&'a String> {
        filter_options(options, self.query())
    }

    /// Pick an option: the query shows its label, the list closes, and the
    /// value is returned for the parent to store.
    pub fn select(&mut self, option: &str) -> String {
        self.query = option.to_string();
        self.open = false;
        option.to_string()
    }

    /// Draw the control. Returns the newly selected value, if any.
    pub fn show(&mut self, ui: &mut egui::Ui, options: &[String], current: &str) -> Option<String> {
        let mut selected: Option<String> = None;

        ui.label(RichText::new(self.label).size(13.0).strong());
        let response = ui.add(
            TextEdit::singleline(&mut self.query)
                .id_salt(self.id)
                .hint_text(PLACEHOLDER)
                .desired_width(f32::INFINITY),
        );
        if response.gained_focus() || response.clicked() {
            self.open();
        }
        if response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.close();
        }

        if self.is_open() {
            let filtered = self.filtered(options);
            let row_height = ui.spacing().interact_size.y;

            egui::Frame::none()
                .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                .rounding(5.0)
                .inner_margin(4.0)
                .show(ui, |ui| {
                    if filtered.is_empty() {
                        ui.label(RichText::new("No results").size(12.0).color(Color32::GRAY));
                        return;
                    }
                    ScrollArea::vertical()
                        .id_salt(self.id)
                        .max_height(LIST_MAX_HEIGHT)
                        .auto_shrink([false, true])
                        .show_rows(ui, row_height, filtered.len(), |ui, row_range| {
                            for option in &filtered[row_range] {
                                if ui
                                    .selectable_label(current == option.as_str(), option.as_str())
                                    .clicked()
                                {
                                    selected = Some((*option).clone());
                                }
                            }
                        });
                });
        }

        selected.map(|value| self.select(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Acme Pump", "Acme Laser", "Beta Monitor"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn filters_case_insensitively_in_order() {
        let options = options();
        assert_eq!(filter_options(&options, "acme"), ["Acme Pump", "Acme Laser"]);
        assert_eq!(filter_options(&options, "MONITOR"), ["Beta Monitor"]);
        assert_eq!(filter_options(&options, "a l"), ["Acme Laser"]);
    }

    #[test]
    fn blank_query_keeps_full_list() {
        let options = options();
        assert_eq!(filter_options(&options, "").len(), 3);
        assert_eq!(filter_options(&options, "   ").len(), 3);
    }

    #[test]
    fn unmatched_query_is_empty() {
        assert!(filter_options(&options(), "gamma").is_empty());
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(filter_options(&options(), "  pump "), ["Acme Pump"]);
    }

    #[test]
    fn select_sets_query_closes_and_emits() {
        let mut select = SearchableSelect::new("device", "Device Name");
        select.open();
        select.set_query("las");
        assert!(select.is_open());
        assert_eq!(select.filtered(&options()), ["Acme Laser"]);

        let value = select.select("Acme Laser");
        assert_eq!(value, "Acme Laser");
        assert_eq!(select.query(), "Acme Laser");
        assert!(!select.is_open());
    }

    #[test]
    fn opening_without_query_shows_everything() {
        let mut select = SearchableSelect::new("class", "Classification");
        select.open();
        assert_eq!(select.filtered(&options()).len(), 3);
        select.close();
        assert!(!select.is_open());
    }

    #[test]
    fn typing_filters_without_selecting() {
        let mut select = SearchableSelect::new("manufacturer", "Manufacturer Name");
        select.set_query("BETA");
        assert_eq!(select.filtered(&options()), ["Beta Monitor"]);
        select.set_query("");
        assert_eq!(select.query(), "");
        assert_eq!(select.filtered(&options()).len(), 3);
    }
}

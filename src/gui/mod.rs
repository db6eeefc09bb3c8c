//! GUI module - User interface components

mod app;
mod device_form;
mod result_view;
mod searchable_select;

pub use app::DeviceRiskApp;
pub use device_form::{DeviceFormAction, DeviceFormPanel};
pub use result_view::ResultView;
pub use searchable_select::SearchableSelect;

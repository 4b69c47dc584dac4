//! Terminal rendering of the weight chart.

mod chart;
mod error;
mod viewer;

pub use chart::{fill_between, render_to_string, ChartData};
pub use error::GuiError;
pub use viewer::show_chart;

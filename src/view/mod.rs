// View module: the results area, the analysis panel and its chart.

pub mod analysis;
pub mod chart;
pub mod results;

pub use analysis::AnalysisView;
pub use chart::{BarChart, ChartReady};
pub use results::ResultsView;

pub mod csv_writer;
pub mod summary_writer;
pub mod svg_chart;

pub use csv_writer::NormalizedCsvWriter;
pub use summary_writer::{RunSummary, SummaryWriter};
pub use svg_chart::SvgChartWriter;

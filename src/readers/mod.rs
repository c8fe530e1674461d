pub mod waste_report_reader;

pub use waste_report_reader::{resolve_encoding, WasteReportReader};

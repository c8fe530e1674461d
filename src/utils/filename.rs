use crate::models::WasteKind;
use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Default chart path with format: {kind}-waste-disposal-{YYMMDD}.svg
pub fn generate_default_chart_filename(output_dir: &Path, kind: WasteKind) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    let filename = format!(
        "{}-waste-disposal-{:02}{:02}{:02}.svg",
        kind.display_name().to_lowercase(),
        year,
        month,
        day
    );
    output_dir.join(filename)
}

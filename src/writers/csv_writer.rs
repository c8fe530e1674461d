use crate::error::Result;
use crate::models::WasteTable;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the normalized table back out as UTF-8 CSV
pub struct NormalizedCsvWriter;

impl NormalizedCsvWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_table(&self, table: &WasteTable, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.write_to(table, file)?;
        info!("Wrote {} normalized records to {}", table.len(), path.display());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, table: &WasteTable, sink: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(sink);
        writer.write_record(&table.columns)?;

        for record in &table.records {
            writer.write_record(table.columns.iter().map(|c| table.cell(record, c)))?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl Default for NormalizedCsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

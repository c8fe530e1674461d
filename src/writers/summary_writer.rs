use crate::analyzers::DisposalFrequencies;
use crate::error::Result;
use crate::processors::IntegrityReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub input_file: PathBuf,
    pub frequencies: Vec<DisposalFrequencies>,
    pub integrity: IntegrityReport,
}

impl RunSummary {
    pub fn new(
        input_file: &Path,
        frequencies: Vec<DisposalFrequencies>,
        integrity: IntegrityReport,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            input_file: input_file.to_path_buf(),
            frequencies,
            integrity,
        }
    }
}

pub struct SummaryWriter;

impl SummaryWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_summary(&self, summary: &RunSummary, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, summary)?;
        Ok(())
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::MethodCount;
    use crate::models::WasteKind;
    use tempfile::TempDir;

    #[test]
    fn test_summary_json_shape() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("summary.json");
        let summary = RunSummary::new(
            Path::new("Well Waste 2018.csv"),
            vec![DisposalFrequencies {
                kind: WasteKind::Solid,
                methods: vec![MethodCount {
                    disposal_method: "LANDFILL".to_string(),
                    count: 4,
                }],
            }],
            IntegrityReport::default(),
        );

        SummaryWriter::new().write_summary(&summary, &path)?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(value["frequencies"][0]["kind"], "solid");
        assert_eq!(value["frequencies"][0]["methods"][0]["count"], 4);
        assert_eq!(value["integrity"]["total_records"], 0);
        Ok(())
    }
}

use crate::error::Result;
use crate::models::{RawTable, UnparsedCoordinate, WasteTable};
use crate::processors::quantity_splitter::DroppedQuantity;
use crate::processors::{ColumnNormalizer, GeolocationBackfill, PeriodTranslator, QuantitySplitter};
use crate::utils::progress::ProgressReporter;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub table: WasteTable,
    pub dropped_units: BTreeMap<String, DroppedQuantity>,
    pub unparsed_coordinates: Vec<UnparsedCoordinate>,
}

/// Runs the normalization stages in their fixed order. Each stage takes the
/// previous table by value and hands back a new one.
pub struct WastePipeline {
    max_workers: usize,
}

impl WastePipeline {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    pub fn run(&self, raw: RawTable, progress: Option<&ProgressReporter>) -> Result<PipelineOutput> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()?;

        debug!("Normalizing with {} workers", pool.current_num_threads());
        pool.install(|| self.run_stages(raw, progress))
    }

    fn run_stages(&self, raw: RawTable, progress: Option<&ProgressReporter>) -> Result<PipelineOutput> {
        let total = raw.len();

        set_message(progress, "Normalizing columns...");
        let mut normalized = ColumnNormalizer::new().normalize(raw)?;
        let unparsed_coordinates = std::mem::take(&mut normalized.unparsed_coordinates);

        set_message(progress, "Splitting waste quantities...");
        let split = QuantitySplitter::new().split(normalized);

        set_message(progress, "Backfilling facility locations...");
        let located = GeolocationBackfill::new().apply(split.table);

        set_message(progress, "Translating period codes...");
        let table = PeriodTranslator::new().apply(located);

        info!("Normalized {} records", total);
        Ok(PipelineOutput {
            table,
            dropped_units: split.dropped_units,
            unparsed_coordinates,
        })
    }
}

impl Default for WastePipeline {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

fn set_message(progress: Option<&ProgressReporter>, message: &str) {
    if let Some(p) = progress {
        p.set_message(message);
    }
}

use crate::models::{WasteRecord, WasteTable};
use crate::utils::constants::PERIOD_CODES;
use rayon::prelude::*;

/// Rewrites packed monthly codes ("18JANW") as "2018-01". Unknown codes are
/// kept as they are.
pub struct PeriodTranslator;

impl PeriodTranslator {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, table: WasteTable) -> WasteTable {
        let records = table.records.into_par_iter().map(translate_record).collect();
        WasteTable { records, ..table }
    }
}

impl Default for PeriodTranslator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn translate_period(code: &str) -> Option<&'static str> {
    PERIOD_CODES
        .iter()
        .find(|(packed, _)| *packed == code)
        .map(|&(_, year_month)| year_month)
}

pub fn is_translated(period: &str) -> bool {
    PERIOD_CODES.iter().any(|&(_, year_month)| year_month == period)
}

fn translate_record(mut record: WasteRecord) -> WasteRecord {
    if let Some(mapped) = record.period_id.as_deref().and_then(translate_period) {
        record.period_id = Some(mapped.to_string());
    }
    record
}

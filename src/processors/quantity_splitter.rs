use crate::models::{NormalizedRecord, NormalizedTable, WasteRecord, WasteTable};
use crate::utils::constants::{COL_LIQUID_WASTE, COL_SOLID_WASTE, COL_WASTE_QUANTITY, UNIT_BARRELS, UNIT_TONS};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Quantity discarded for one unrecognized unit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DroppedQuantity {
    pub records: usize,
    pub total_quantity: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SplitOutcome {
    pub table: WasteTable,
    /// Keyed by the unit value as it appeared in the source
    pub dropped_units: BTreeMap<String, DroppedQuantity>,
}

/// Moves `waste_quantity` into `solid_waste` (Tons) or `liquid_waste` (Bbl)
/// and removes the quantity column.
///
/// Any other unit leaves both columns at zero and its quantity is not carried
/// forward. The discarded amounts are returned in `SplitOutcome::dropped_units`
/// so they can be reported.
pub struct QuantitySplitter;

impl QuantitySplitter {
    pub fn new() -> Self {
        Self
    }

    pub fn split(&self, table: NormalizedTable) -> SplitOutcome {
        let mut dropped_units: BTreeMap<String, DroppedQuantity> = BTreeMap::new();
        for record in &table.records {
            if !is_split_unit(&record.waste_unit) {
                let entry = dropped_units.entry(record.waste_unit.clone()).or_default();
                entry.records += 1;
                entry.total_quantity += record.waste_quantity.unwrap_or(0.0);
            }
        }

        for (unit, dropped) in &dropped_units {
            warn!(
                "Dropping quantity for {} records with unit '{}' (total {})",
                dropped.records, unit, dropped.total_quantity
            );
        }

        let mut columns: Vec<String> = table
            .columns
            .into_iter()
            .filter(|c| c != COL_WASTE_QUANTITY)
            .collect();
        columns.push(COL_SOLID_WASTE.to_string());
        columns.push(COL_LIQUID_WASTE.to_string());

        let records = table.records.into_par_iter().map(split_record).collect();

        SplitOutcome {
            table: WasteTable {
                columns,
                extra_columns: table.extra_columns,
                records,
            },
            dropped_units,
        }
    }
}

impl Default for QuantitySplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_split_unit(unit: &str) -> bool {
    unit == UNIT_TONS || unit == UNIT_BARRELS
}

pub fn split_record(record: NormalizedRecord) -> WasteRecord {
    let quantity = record.waste_quantity.unwrap_or(0.0);
    let (solid_waste, liquid_waste) = match record.waste_unit.as_str() {
        UNIT_TONS => (quantity, 0.0),
        UNIT_BARRELS => (0.0, quantity),
        _ => (0.0, 0.0),
    };

    WasteRecord {
        line: record.line,
        waste_unit: record.waste_unit,
        solid_waste,
        liquid_waste,
        waste_facility_name: record.waste_facility_name,
        waste_type: record.waste_type,
        disposal_method: record.disposal_method,
        well_pad_latitude: record.well_pad_latitude,
        well_pad_longitude: record.well_pad_longitude,
        facility_latitude: record.facility_latitude,
        facility_longitude: record.facility_longitude,
        period_id: record.period_id,
        extra: record.extra,
    }
}

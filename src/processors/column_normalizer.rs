use crate::error::{ProcessingError, Result};
use crate::models::{NormalizedRecord, NormalizedTable, RawTable, UnparsedCoordinate};
use crate::utils::constants::{
    is_missing, COL_DISPOSAL_METHOD, COL_FACILITY_LATITUDE, COL_FACILITY_LONGITUDE,
    COL_PERIOD_ID, COL_UNITS, COL_WASTE_FACILITY_NAME, COL_WASTE_QUANTITY, COL_WASTE_TYPE,
    COL_WASTE_UNIT, COL_WELL_PAD_LATITUDE, COL_WELL_PAD_LONGITUDE,
};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Resolved positions of the interpreted columns within a raw row
#[derive(Debug, Clone)]
struct ColumnLayout {
    waste_unit: usize,
    waste_quantity: usize,
    waste_facility_name: usize,
    waste_type: usize,
    disposal_method: usize,
    well_pad_latitude: usize,
    well_pad_longitude: usize,
    facility_latitude: usize,
    facility_longitude: usize,
    period_id: usize,
    extra: Vec<usize>,
    width: usize,
}

/// Lower-cases headers, renames `units` to `waste_unit` and types the
/// interpreted columns.
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: RawTable) -> Result<NormalizedTable> {
        let columns = normalize_headers(&raw.headers);
        let layout = resolve_layout(&columns)?;
        let extra_columns = layout
            .extra
            .iter()
            .map(|&i| columns[i].clone())
            .collect::<Vec<_>>();

        debug!(
            "Normalized {} headers ({} passed through)",
            columns.len(),
            extra_columns.len()
        );

        // Line 1 is the header row
        let (records, unparsed): (Vec<_>, Vec<_>) = raw
            .rows
            .into_par_iter()
            .enumerate()
            .map(|(i, row)| normalize_row(&layout, i + 2, row))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .unzip();
        let unparsed_coordinates: Vec<UnparsedCoordinate> = unparsed.into_iter().flatten().collect();

        if !unparsed_coordinates.is_empty() {
            warn!(
                "Loaded {} non-numeric coordinate values as missing",
                unparsed_coordinates.len()
            );
        }

        Ok(NormalizedTable {
            columns,
            extra_columns,
            records,
            unparsed_coordinates,
        })
    }
}

impl Default for ColumnNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .map(|h| {
            let lower = h.to_lowercase();
            if lower == COL_UNITS {
                COL_WASTE_UNIT.to_string()
            } else {
                lower
            }
        })
        .collect()
}

/// Keep everything before the first '(' without trimming
pub fn truncate_waste_type(value: &str) -> &str {
    value.split('(').next().unwrap_or(value)
}

fn resolve_layout(columns: &[String]) -> Result<ColumnLayout> {
    let find = |name: &str| {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
    };

    let layout = ColumnLayout {
        waste_unit: find(COL_WASTE_UNIT)?,
        waste_quantity: find(COL_WASTE_QUANTITY)?,
        waste_facility_name: find(COL_WASTE_FACILITY_NAME)?,
        waste_type: find(COL_WASTE_TYPE)?,
        disposal_method: find(COL_DISPOSAL_METHOD)?,
        well_pad_latitude: find(COL_WELL_PAD_LATITUDE)?,
        well_pad_longitude: find(COL_WELL_PAD_LONGITUDE)?,
        facility_latitude: find(COL_FACILITY_LATITUDE)?,
        facility_longitude: find(COL_FACILITY_LONGITUDE)?,
        period_id: find(COL_PERIOD_ID)?,
        extra: Vec::new(),
        width: columns.len(),
    };

    let interpreted = [
        layout.waste_unit,
        layout.waste_quantity,
        layout.waste_facility_name,
        layout.waste_type,
        layout.disposal_method,
        layout.well_pad_latitude,
        layout.well_pad_longitude,
        layout.facility_latitude,
        layout.facility_longitude,
        layout.period_id,
    ];
    let extra = (0..columns.len())
        .filter(|i| !interpreted.contains(i))
        .collect();

    Ok(ColumnLayout { extra, ..layout })
}

fn normalize_row(
    layout: &ColumnLayout,
    line: usize,
    mut row: Vec<String>,
) -> Result<(NormalizedRecord, Vec<UnparsedCoordinate>)> {
    if row.len() != layout.width {
        return Err(ProcessingError::RaggedRow {
            line,
            expected: layout.width,
            found: row.len(),
        });
    }

    let mut take = |i: usize| std::mem::take(&mut row[i]);

    let waste_unit = non_missing(take(layout.waste_unit)).unwrap_or_default();
    let waste_quantity = parse_quantity(&take(layout.waste_quantity), line)?;
    let waste_facility_name = non_missing(take(layout.waste_facility_name)).unwrap_or_default();
    let waste_type =
        non_missing(take(layout.waste_type)).map(|t| truncate_waste_type(&t).to_string());
    let disposal_method = non_missing(take(layout.disposal_method));
    let mut unparsed = Vec::new();
    let mut coordinate = |value: String, column: &str| {
        parse_coordinate(&value).unwrap_or_else(|| {
            unparsed.push(UnparsedCoordinate {
                line,
                column: column.to_string(),
                value,
            });
            None
        })
    };
    let well_pad_latitude = coordinate(take(layout.well_pad_latitude), COL_WELL_PAD_LATITUDE);
    let well_pad_longitude = coordinate(take(layout.well_pad_longitude), COL_WELL_PAD_LONGITUDE);
    let facility_latitude = coordinate(take(layout.facility_latitude), COL_FACILITY_LATITUDE);
    let facility_longitude = coordinate(take(layout.facility_longitude), COL_FACILITY_LONGITUDE);
    let period_id = non_missing(take(layout.period_id));
    let extra = layout.extra.iter().map(|&i| take(i)).collect();

    let record = NormalizedRecord {
        line,
        waste_unit,
        waste_quantity,
        waste_facility_name,
        waste_type,
        disposal_method,
        well_pad_latitude,
        well_pad_longitude,
        facility_latitude,
        facility_longitude,
        period_id,
        extra,
    };
    Ok((record, unparsed))
}

fn non_missing(value: String) -> Option<String> {
    if is_missing(&value) {
        None
    } else {
        Some(value)
    }
}

fn parse_number(value: &str) -> Option<std::result::Result<f64, std::num::ParseFloatError>> {
    if is_missing(value) {
        None
    } else {
        Some(value.trim().parse::<f64>())
    }
}

pub fn parse_quantity(value: &str, line: usize) -> Result<Option<f64>> {
    parse_number(value)
        .transpose()
        .map_err(|_| ProcessingError::InvalidQuantity {
            line,
            value: value.to_string(),
        })
}

/// `Some(None)` for a missing cell, `None` when the value is not a number
fn parse_coordinate(value: &str) -> Option<Option<f64>> {
    parse_number(value).transpose().ok()
}

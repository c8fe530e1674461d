use crate::models::{WasteRecord, WasteTable};
use crate::utils::constants::{DISPOSAL_REUSE_AT_WELL_PAD, OUT_OF_STATE_REUSE_SITES};
use rayon::prelude::*;

/// Fills in facility coordinates for reuse destinations.
///
/// Rules run in order and the second one wins:
/// 1. `REUSE (AT WELL PAD)` copies the well pad's own coordinates.
/// 2. A named out-of-state reuse site gets its fixed coordinates.
pub struct GeolocationBackfill;

impl GeolocationBackfill {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, table: WasteTable) -> WasteTable {
        let records = table.records.into_par_iter().map(backfill_record).collect();
        WasteTable { records, ..table }
    }
}

impl Default for GeolocationBackfill {
    fn default() -> Self {
        Self::new()
    }
}

pub fn backfill_record(mut record: WasteRecord) -> WasteRecord {
    if record.disposal_method.as_deref() == Some(DISPOSAL_REUSE_AT_WELL_PAD) {
        record.facility_latitude = record.well_pad_latitude;
        record.facility_longitude = record.well_pad_longitude;
    }

    if let Some((lat, lon)) = out_of_state_location(&record.waste_facility_name) {
        record.facility_latitude = Some(lat);
        record.facility_longitude = Some(lon);
    }

    record
}

pub fn out_of_state_location(facility_name: &str) -> Option<(f64, f64)> {
    OUT_OF_STATE_REUSE_SITES
        .iter()
        .find(|(name, _, _)| *name == facility_name)
        .map(|&(_, lat, lon)| (lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_pad_record(disposal: &str, facility: &str) -> WasteRecord {
        WasteRecord {
            disposal_method: Some(disposal.to_string()),
            waste_facility_name: facility.to_string(),
            well_pad_latitude: Some(41.75),
            well_pad_longitude: Some(-76.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_reuse_at_well_pad_copies_pad_location() {
        let record = backfill_record(well_pad_record("REUSE (AT WELL PAD)", ""));

        assert_eq!(record.facility_latitude, Some(41.75));
        assert_eq!(record.facility_longitude, Some(-76.5));
    }

    #[test]
    fn test_facility_name_overrides_disposal_rule() {
        let record = backfill_record(well_pad_record(
            "REUSE (AT WELL PAD)",
            "REUSE AT TEXAS WELL PAD",
        ));

        assert_eq!(record.facility_latitude, Some(32.0));
        assert_eq!(record.facility_longitude, Some(-95.0));
    }

    #[test]
    fn test_every_out_of_state_site_overrides_well_pad_copy() {
        for (site, lat, lon) in OUT_OF_STATE_REUSE_SITES {
            let record = backfill_record(well_pad_record("REUSE (AT WELL PAD)", site));

            assert_eq!(record.facility_latitude, Some(lat), "{}", site);
            assert_eq!(record.facility_longitude, Some(lon), "{}", site);
        }
    }

    #[test]
    fn test_out_of_state_sites() {
        assert_eq!(out_of_state_location("REUSE AT OHIO WELL PAD"), Some((40.0, -81.0)));
        assert_eq!(out_of_state_location("REUSE AT VIRGINIA WELL PAD"), Some((37.0, -81.0)));
        assert_eq!(
            out_of_state_location("REUSE AT WEST VIRGINIA WELL PAD"),
            Some((39.6, -81.0))
        );
        assert_eq!(out_of_state_location("REUSE AT WYOMING WELL PAD"), Some((42.0, -105.0)));
        assert_eq!(out_of_state_location("reuse at ohio well pad"), None);
    }

    #[test]
    fn test_unmatched_records_keep_source_location() {
        let mut record = well_pad_record("LANDFILL", "SOME LANDFILL");
        record.facility_latitude = Some(40.1);
        let record = backfill_record(record);

        assert_eq!(record.facility_latitude, Some(40.1));
        assert_eq!(record.facility_longitude, None);
    }

    #[test]
    fn test_apply_preserves_order() {
        let table = WasteTable {
            records: vec![
                well_pad_record("LANDFILL", "A"),
                well_pad_record("REUSE (AT WELL PAD)", "B"),
            ],
            ..Default::default()
        };

        let table = GeolocationBackfill::new().apply(table);

        assert_eq!(table.records[0].waste_facility_name, "A");
        assert_eq!(table.records[0].facility_latitude, None);
        assert_eq!(table.records[1].facility_latitude, Some(41.75));
    }
}

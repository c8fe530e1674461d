use crate::models::{UnparsedCoordinate, WasteRecord};
use crate::processors::pipeline::PipelineOutput;
use crate::processors::period_translator::is_translated;
use crate::processors::quantity_splitter::DroppedQuantity;
use serde::Serialize;
use std::collections::BTreeMap;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize)]
pub struct IntegrityReport {
    pub total_records: usize,
    pub solid_records: usize,
    pub liquid_records: usize,
    pub unclassified_records: usize,
    pub dropped_units: BTreeMap<String, DroppedQuantity>,
    pub untranslated_periods: BTreeMap<String, usize>,
    pub missing_period_records: usize,
    pub missing_facility_location: usize,
    pub coordinate_violations: Vec<CoordinateViolation>,
    /// Non-numeric coordinate cells, loaded as missing
    pub unparsed_coordinates: Vec<UnparsedCoordinate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoordinateViolation {
    pub line: usize,
    pub details: String,
}

/// Audits a normalized table. Nothing here changes the data; the report only
/// surfaces records the pipeline could not fully normalize.
pub struct IntegrityChecker;

impl IntegrityChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, output: &PipelineOutput) -> IntegrityReport {
        let mut report = IntegrityReport {
            total_records: output.table.len(),
            dropped_units: output.dropped_units.clone(),
            unparsed_coordinates: output.unparsed_coordinates.clone(),
            ..Default::default()
        };

        for record in &output.table.records {
            self.check_record(record, &mut report);
        }

        report
    }

    fn check_record(&self, record: &WasteRecord, report: &mut IntegrityReport) {
        if record.solid_waste > 0.0 {
            report.solid_records += 1;
        }
        if record.liquid_waste > 0.0 {
            report.liquid_records += 1;
        }
        if !record.is_classified() {
            report.unclassified_records += 1;
        }

        match record.period_id.as_deref() {
            Some(period) if !is_translated(period) => {
                *report
                    .untranslated_periods
                    .entry(period.to_string())
                    .or_insert(0) += 1;
            }
            Some(_) => {}
            None => report.missing_period_records += 1,
        }

        if !record.has_facility_location() {
            report.missing_facility_location += 1;
        }

        if let Err(e) = record.validate() {
            report.coordinate_violations.push(CoordinateViolation {
                line: record.line,
                details: e.to_string(),
            });
        }
    }

    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();
        let pct = |n: usize| {
            if report.total_records == 0 {
                0.0
            } else {
                100.0 * n as f64 / report.total_records as f64
            }
        };

        summary.push_str("=== Waste Report Integrity ===\n");
        summary.push_str(&format!("Total Records: {}\n", report.total_records));
        summary.push_str(&format!(
            "Solid Waste Records: {} ({:.1}%)\n",
            report.solid_records,
            pct(report.solid_records)
        ));
        summary.push_str(&format!(
            "Liquid Waste Records: {} ({:.1}%)\n",
            report.liquid_records,
            pct(report.liquid_records)
        ));
        summary.push_str(&format!(
            "Unclassified Unit Records: {} ({:.1}%)\n",
            report.unclassified_records,
            pct(report.unclassified_records)
        ));

        if !report.dropped_units.is_empty() {
            summary.push_str("\nQuantities Dropped (unrecognized units):\n");
            for (unit, dropped) in &report.dropped_units {
                let label = if unit.is_empty() { "<missing>" } else { unit.as_str() };
                summary.push_str(&format!(
                    "  {}: {} records, total quantity {}\n",
                    label, dropped.records, dropped.total_quantity
                ));
            }
        }

        summary.push_str(&format!(
            "\nRecords Without Facility Location: {}\n",
            report.missing_facility_location
        ));
        summary.push_str(&format!(
            "Records Without Period: {}\n",
            report.missing_period_records
        ));

        if !report.untranslated_periods.is_empty() {
            summary.push_str("Untranslated Period Codes:\n");
            for (code, count) in &report.untranslated_periods {
                summary.push_str(&format!("  {}: {} records\n", code, count));
            }
        }

        summary.push_str(&format!(
            "\nCoordinate Violations: {}\n",
            report.coordinate_violations.len()
        ));
        for (i, violation) in report.coordinate_violations.iter().take(10).enumerate() {
            summary.push_str(&format!(
                "  {}. Line {}: {}\n",
                i + 1,
                violation.line,
                violation.details
            ));
        }

        if !report.unparsed_coordinates.is_empty() {
            summary.push_str(&format!(
                "Non-numeric Coordinates (loaded as missing): {}\n",
                report.unparsed_coordinates.len()
            ));
            for unparsed in report.unparsed_coordinates.iter().take(10) {
                summary.push_str(&format!(
                    "  Line {}: {} = '{}'\n",
                    unparsed.line, unparsed.column, unparsed.value
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WasteTable;

    fn output(records: Vec<WasteRecord>) -> PipelineOutput {
        PipelineOutput {
            table: WasteTable {
                records,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_by_kind() {
        let report = IntegrityChecker::new().check(&output(vec![
            WasteRecord {
                waste_unit: "Tons".to_string(),
                solid_waste: 4.0,
                period_id: Some("2018-01".to_string()),
                ..Default::default()
            },
            WasteRecord {
                waste_unit: "Bbl".to_string(),
                liquid_waste: 2.0,
                period_id: Some("19JANW".to_string()),
                facility_latitude: Some(40.0),
                facility_longitude: Some(-80.0),
                ..Default::default()
            },
            WasteRecord {
                waste_unit: "Gal".to_string(),
                ..Default::default()
            },
        ]));

        assert_eq!(report.total_records, 3);
        assert_eq!(report.solid_records, 1);
        assert_eq!(report.liquid_records, 1);
        assert_eq!(report.unclassified_records, 1);
        assert_eq!(report.untranslated_periods.get("19JANW"), Some(&1));
        assert_eq!(report.missing_period_records, 1);
        assert_eq!(report.missing_facility_location, 2);
        assert!(report.coordinate_violations.is_empty());
    }

    #[test]
    fn test_coordinate_violations_are_reported() {
        let report = IntegrityChecker::new().check(&output(vec![WasteRecord {
            line: 7,
            well_pad_longitude: Some(-400.0),
            ..Default::default()
        }]));

        assert_eq!(report.coordinate_violations.len(), 1);
        assert_eq!(report.coordinate_violations[0].line, 7);
    }

    #[test]
    fn test_unparsed_coordinates_are_reported() {
        let mut output = output(vec![WasteRecord::default()]);
        output.unparsed_coordinates.push(UnparsedCoordinate {
            line: 4,
            column: "facility_latitude".to_string(),
            value: "N 40".to_string(),
        });

        let checker = IntegrityChecker::new();
        let report = checker.check(&output);
        let summary = checker.generate_summary(&report);

        assert_eq!(report.unparsed_coordinates.len(), 1);
        assert!(summary.contains("Non-numeric Coordinates (loaded as missing): 1"));
        assert!(summary.contains("Line 4: facility_latitude = 'N 40'"));
    }

    #[test]
    fn test_summary_handles_empty_table() {
        let checker = IntegrityChecker::new();
        let summary = checker.generate_summary(&checker.check(&output(Vec::new())));

        assert!(summary.contains("Total Records: 0"));
        assert!(summary.contains("Solid Waste Records: 0 (0.0%)"));
    }
}

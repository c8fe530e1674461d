use crate::models::{WasteKind, WasteTable};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCount {
    pub disposal_method: String,
    pub count: usize,
}

/// Record counts per disposal method for one waste kind, largest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisposalFrequencies {
    pub kind: WasteKind,
    pub methods: Vec<MethodCount>,
}

impl DisposalFrequencies {
    pub fn total_records(&self) -> usize {
        self.methods.iter().map(|m| m.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.methods.iter().map(|m| m.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} waste disposal methods ({} records):\n",
            self.kind,
            self.total_records()
        );
        let width = self
            .methods
            .iter()
            .map(|m| m.disposal_method.chars().count())
            .max()
            .unwrap_or(0);
        for m in &self.methods {
            summary.push_str(&format!(
                "  {:<width$}  {:>8}\n",
                m.disposal_method,
                m.count,
                width = width
            ));
        }
        summary
    }
}

pub struct DisposalAnalyzer;

impl DisposalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Count records with a positive quantity of `kind`, grouped by disposal
    /// method. Records without a disposal method are not grouped. Ties keep
    /// alphabetical order.
    pub fn frequencies(&self, table: &WasteTable, kind: WasteKind) -> DisposalFrequencies {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in &table.records {
            if kind.quantity(record) > 0.0 {
                if let Some(method) = record.disposal_method.as_deref() {
                    *counts.entry(method).or_insert(0) += 1;
                }
            }
        }

        let mut methods: Vec<MethodCount> = counts
            .into_iter()
            .map(|(method, count)| MethodCount {
                disposal_method: method.to_string(),
                count,
            })
            .collect();
        methods.sort_by(|a, b| b.count.cmp(&a.count));

        DisposalFrequencies { kind, methods }
    }
}

impl Default for DisposalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WasteRecord;
    use pretty_assertions::assert_eq;

    fn liquid(method: &str, bbl: f64) -> WasteRecord {
        WasteRecord {
            waste_unit: "Bbl".to_string(),
            liquid_waste: bbl,
            disposal_method: Some(method.to_string()),
            ..Default::default()
        }
    }

    fn solid(method: &str, tons: f64) -> WasteRecord {
        WasteRecord {
            waste_unit: "Tons".to_string(),
            solid_waste: tons,
            disposal_method: Some(method.to_string()),
            ..Default::default()
        }
    }

    fn table(records: Vec<WasteRecord>) -> WasteTable {
        WasteTable {
            records,
            ..Default::default()
        }
    }

    #[test]
    fn test_counts_sorted_descending() {
        let table = table(vec![
            liquid("B", 1.0),
            liquid("A", 2.0),
            liquid("A", 3.0),
            liquid("A", 4.0),
        ]);

        let freq = DisposalAnalyzer::new().frequencies(&table, WasteKind::Liquid);

        assert_eq!(
            freq.methods,
            vec![
                MethodCount {
                    disposal_method: "A".to_string(),
                    count: 3
                },
                MethodCount {
                    disposal_method: "B".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(freq.max_count(), 3);
        assert_eq!(freq.total_records(), 4);
    }

    #[test]
    fn test_count_not_sum() {
        let table = table(vec![liquid("INJECTION DISPOSAL WELL", 5000.0), liquid("STORAGE", 1.0)]);

        let freq = DisposalAnalyzer::new().frequencies(&table, WasteKind::Liquid);

        assert_eq!(freq.methods[0].count, 1);
        assert_eq!(freq.methods[1].count, 1);
        // equal counts fall back to alphabetical order
        assert_eq!(freq.methods[0].disposal_method, "INJECTION DISPOSAL WELL");
    }

    #[test]
    fn test_kinds_are_independent() {
        let table = table(vec![
            solid("LANDFILL", 10.0),
            solid("LANDFILL", 1.0),
            liquid("LANDFILL", 1.0),
            liquid("REUSE (AT WELL PAD)", 0.0),
        ]);
        let analyzer = DisposalAnalyzer::new();

        let solid_freq = analyzer.frequencies(&table, WasteKind::Solid);
        let liquid_freq = analyzer.frequencies(&table, WasteKind::Liquid);

        assert_eq!(solid_freq.total_records(), 2);
        assert_eq!(liquid_freq.total_records(), 1);
        assert_eq!(liquid_freq.methods[0].disposal_method, "LANDFILL");
    }

    #[test]
    fn test_missing_disposal_method_is_skipped() {
        let mut record = liquid("X", 1.0);
        record.disposal_method = None;

        let freq = DisposalAnalyzer::new().frequencies(&table(vec![record]), WasteKind::Liquid);

        assert!(freq.is_empty());
        assert_eq!(freq.max_count(), 0);
    }
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constants::{
    COL_DISPOSAL_METHOD, COL_FACILITY_LATITUDE, COL_FACILITY_LONGITUDE, COL_LIQUID_WASTE,
    COL_PERIOD_ID, COL_SOLID_WASTE, COL_WASTE_FACILITY_NAME, COL_WASTE_TYPE, COL_WASTE_UNIT,
    COL_WELL_PAD_LATITUDE, COL_WELL_PAD_LONGITUDE, UNIT_BARRELS, UNIT_TONS,
};

/// A report row after column normalization, still carrying its raw quantity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedRecord {
    /// Line number in the source file (header is line 1)
    pub line: usize,
    pub waste_unit: String,
    pub waste_quantity: Option<f64>,
    pub waste_facility_name: String,
    pub waste_type: Option<String>,
    pub disposal_method: Option<String>,
    pub well_pad_latitude: Option<f64>,
    pub well_pad_longitude: Option<f64>,
    pub facility_latitude: Option<f64>,
    pub facility_longitude: Option<f64>,
    pub period_id: Option<String>,
    /// Values of `NormalizedTable::extra_columns`, in the same order
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    /// Normalized header names in source order
    pub columns: Vec<String>,
    /// Columns the pipeline does not interpret, passed through verbatim
    pub extra_columns: Vec<String>,
    pub records: Vec<NormalizedRecord>,
    /// Coordinate cells that were present but not numeric, loaded as `None`
    pub unparsed_coordinates: Vec<UnparsedCoordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnparsedCoordinate {
    pub line: usize,
    pub column: String,
    pub value: String,
}

/// A report row once its quantity has been split into solid and liquid waste
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct WasteRecord {
    pub line: usize,
    pub waste_unit: String,
    pub solid_waste: f64,
    pub liquid_waste: f64,
    pub waste_facility_name: String,
    pub waste_type: Option<String>,
    pub disposal_method: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub well_pad_latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub well_pad_longitude: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub facility_latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub facility_longitude: Option<f64>,

    pub period_id: Option<String>,

    #[serde(skip)]
    pub extra: Vec<String>,
}

impl WasteRecord {
    pub fn has_facility_location(&self) -> bool {
        self.facility_latitude.is_some() && self.facility_longitude.is_some()
    }

    pub fn is_classified(&self) -> bool {
        self.waste_unit == UNIT_TONS || self.waste_unit == UNIT_BARRELS
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WasteTable {
    /// Output header order: normalized columns without `waste_quantity`,
    /// followed by `solid_waste` and `liquid_waste`
    pub columns: Vec<String>,
    pub extra_columns: Vec<String>,
    pub records: Vec<WasteRecord>,
}

impl WasteTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render one cell as text; missing values render as an empty string
    pub fn cell(&self, record: &WasteRecord, column: &str) -> String {
        fn opt_f64(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        match column {
            COL_WASTE_UNIT => record.waste_unit.clone(),
            COL_SOLID_WASTE => record.solid_waste.to_string(),
            COL_LIQUID_WASTE => record.liquid_waste.to_string(),
            COL_WASTE_FACILITY_NAME => record.waste_facility_name.clone(),
            COL_WASTE_TYPE => record.waste_type.clone().unwrap_or_default(),
            COL_DISPOSAL_METHOD => record.disposal_method.clone().unwrap_or_default(),
            COL_WELL_PAD_LATITUDE => opt_f64(record.well_pad_latitude),
            COL_WELL_PAD_LONGITUDE => opt_f64(record.well_pad_longitude),
            COL_FACILITY_LATITUDE => opt_f64(record.facility_latitude),
            COL_FACILITY_LONGITUDE => opt_f64(record.facility_longitude),
            COL_PERIOD_ID => record.period_id.clone().unwrap_or_default(),
            other => self
                .extra_columns
                .iter()
                .position(|c| c == other)
                .and_then(|i| record.extra.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteKind {
    Liquid,
    Solid,
}

impl WasteKind {
    pub fn all() -> [WasteKind; 2] {
        [WasteKind::Liquid, WasteKind::Solid]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WasteKind::Liquid => "Liquid",
            WasteKind::Solid => "Solid",
        }
    }

    pub fn column_name(&self) -> &'static str {
        match self {
            WasteKind::Liquid => COL_LIQUID_WASTE,
            WasteKind::Solid => COL_SOLID_WASTE,
        }
    }

    /// The source unit that feeds this kind
    pub fn unit(&self) -> &'static str {
        match self {
            WasteKind::Liquid => UNIT_BARRELS,
            WasteKind::Solid => UNIT_TONS,
        }
    }

    pub fn quantity(&self, record: &WasteRecord) -> f64 {
        match self {
            WasteKind::Liquid => record.liquid_waste,
            WasteKind::Solid => record.solid_waste,
        }
    }

    pub fn chart_title(&self, subtitle: &str) -> String {
        format!("{} Waste Disposal Methods - {}", self.display_name(), subtitle)
    }
}

impl std::fmt::Display for WasteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

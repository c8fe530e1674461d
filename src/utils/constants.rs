/// Source column names after lower-casing
pub const COL_UNITS: &str = "units";
pub const COL_WASTE_QUANTITY: &str = "waste_quantity";
pub const COL_WASTE_FACILITY_NAME: &str = "waste_facility_name";
pub const COL_WASTE_TYPE: &str = "waste_type";
pub const COL_DISPOSAL_METHOD: &str = "disposal_method";
pub const COL_WELL_PAD_LATITUDE: &str = "well_pad_latitude";
pub const COL_WELL_PAD_LONGITUDE: &str = "well_pad_longitude";
pub const COL_FACILITY_LATITUDE: &str = "facility_latitude";
pub const COL_FACILITY_LONGITUDE: &str = "facility_longitude";
pub const COL_PERIOD_ID: &str = "period_id";

/// Derived column names
pub const COL_WASTE_UNIT: &str = "waste_unit";
pub const COL_SOLID_WASTE: &str = "solid_waste";
pub const COL_LIQUID_WASTE: &str = "liquid_waste";

/// Waste unit labels (case-sensitive)
pub const UNIT_TONS: &str = "Tons";
pub const UNIT_BARRELS: &str = "Bbl";

/// Disposal method meaning the waste stayed on the producing well pad
pub const DISPOSAL_REUSE_AT_WELL_PAD: &str = "REUSE (AT WELL PAD)";

/// Fixed coordinates for out-of-state reuse destinations: (facility name, lat, lon)
pub const OUT_OF_STATE_REUSE_SITES: [(&str, f64, f64); 5] = [
    ("REUSE AT OHIO WELL PAD", 40.0, -81.0),
    ("REUSE AT TEXAS WELL PAD", 32.0, -95.0),
    ("REUSE AT VIRGINIA WELL PAD", 37.0, -81.0),
    ("REUSE AT WEST VIRGINIA WELL PAD", 39.6, -81.0),
    ("REUSE AT WYOMING WELL PAD", 42.0, -105.0),
];

/// Packed monthly period codes and their year-month form
pub const PERIOD_CODES: [(&str, &str); 12] = [
    ("18JANW", "2018-01"),
    ("18FEBW", "2018-02"),
    ("18MARW", "2018-03"),
    ("18APRW", "2018-04"),
    ("18MAYW", "2018-05"),
    ("18JUNW", "2018-06"),
    ("18JULW", "2018-07"),
    ("18AUGW", "2018-08"),
    ("18SEPW", "2018-09"),
    ("18OCTW", "2018-10"),
    ("18NOVW", "2018-11"),
    ("18DECW", "2018-12"),
];

/// Cell values treated as missing when loading
pub const MISSING_VALUE_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loader defaults
pub const DEFAULT_INPUT_FILE: &str = "Well Waste 2018.csv";
pub const DEFAULT_ENCODING: &str = "iso-8859-1";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_CONFIG_FILE: &str = "pa-waste.toml";
pub const ENV_PREFIX: &str = "PA_WASTE";

/// Chart defaults
pub const DEFAULT_CHART_SUBTITLE: &str = "PA 2018";
pub const DEFAULT_CHART_WIDTH: u32 = 960;
pub const DEFAULT_CHART_HEIGHT: u32 = 600;
pub const CHART_Y_LABEL: &str = "Frequency (Log Scale)";
pub const CHART_X_LABEL: &str = "Disposal Method";

pub fn is_missing(value: &str) -> bool {
    MISSING_VALUE_MARKERS.contains(&value)
}

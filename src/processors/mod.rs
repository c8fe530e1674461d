pub mod column_normalizer;
pub mod geolocation;
pub mod integrity_checker;
pub mod period_translator;
pub mod pipeline;
pub mod quantity_splitter;

pub use column_normalizer::ColumnNormalizer;
pub use geolocation::GeolocationBackfill;
pub use integrity_checker::{CoordinateViolation, IntegrityChecker, IntegrityReport};
pub use period_translator::PeriodTranslator;
pub use pipeline::{PipelineOutput, WastePipeline};
pub use quantity_splitter::{DroppedQuantity, QuantitySplitter, SplitOutcome};

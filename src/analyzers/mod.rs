pub mod disposal_analyzer;

pub use disposal_analyzer::{DisposalAnalyzer, DisposalFrequencies, MethodCount};

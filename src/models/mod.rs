pub mod table;
pub mod waste;

pub use table::RawTable;
pub use waste::{
    NormalizedRecord, NormalizedTable, UnparsedCoordinate, WasteKind, WasteRecord, WasteTable,
};

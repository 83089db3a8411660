/// Parsed external decoder result
pub mod barcode_result;
pub mod point;
/// Symbols from the in-process decoder
pub mod symbol;

pub use barcode_result::{BarcodeResult, MIN_POLYGON_POINTS};
pub use point::Point;
pub use symbol::{DecodedSymbol, SymbolType};

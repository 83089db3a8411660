use super::Point;
use std::borrow::Cow;
use std::fmt;

/// Barcode symbology of a decoded symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolType {
    /// QR code (Model 2)
    QrCode,
    /// PDF417 stacked linear barcode
    Pdf417,
    /// Any other symbology, carried by its tag
    Other(String),
}

impl SymbolType {
    /// Upper-case tag, as barcode tools usually print it
    pub fn tag(&self) -> &str {
        match self {
            SymbolType::QrCode => "QRCODE",
            SymbolType::Pdf417 => "PDF417",
            SymbolType::Other(tag) => tag,
        }
    }

    /// Map a tag back to a symbology. ZXing spells formats with underscores
    /// (`QR_CODE`, `PDF_417`), so those are accepted too.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().replace('_', "").as_str() {
            "QRCODE" => SymbolType::QrCode,
            "PDF417" => SymbolType::Pdf417,
            _ => SymbolType::Other(tag.trim().to_string()),
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single symbol found by the in-process decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSymbol {
    /// Symbology of the symbol
    pub symbol_type: SymbolType,
    /// Raw payload bytes
    pub payload: Vec<u8>,
    /// Corners of the symbol in image coordinates
    pub corners: [Point; 4],
}

impl DecodedSymbol {
    /// Payload interpreted as UTF-8. Invalid sequences are replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }
}

//! Query classification.
//!
//! Query text is never parsed. It is matched against a fixed set of markers,
//! checked in declaration order, and the first hit decides the kind.

use std::fmt;

/// Marker for the stored function that assembles a full product configuration.
pub const PRODUCT_CONFIGURATION_MARKER: &str = "get_product_configuration";
pub const INSERT_PRODUCT_MARKER: &str = "INSERT INTO products";
pub const INSERT_PRODUCT_SECTION_MARKER: &str = "INSERT INTO product_sections";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    ProductConfiguration,
    InsertProduct,
    InsertProductSection,
    Other,
}

impl QueryKind {
    const MARKERS: [(&'static str, QueryKind); 3] = [
        (PRODUCT_CONFIGURATION_MARKER, QueryKind::ProductConfiguration),
        (INSERT_PRODUCT_MARKER, QueryKind::InsertProduct),
        (INSERT_PRODUCT_SECTION_MARKER, QueryKind::InsertProductSection),
    ];

    pub fn classify(text: &str) -> Self {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| text.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(QueryKind::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::ProductConfiguration => "product_configuration",
            QueryKind::InsertProduct => "insert_product",
            QueryKind::InsertProductSection => "insert_product_section",
            QueryKind::Other => "other",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

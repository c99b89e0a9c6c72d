//! Deterministic overrides applied on top of the oracle's answer

use serde::{Deserialize, Serialize};

/// Phrases that declare a shipment is NOT dangerous goods
pub const NON_DG_PHRASES: [&str; 3] = ["non-dg", "non hazardous", "not dangerous"];

/// Keywords that mark a shipment as dangerous goods
///
/// Matched as plain substrings, so "dg" also fires inside longer words.
pub const DG_KEYWORDS: [&str; 5] = ["dg", "imo", "imdg", "un ", "class "];

/// Port-code prefix that identifies the home country for product lines
pub const HOME_PREFIX: &str = "IN";

/// Internal product line used for routing a shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductLine {
    /// LCL sea freight leaving the home country
    #[serde(rename = "pl_sea_export_lcl")]
    SeaExportLcl,

    /// LCL sea freight arriving in the home country
    #[serde(rename = "pl_sea_import_lcl")]
    SeaImportLcl,
}

impl ProductLine {
    /// Get the product line code
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductLine::SeaExportLcl => "pl_sea_export_lcl",
            ProductLine::SeaImportLcl => "pl_sea_import_lcl",
        }
    }
}

/// Decide the dangerous-goods flag from the email text
///
/// `text` must already be lowercased (see [`crate::Email::keyword_text`]).
/// A negation phrase always wins, then any DG keyword, then the oracle.
pub fn dangerous_goods(text: &str, oracle_flag: bool) -> bool {
    if NON_DG_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return false;
    }
    if DG_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        return true;
    }
    oracle_flag
}

/// Infer the product line from resolved port codes
///
/// Both sides must be resolved. When both codes carry the home prefix the
/// export branch is taken first.
pub fn product_line(origin_code: Option<&str>, destination_code: Option<&str>) -> Option<ProductLine> {
    let (origin, destination) = (origin_code?, destination_code?);
    if origin.starts_with(HOME_PREFIX) {
        Some(ProductLine::SeaExportLcl)
    } else if destination.starts_with(HOME_PREFIX) {
        Some(ProductLine::SeaImportLcl)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_beats_keywords() {
        let text = "non-dg shipment, imo class 3";
        assert!(!dangerous_goods(text, true));
    }

    #[test]
    fn test_each_negation_phrase() {
        for phrase in NON_DG_PHRASES {
            let text = format!("cargo is {} per msds, un 1263", phrase);
            assert!(!dangerous_goods(&text, true), "phrase {:?}", phrase);
        }
    }

    #[test]
    fn test_keywords_override_oracle() {
        assert!(dangerous_goods("imdg declaration attached", false));
        assert!(dangerous_goods("paint, un 1263", false));
        assert!(dangerous_goods("hazard class 3", false));
        assert!(dangerous_goods("dg cargo", false));
    }

    #[test]
    fn test_keyword_substring_matches_inside_words() {
        // "dg" inside "badge" still counts
        assert!(dangerous_goods("promotional badges", false));
    }

    #[test]
    fn test_falls_back_to_oracle() {
        assert!(dangerous_goods("general cargo, cotton yarn", true));
        assert!(!dangerous_goods("general cargo, cotton yarn", false));
    }

    #[test]
    fn test_un_requires_trailing_space() {
        assert!(!dangerous_goods("unit price", false));
    }

    #[test]
    fn test_product_line_export() {
        assert_eq!(
            product_line(Some("INNSA"), Some("SGSIN")),
            Some(ProductLine::SeaExportLcl)
        );
    }

    #[test]
    fn test_product_line_import() {
        assert_eq!(
            product_line(Some("CNSHA"), Some("INMAA")),
            Some(ProductLine::SeaImportLcl)
        );
    }

    #[test]
    fn test_product_line_both_home_prefers_export() {
        assert_eq!(
            product_line(Some("INMAA"), Some("INNSA")),
            Some(ProductLine::SeaExportLcl)
        );
    }

    #[test]
    fn test_product_line_requires_both_sides() {
        assert_eq!(product_line(Some("INNSA"), None), None);
        assert_eq!(product_line(None, Some("INNSA")), None);
        assert_eq!(product_line(None, None), None);
    }

    #[test]
    fn test_product_line_foreign_to_foreign() {
        assert_eq!(product_line(Some("CNSHA"), Some("SGSIN")), None);
    }

    #[test]
    fn test_product_line_serializes_as_code() {
        let json = serde_json::to_string(&ProductLine::SeaImportLcl).unwrap();
        assert_eq!(json, "\"pl_sea_import_lcl\"");
        assert_eq!(ProductLine::SeaExportLcl.as_str(), "pl_sea_export_lcl");
    }
}

//! Incoterm module - the closed set of accepted trade terms

use serde::{Deserialize, Serialize};
use std::fmt;

/// An Incoterms 2020 trade term
///
/// The output record only ever carries one of these, so an unrecognized or
/// missing term from the oracle collapses to [`Incoterm::Fob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Incoterm {
    /// Free On Board
    #[default]
    Fob,
    /// Cost, Insurance and Freight
    Cif,
    /// Cost and Freight
    Cfr,
    /// Ex Works
    Exw,
    /// Delivered Duty Paid
    Ddp,
    /// Delivered At Place
    Dap,
    /// Free Carrier
    Fca,
    /// Carriage Paid To
    Cpt,
    /// Carriage and Insurance Paid To
    Cip,
    /// Delivered at Place Unloaded
    Dpu,
}

impl Incoterm {
    /// Every accepted term, in declaration order
    pub const ALL: [Incoterm; 10] = [
        Incoterm::Fob,
        Incoterm::Cif,
        Incoterm::Cfr,
        Incoterm::Exw,
        Incoterm::Ddp,
        Incoterm::Dap,
        Incoterm::Fca,
        Incoterm::Cpt,
        Incoterm::Cip,
        Incoterm::Dpu,
    ];

    /// Get the three-letter code
    pub fn as_str(&self) -> &'static str {
        match self {
            Incoterm::Fob => "FOB",
            Incoterm::Cif => "CIF",
            Incoterm::Cfr => "CFR",
            Incoterm::Exw => "EXW",
            Incoterm::Ddp => "DDP",
            Incoterm::Dap => "DAP",
            Incoterm::Fca => "FCA",
            Incoterm::Cpt => "CPT",
            Incoterm::Cip => "CIP",
            Incoterm::Dpu => "DPU",
        }
    }

    /// Parse an exact code after trimming and uppercasing
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|term| term.as_str() == code)
    }

    /// Normalize an oracle-supplied value, defaulting to FOB
    pub fn normalize(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for Incoterm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Incoterm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid incoterm: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_missing_or_empty() {
        assert_eq!(Incoterm::normalize(None), Incoterm::Fob);
        assert_eq!(Incoterm::normalize(Some("")), Incoterm::Fob);
        assert_eq!(Incoterm::normalize(Some("   ")), Incoterm::Fob);
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(Incoterm::normalize(Some(" cif ")), Incoterm::Cif);
        assert_eq!(Incoterm::normalize(Some("Exw")), Incoterm::Exw);
        assert_eq!(Incoterm::normalize(Some("dpu")), Incoterm::Dpu);
    }

    #[test]
    fn test_normalize_unknown_falls_back_to_fob() {
        assert_eq!(Incoterm::normalize(Some("DDU")), Incoterm::Fob);
        assert_eq!(Incoterm::normalize(Some("CIF Mumbai")), Incoterm::Fob);
        assert_eq!(Incoterm::normalize(Some("FOB/CIF")), Incoterm::Fob);
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Incoterm::Cfr).unwrap();
        assert_eq!(json, "\"CFR\"");
        let parsed: Incoterm = serde_json::from_str("\"DAP\"").unwrap();
        assert_eq!(parsed, Incoterm::Dap);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("XYZ".parse::<Incoterm>().is_err());
        assert_eq!("fca".parse::<Incoterm>().unwrap(), Incoterm::Fca);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalization always lands in the accepted set
        #[test]
        fn test_normalize_is_total(input in proptest::option::of(".{0,12}")) {
            let term = Incoterm::normalize(input.as_deref());
            prop_assert!(Incoterm::ALL.contains(&term));
        }

        /// Property: normalizing a normalized value is a no-op
        #[test]
        fn test_normalize_is_idempotent(input in proptest::option::of(".{0,12}")) {
            let once = Incoterm::normalize(input.as_deref());
            let twice = Incoterm::normalize(Some(once.as_str()));
            prop_assert_eq!(once, twice);
        }

        /// Property: valid codes survive any casing and padding
        #[test]
        fn test_valid_codes_round_trip(idx in 0usize..10, pad in "[ \t]{0,3}", lower: bool) {
            let term = Incoterm::ALL[idx];
            let code = if lower { term.as_str().to_lowercase() } else { term.as_str().to_string() };
            let input = format!("{pad}{code}{pad}");
            prop_assert_eq!(Incoterm::normalize(Some(&input)), term);
        }
    }
}

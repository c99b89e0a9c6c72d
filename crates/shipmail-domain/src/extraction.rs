//! Extraction records - the oracle's raw answer and the normalized output

use crate::email::Email;
use crate::incoterm::Incoterm;
use crate::port::{PortIndex, PortReference};
use crate::rules::{self, ProductLine};
use serde::{Deserialize, Serialize};

/// Fields the oracle claims to have found in an email
///
/// Nothing here is trusted: ports are re-resolved, the incoterm is
/// normalized and the dangerous-goods flag can be overridden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawExtraction {
    /// Origin port as written by the oracle
    pub origin_port_name: Option<String>,

    /// Destination port as written by the oracle
    pub destination_port_name: Option<String>,

    /// Trade term as written by the oracle
    pub incoterm: Option<String>,

    /// Gross weight in kilograms
    pub cargo_weight_kg: Option<f64>,

    /// Volume in cubic metres
    pub cargo_cbm: Option<f64>,

    /// The oracle's own dangerous-goods guess
    pub is_dangerous: bool,
}

/// Normalized output record, one per processed email
///
/// Port code and name are written from a single resolved reference, so a
/// side is either fully resolved or fully null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailExtraction {
    /// Source email id
    pub id: String,

    /// Inferred product line
    pub product_line: Option<ProductLine>,

    /// Resolved origin port code
    pub origin_port_code: Option<String>,

    /// Canonical origin port name
    pub origin_port_name: Option<String>,

    /// Resolved destination port code
    pub destination_port_code: Option<String>,

    /// Canonical destination port name
    pub destination_port_name: Option<String>,

    /// Normalized trade term
    pub incoterm: Incoterm,

    /// Gross weight in kilograms
    pub cargo_weight_kg: Option<f64>,

    /// Volume in cubic metres
    pub cargo_cbm: Option<f64>,

    /// Dangerous-goods flag after keyword override
    pub is_dangerous: bool,
}

impl EmailExtraction {
    /// Run resolution and rules over the oracle's answer for `email`
    pub fn assemble(email: &Email, raw: &RawExtraction, ports: &PortIndex) -> Self {
        let origin = ports.resolve(raw.origin_port_name.as_deref());
        let destination = ports.resolve(raw.destination_port_name.as_deref());

        let product_line = rules::product_line(
            origin.map(|p| p.code.as_str()),
            destination.map(|p| p.code.as_str()),
        );
        let is_dangerous = rules::dangerous_goods(&email.keyword_text(), raw.is_dangerous);

        let (origin_port_code, origin_port_name) = split_port(origin);
        let (destination_port_code, destination_port_name) = split_port(destination);

        Self {
            id: email.id.clone(),
            product_line,
            origin_port_code,
            origin_port_name,
            destination_port_code,
            destination_port_name,
            incoterm: Incoterm::normalize(raw.incoterm.as_deref()),
            cargo_weight_kg: raw.cargo_weight_kg,
            cargo_cbm: raw.cargo_cbm,
            is_dangerous,
        }
    }

    /// Record emitted when the oracle fails for this email
    pub fn fallback(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            product_line: None,
            origin_port_code: None,
            origin_port_name: None,
            destination_port_code: None,
            destination_port_name: None,
            incoterm: Incoterm::default(),
            cargo_weight_kg: None,
            cargo_cbm: None,
            is_dangerous: false,
        }
    }

    /// Resolved origin as a reference, if any
    pub fn origin(&self) -> Option<PortReference> {
        join_port(&self.origin_port_code, &self.origin_port_name)
    }

    /// Resolved destination as a reference, if any
    pub fn destination(&self) -> Option<PortReference> {
        join_port(&self.destination_port_code, &self.destination_port_name)
    }
}

fn split_port(port: Option<&PortReference>) -> (Option<String>, Option<String>) {
    match port {
        Some(p) => (Some(p.code.clone()), Some(p.name.clone())),
        None => (None, None),
    }
}

fn join_port(code: &Option<String>, name: &Option<String>) -> Option<PortReference> {
    match (code, name) {
        (Some(code), Some(name)) => Some(PortReference::new(code.clone(), name.clone())),
        _ => None,
    }
}

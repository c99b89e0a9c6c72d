//! Shipmail Domain Layer
//!
//! This crate contains the data model and the deterministic business rules
//! for turning a shipment email into a normalized extraction record. It does
//! no I/O: the language model that reads the email is reached only through
//! the [`traits::LlmProvider`] trait, implemented in `shipmail-llm`.
//!
//! ## Key Concepts
//!
//! - **Email**: Immutable input message (id, subject, body)
//! - **PortIndex**: Exact-then-fuzzy lookup from free-text port names to UN/LOCODEs
//! - **Incoterm**: Closed set of trade terms; anything unrecognized becomes FOB
//! - **Rules**: Dangerous-goods keyword override and product-line inference
//! - **EmailExtraction**: The output record, one per processed email
//!
//! ## Architecture
//!
//! ```text
//! RawExtraction (untrusted) ─┬─> PortIndex::resolve ──┐
//!                            └─> rules::* ────────────┴─> EmailExtraction
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod email;
pub mod extraction;
pub mod incoterm;
pub mod port;
pub mod rules;
pub mod traits;

// Re-exports for convenience
pub use email::Email;
pub use extraction::{EmailExtraction, RawExtraction};
pub use incoterm::Incoterm;
pub use port::{PortIndex, PortReference};
pub use rules::ProductLine;

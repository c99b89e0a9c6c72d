//! Shipmail Extractor
//!
//! Turns shipment emails into normalized extraction records using an LLM
//! oracle followed by deterministic post-processing.
//!
//! # Overview
//!
//! The oracle is unreliable: it may fail, rate-limit, wrap its answer in
//! prose, or get the domain jargon wrong. This crate wraps each call with a
//! timeout, slices the JSON object out of the reply, decodes it leniently and
//! hands it to the domain rules (port resolution, incoterm normalization,
//! dangerous-goods override, product-line inference).
//!
//! # Architecture
//!
//! ```text
//! Email → Extractor → LLM → parser → EmailExtraction::assemble → BatchRunner → output.json
//! ```
//!
//! # Failure Policy
//!
//! - **Rate limiting** ("429" / "rate limit" in the error): the batch stops;
//!   records collected so far are still written
//! - **Anything else** (transport, timeout, unparseable reply): a null record
//!   is written for that email and the batch continues
//!
//! # Example Usage
//!
//! ```no_run
//! use shipmail_domain::{Email, PortIndex, PortReference};
//! use shipmail_extractor::{BatchRunner, Extractor, ExtractorConfig};
//! use shipmail_llm::MockProvider;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"origin_port_name": "Nhava Sheva"}"#);
//! let ports = PortIndex::new(vec![PortReference::new("INNSA", "Nhava Sheva")]);
//! let extractor = Extractor::new(llm, ports, ExtractorConfig::default());
//!
//! let runner = BatchRunner::new(extractor);
//! let emails = vec![Email::new("e1", "RFQ", "Ex Nhava Sheva, 2 cbm")];
//! let report = runner
//!     .run_and_persist(&emails, Path::new("output.json"), |_| {})
//!     .await?;
//!
//! println!("Wrote {} records", report.records.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

pub mod io;
pub mod scoring;


pub use batch::BatchRunner;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_llm_response;
pub use prompt::{PromptBuilder, EXTRACTION_INSTRUCTIONS};
pub use types::{BatchEvent, BatchReport, ExtractionOutcome, HaltReason};

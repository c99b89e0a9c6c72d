//! Outcome and report types for extraction

use shipmail_domain::EmailExtraction;

/// What happened to a single email
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    /// The oracle answered and the record was assembled from its reply
    Extracted(EmailExtraction),

    /// The oracle failed for this email; a null record stands in
    Fallback {
        /// The stand-in record
        record: EmailExtraction,
        /// Why the oracle call failed
        reason: String,
    },

    /// The oracle is rate-limiting; the batch must stop here
    Halt {
        /// Why the oracle call failed
        reason: String,
    },
}

impl ExtractionOutcome {
    /// The record to append, if the batch continues
    pub fn record(&self) -> Option<&EmailExtraction> {
        match self {
            ExtractionOutcome::Extracted(record) => Some(record),
            ExtractionOutcome::Fallback { record, .. } => Some(record),
            ExtractionOutcome::Halt { .. } => None,
        }
    }
}

/// Why a batch stopped before the end of its input
#[derive(Debug, Clone, PartialEq)]
pub struct HaltReason {
    /// Email whose oracle call was rate-limited (it has no record)
    pub email_id: String,

    /// Position of that email in the input
    pub index: usize,

    /// Error text from the oracle
    pub reason: String,
}

/// Result of a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// One record per processed email, in input order
    pub records: Vec<EmailExtraction>,

    /// Records assembled from an oracle reply
    pub extracted: usize,

    /// Null records written after an oracle failure
    pub fallbacks: usize,

    /// Set when the batch stopped on rate limiting
    pub halted: Option<HaltReason>,

    /// Number of emails in the input
    pub total_emails: usize,
}

impl BatchReport {
    /// Whether every input email got a record
    pub fn is_complete(&self) -> bool {
        self.halted.is_none() && self.records.len() == self.total_emails
    }
}

/// Progress notifications emitted while a batch runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BatchEvent<'a> {
    /// The batch is starting
    Started {
        /// Number of emails in the input
        total: usize,
    },

    /// An email was turned into a record
    Processed {
        /// Position in the input
        index: usize,
        /// Email id
        email_id: &'a str,
        /// Error text when a fallback record was written
        failure: Option<&'a str>,
    },

    /// The batch stopped on rate limiting
    Halted {
        /// Position in the input
        index: usize,
        /// Email id
        email_id: &'a str,
        /// Error text from the oracle
        reason: &'a str,
    },
}

//! Sequential batch processing over an email collection

use crate::error::ExtractorError;
use crate::extractor::Extractor;
use crate::io::write_records;
use crate::types::{BatchEvent, BatchReport, ExtractionOutcome, HaltReason};
use shipmail_domain::traits::LlmProvider;
use shipmail_domain::Email;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Runs the extractor over emails one at a time, in input order
pub struct BatchRunner<L>
where
    L: LlmProvider,
{
    extractor: Extractor<L>,
}

impl<L> BatchRunner<L>
where
    L: LlmProvider,
{
    /// Create a runner around an extractor
    pub fn new(extractor: Extractor<L>) -> Self {
        Self { extractor }
    }

    /// The wrapped extractor
    pub fn extractor(&self) -> &Extractor<L> {
        &self.extractor
    }

    /// Process every email, stopping early on rate limiting
    pub async fn run(&self, emails: &[Email]) -> BatchReport {
        self.run_with_progress(emails, |_| {}).await
    }

    /// Like [`run`](Self::run), reporting each step to `observer`
    pub async fn run_with_progress<F>(&self, emails: &[Email], mut observer: F) -> BatchReport
    where
        F: FnMut(BatchEvent<'_>),
    {
        let start = Instant::now();
        let mut report = BatchReport {
            records: Vec::with_capacity(emails.len()),
            total_emails: emails.len(),
            ..Default::default()
        };

        info!(
            "Starting batch of {} emails with model '{}'",
            emails.len(),
            self.extractor.llm_provider().model_name()
        );
        observer(BatchEvent::Started { total: emails.len() });

        for (index, email) in emails.iter().enumerate() {
            match self.extractor.process(email).await {
                ExtractionOutcome::Extracted(record) => {
                    report.extracted += 1;
                    report.records.push(record);
                    observer(BatchEvent::Processed {
                        index,
                        email_id: &email.id,
                        failure: None,
                    });
                }
                ExtractionOutcome::Fallback { record, reason } => {
                    report.fallbacks += 1;
                    report.records.push(record);
                    observer(BatchEvent::Processed {
                        index,
                        email_id: &email.id,
                        failure: Some(&reason),
                    });
                }
                ExtractionOutcome::Halt { reason } => {
                    warn!(
                        "Rate limit reached at email {}/{} ('{}'), stopping batch",
                        index + 1,
                        emails.len(),
                        email.id
                    );
                    observer(BatchEvent::Halted {
                        index,
                        email_id: &email.id,
                        reason: &reason,
                    });
                    report.halted = Some(HaltReason {
                        email_id: email.id.clone(),
                        index,
                        reason,
                    });
                    break;
                }
            }
        }

        info!(
            "Batch complete: {} extracted, {} fallback, {} skipped in {}ms",
            report.extracted,
            report.fallbacks,
            emails.len() - report.records.len(),
            start.elapsed().as_millis()
        );

        report
    }

    /// Run the batch and write every collected record to `output`
    ///
    /// The write happens once, after the loop, including after a halt.
    pub async fn run_and_persist<F>(
        &self,
        emails: &[Email],
        output: &Path,
        observer: F,
    ) -> Result<BatchReport, ExtractorError>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let report = self.run_with_progress(emails, observer).await;
        write_records(output, &report.records)?;
        info!("Wrote {} records to {}", report.records.len(), output.display());
        Ok(report)
    }
}

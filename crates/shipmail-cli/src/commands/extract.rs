//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use indicatif::{ProgressBar, ProgressStyle};
use shipmail_domain::traits::LlmProvider;
use shipmail_domain::{Email, PortIndex};
use shipmail_extractor::{io, BatchEvent, BatchReport, BatchRunner, Extractor};
use shipmail_llm::{ChatCompletionsProvider, MockProvider};
use std::path::PathBuf;
use tracing::info;

/// Resolved inputs for one extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractPlan {
    /// Input emails
    pub emails: PathBuf,
    /// Port reference table
    pub ports: PathBuf,
    /// Output records
    pub output: PathBuf,
    /// Draw a progress bar
    pub progress: bool,
}

impl ExtractPlan {
    /// Merge command-line arguments over the configuration.
    pub fn resolve(args: &ExtractArgs, config: &Config) -> Self {
        Self {
            emails: args.emails.clone().unwrap_or_else(|| config.paths.emails.clone()),
            ports: args.ports.clone().unwrap_or_else(|| config.paths.ports.clone()),
            output: args.output.clone().unwrap_or_else(|| config.paths.output.clone()),
            progress: config.settings.progress && !args.no_progress,
        }
    }
}

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<BatchReport> {
    let mut config = config.clone();
    if let Some(model) = &args.model {
        config.oracle.model = model.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.oracle.endpoint = endpoint.clone();
    }
    config.validate()?;

    let plan = ExtractPlan::resolve(&args, &config);
    let references = io::load_port_references(&plan.ports)?;
    let emails = io::load_emails(&plan.emails)?;
    if references.is_empty() {
        eprintln!("{}", formatter.warning("Port reference table is empty; no codes will resolve"));
    }
    let ports = PortIndex::new(references);
    info!(
        "Loaded {} emails and {} port names",
        emails.len(),
        ports.len()
    );

    let report = match &args.mock {
        Some(reply) => {
            let extractor = Extractor::new(MockProvider::new(reply.clone()), ports, config.extractor.clone());
            run_batch(extractor, &emails, &plan, formatter).await?
        }
        None => {
            let api_key = match args.api_key {
                Some(key) => key,
                None => config.api_key_from_env()?,
            };
            let provider = ChatCompletionsProvider::new(config.oracle_config(api_key))?;
            let extractor = Extractor::new(provider, ports, config.extractor.clone());
            run_batch(extractor, &emails, &plan, formatter).await?
        }
    };

    println!("{}", formatter.batch_summary(&report, &plan.output));
    Ok(report)
}

async fn run_batch<L: LlmProvider>(
    extractor: Extractor<L>,
    emails: &[Email],
    plan: &ExtractPlan,
    formatter: &Formatter,
) -> Result<BatchReport> {
    let bar = progress_bar(emails.len(), plan.progress);
    let runner = BatchRunner::new(extractor);

    let report = runner
        .run_and_persist(emails, &plan.output, |event| match event {
            BatchEvent::Started { .. } => {}
            BatchEvent::Processed {
                email_id, failure, ..
            } => {
                if let Some(reason) = failure {
                    notify(&bar, formatter.warning(&format!("{}: {}", email_id, reason)));
                }
                bar.inc(1);
            }
            BatchEvent::Halted {
                email_id, reason, ..
            } => {
                notify(&bar, formatter.error(&format!("{}: {}", email_id, reason)));
            }
        })
        .await;

    bar.finish_and_clear();
    report.map_err(CliError::from)
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
        .map(|style| style.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

fn notify(bar: &ProgressBar, line: String) {
    if bar.is_hidden() {
        eprintln!("{}", line);
    } else {
        bar.println(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use shipmail_domain::{EmailExtraction, ProductLine};
    use std::fs;
    use std::path::Path;

    fn args(dir: &Path, mock: Option<&str>) -> ExtractArgs {
        ExtractArgs {
            emails: Some(dir.join("emails.json")),
            ports: Some(dir.join("ports.json")),
            output: Some(dir.join("out").join("output.json")),
            model: None,
            endpoint: None,
            api_key: None,
            mock: mock.map(str::to_string),
            no_progress: true,
        }
    }

    fn write_inputs(dir: &Path) {
        fs::write(
            dir.join("emails.json"),
            r#"[
                {"id": "E1", "subject": "LCL quote", "body": "Chennai to Singapore, 3 cbm"},
                {"id": "E2", "subject": "Import", "body": "Singapore to Chennai"}
            ]"#,
        )
        .unwrap();
        fs::write(
            dir.join("ports.json"),
            r#"[{"code": "INMAA", "name": "Chennai"}, {"code": "SGSIN", "name": "Singapore"}]"#,
        )
        .unwrap();
    }

    #[test]
    fn test_plan_prefers_arguments() {
        let config = Config::default();
        let dir = PathBuf::from("data");
        let plan = ExtractPlan::resolve(&args(&dir, None), &config);
        assert_eq!(plan.emails, dir.join("emails.json"));
        assert!(!plan.progress);

        let bare = ExtractArgs {
            emails: None,
            ports: None,
            output: None,
            model: None,
            endpoint: None,
            api_key: None,
            mock: None,
            no_progress: false,
        };
        let plan = ExtractPlan::resolve(&bare, &config);
        assert_eq!(plan.output, PathBuf::from("output.json"));
        assert!(plan.progress);
    }

    #[tokio::test]
    async fn test_mock_run_writes_records() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let reply = r#"{"origin_port_name": "Chennai", "destination_port_name": "Singapore", "cargo_cbm": 3}"#;
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = execute_extract(args(dir.path(), Some(reply)), &Config::default(), &formatter)
            .await
            .unwrap();

        assert_eq!(report.extracted, 2);
        let written: Vec<EmailExtraction> =
            io::load_json_array(&dir.path().join("out").join("output.json")).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].id, "E1");
        assert_eq!(written[0].product_line, Some(ProductLine::SeaExportLcl));
        assert_eq!(written[1].cargo_cbm, Some(3.0));
    }

    #[tokio::test]
    async fn test_missing_emails_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ports.json"), "[]").unwrap();

        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_extract(args(dir.path(), Some("{}")), &Config::default(), &formatter).await;
        assert!(matches!(result, Err(CliError::Extractor(_))));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());

        let mut config = Config::default();
        config.oracle.api_key_env = "SHIPMAIL_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_extract(args(dir.path(), None), &config, &formatter).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}

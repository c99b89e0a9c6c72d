//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use serde_json::Value;
use shipmail_extractor::io;
use shipmail_extractor::scoring::{self, ScoreReport};

/// Execute the evaluate command.
pub fn execute_evaluate(args: EvaluateArgs, config: &Config, formatter: &Formatter) -> Result<ScoreReport> {
    let output_path = args.output.unwrap_or_else(|| config.paths.output.clone());
    let truth_path = args.truth.unwrap_or_else(|| config.paths.ground_truth.clone());

    let output: Vec<Value> = io::load_json_array(&output_path)?;
    let truth: Vec<Value> = io::load_json_array(&truth_path)?;
    if output.len() != truth.len() {
        eprintln!(
            "{}",
            formatter.warning(&format!(
                "{} has {} records but {} has {}; comparing the first {}",
                output_path.display(),
                output.len(),
                truth_path.display(),
                truth.len(),
                output.len().min(truth.len())
            ))
        );
    }

    let report = scoring::score(&output, &truth);
    println!("{}", formatter.format_score(&report)?);
    Ok(report)
}

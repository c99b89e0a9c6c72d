//! Reading input arrays and writing the output file

use crate::error::ExtractorError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shipmail_domain::{Email, EmailExtraction, PortReference};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a JSON array of `T` from `path`
pub fn load_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExtractorError> {
    let contents = fs::read_to_string(path).map_err(|e| ExtractorError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| ExtractorError::io(path, format!("invalid JSON: {}", e)))
}

/// Load the input emails
pub fn load_emails(path: &Path) -> Result<Vec<Email>, ExtractorError> {
    let emails: Vec<Email> = load_json_array(path)?;
    info!("Loaded {} emails from {}", emails.len(), path.display());
    Ok(emails)
}

/// Load the port reference table, preserving file order
pub fn load_port_references(path: &Path) -> Result<Vec<PortReference>, ExtractorError> {
    let ports: Vec<PortReference> = load_json_array(path)?;
    info!("Loaded {} port references from {}", ports.len(), path.display());
    Ok(ports)
}

/// Write records as a pretty-printed JSON array in one write
pub fn write_records(path: &Path, records: &[EmailExtraction]) -> Result<(), ExtractorError> {
    write_pretty(path, records)
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExtractorError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExtractorError::io(parent, e))?;
    }

    let mut contents = serde_json::to_string_pretty(value)?;
    contents.push('\n');
    fs::write(path, contents).map_err(|e| ExtractorError::io(path, e))
}

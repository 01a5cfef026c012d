//! Loading submissions for the command-line surface

use crate::error::{ErrorCode, ErrorExt, IntakeError};
use chrono::NaiveDate;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Read an untyped patient record from a JSON or YAML file.
///
/// The format is chosen by extension; anything other than `.yml`/`.yaml` is
/// parsed as JSON.
pub fn load_record(path: &Path) -> Result<Value, IntakeError> {
    if !path.exists() {
        return Err(IntakeError::input_with_code(
            ErrorCode::INPUT_NOT_FOUND,
            "file does not exist",
            Some(path.to_path_buf()),
        ));
    }

    let content = std::fs::read_to_string(path).to_input_error(
        ErrorCode::INPUT_READ_FAILED,
        "failed to read file",
        path,
    )?;

    debug!("Loaded {} bytes from {}", content.len(), path.display());

    if is_yaml(path) {
        serde_yaml::from_str::<Value>(&content).to_input_error(
            ErrorCode::INPUT_INVALID_YAML,
            "invalid YAML",
            path,
        )
    } else {
        serde_json::from_str::<Value>(&content).to_input_error(
            ErrorCode::INPUT_INVALID_JSON,
            "invalid JSON",
            path,
        )
    }
}

/// Parse a `--today` override in `YYYY-MM-DD` form
pub fn parse_evaluation_date(raw: &str) -> Result<NaiveDate, IntakeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        IntakeError::input_with_code(
            ErrorCode::INPUT_INVALID_DATE,
            format!("'{}' is not a YYYY-MM-DD date", raw),
            None,
        )
        .with_source(e)
    })
}

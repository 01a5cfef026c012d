//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use clinic_intake::abstractions::FixedClock;
use clinic_intake::{IntakeValidation, IntakeValidator, Violation, ViolationKind};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub use clinic_intake::testing::{ContactInputBuilder, PatientInputBuilder};

/// Evaluation date shared by the integration suites
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

pub fn validator() -> IntakeValidator<FixedClock> {
    IntakeValidator::with_clock(FixedClock::new(today()))
}

/// Validate with default rules on [`today`], expecting a well-formed object
pub fn run(input: &Value) -> IntakeValidation {
    validator().validate(input).expect("input should be an object")
}

/// Violations of a rejected record; panics if the record was accepted
pub fn violations(input: &Value) -> Vec<Violation> {
    match run(input).into_result() {
        Ok(record) => panic!("expected rejection, got {:?}", record),
        Err(violations) => violations,
    }
}

/// `(path, kind)` pairs for compact assertions
pub fn summary(violations: &[Violation]) -> Vec<(String, ViolationKind)> {
    violations
        .iter()
        .map(|v| (v.path.to_string(), v.kind))
        .collect()
}

/// Temporary working directory holding record and config files
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    /// Write `content` to `name` relative to the workspace, creating parents
    pub fn write(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn write_json(&self, name: &str, value: &Value) -> Result<PathBuf> {
        self.write(name, &serde_json::to_string_pretty(value)?)
    }
}

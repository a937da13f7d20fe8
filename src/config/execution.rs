//! Execution configuration for update runs.
//!
//! This module defines the target test frequency and the options that control
//! how an update run is executed.

use std::fmt::{Display, Formatter};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default pause after each API request, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 50;

/// Recurring test frequency accepted by the Snyk API.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFrequency {
    /// Test every day
    Daily,

    /// Test every week
    Weekly,

    /// Disable recurring tests
    Never,
}

impl TestFrequency {
    /// Every accepted frequency, in prompt order.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Weekly, Self::Never];

    /// The value the API expects in `test_frequency`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Never => "never",
        }
    }
}

impl Display for TestFrequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for update execution behavior.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ExecutionOptions {
    /// Frequency to apply to every selected project
    pub frequency: TestFrequency,

    /// List matching projects without sending updates
    pub dry_run: bool,

    /// Pick projects from a multi-select prompt before updating
    pub interactive: bool,

    /// Leave projects already at the target frequency alone
    pub skip_unchanged: bool,
}

impl ExecutionOptions {
    /// Options for a plain run that updates every selected project.
    #[must_use]
    pub const fn new(frequency: TestFrequency) -> Self {
        Self {
            frequency,
            dry_run: false,
            interactive: false,
            skip_unchanged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_options_defaults() {
        let exec_opts = ExecutionOptions::new(TestFrequency::Weekly);

        assert_eq!(exec_opts.frequency, TestFrequency::Weekly);
        assert!(!exec_opts.dry_run);
        assert!(!exec_opts.interactive);
        assert!(!exec_opts.skip_unchanged);
    }

    #[test]
    fn test_frequency_strings() {
        assert_eq!(TestFrequency::Daily.as_str(), "daily");
        assert_eq!(TestFrequency::Weekly.to_string(), "weekly");
        assert_eq!(TestFrequency::Never.to_string(), "never");
    }

    #[test]
    fn test_frequency_serde() {
        let json = serde_json::to_string(&TestFrequency::Never).unwrap();
        assert_eq!(json, "\"never\"");

        let parsed: TestFrequency = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(parsed, TestFrequency::Daily);

        assert!(serde_json::from_str::<TestFrequency>("\"hourly\"").is_err());
    }
}

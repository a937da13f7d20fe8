//! Resolution of run settings from CLI/env values, the config file and
//! interactive prompts.

use std::fmt::{Debug, Formatter};

use anyhow::Result;
use inquire::{Password, PasswordDisplayMode, Select, Text};

use super::{FileConfig, TestFrequency};
use crate::error::OptionError;

/// API token and organization ID for a run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub org_id: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("org_id", &self.org_id)
            .finish()
    }
}

/// First non-blank value, trimmed.
fn first_present(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

fn missing(what: &str, hint: &str) -> anyhow::Error {
    OptionError::InvalidOption(format!("{what} is required ({hint})")).into()
}

impl Credentials {
    /// Resolve the token and organization ID.
    ///
    /// CLI/env values win over the config file. Anything still missing is
    /// prompted for when `allow_prompt` is set.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::InvalidOption`] if a value is missing and
    /// prompting is disabled or yields a blank answer, or the prompt error if
    /// the prompt itself fails.
    pub fn resolve(
        cli_token: Option<&str>,
        cli_org_id: Option<&str>,
        file: &FileConfig,
        allow_prompt: bool,
    ) -> Result<Self> {
        let token = match first_present(&[cli_token, file.token.as_deref()]) {
            Some(token) => token,
            None if allow_prompt => {
                let answer = Password::new("Enter your Snyk API token:")
                    .without_confirmation()
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .with_help_message("Set SNYK_TOKEN to skip this prompt")
                    .prompt()?;
                first_present(&[Some(answer.as_str())])
                    .ok_or_else(|| missing("API token", "got an empty answer"))?
            }
            None => return Err(missing("API token", "use --token or SNYK_TOKEN")),
        };

        let org_id = match first_present(&[cli_org_id, file.org_id.as_deref()]) {
            Some(org_id) => org_id,
            None if allow_prompt => {
                let answer = Text::new("Enter your Organization ID:").prompt()?;
                first_present(&[Some(answer.as_str())])
                    .ok_or_else(|| missing("Organization ID", "got an empty answer"))?
            }
            None => return Err(missing("Organization ID", "use --org-id or SNYK_ORG_ID")),
        };

        Ok(Self { token, org_id })
    }
}

/// Resolve the target test frequency: CLI, then config file, then prompt.
///
/// # Errors
///
/// Returns [`OptionError::InvalidOption`] if no frequency is configured and
/// prompting is disabled, or the prompt error if the prompt fails.
pub fn resolve_frequency(
    cli: Option<TestFrequency>,
    file: &FileConfig,
    allow_prompt: bool,
) -> Result<TestFrequency> {
    if let Some(frequency) = cli.or(file.frequency) {
        return Ok(frequency);
    }

    if !allow_prompt {
        return Err(missing("Test frequency", "use --frequency"));
    }

    let frequency = Select::new("Select the desired test frequency:", TestFrequency::ALL.to_vec())
        .with_help_message(
            "SAST and IaC projects can only be set to weekly or never unless your account team enables daily",
        )
        .prompt()?;

    Ok(frequency)
}

//! Filtering configuration for project selection.
//!
//! A run targets either one [`Category`] of project types or an explicit list
//! of project types.

use std::fmt::{Display, Formatter, Result};

use crate::classifier::{Category, IAC_TYPES, UNCATEGORIZED_TYPES, is_known_type, known_types};
use crate::error::OptionError;

/// Which projects a run should update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectFilter {
    /// Every project in one category (or every project, for [`Category::All`])
    Category(Category),

    /// Only projects whose type is in the list
    Types(Vec<String>),
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self::Category(Category::All)
    }
}

impl ProjectFilter {
    /// Build a filter from an explicit list of project types.
    ///
    /// Types are trimmed, lowercased and deduplicated; blank entries are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::InvalidOption`] if any type is unknown or the
    /// list is empty once blanks are removed.
    pub fn from_types<I, S>(types: I) -> std::result::Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected: Vec<String> = Vec::new();
        let mut invalid: Vec<String> = Vec::new();

        for t in types {
            let t = t.as_ref().trim().to_ascii_lowercase();
            if t.is_empty() {
                continue;
            }
            if !is_known_type(&t) {
                invalid.push(t);
            } else if !selected.contains(&t) {
                selected.push(t);
            }
        }

        if !invalid.is_empty() {
            return Err(OptionError::InvalidOption(format!(
                "unknown project type(s): {} (allowed: {})",
                invalid.join(", "),
                known_types().join(", ")
            )));
        }

        if selected.is_empty() {
            return Err(OptionError::InvalidOption(
                "--types needs at least one project type".to_string(),
            ));
        }

        Ok(Self::Types(selected))
    }

    /// Whether a project of the given type passes the filter.
    #[must_use]
    pub fn matches(&self, project_type: &str) -> bool {
        match self {
            Self::Category(category) => category.matches(project_type),
            Self::Types(types) => {
                let normalized = project_type.trim().to_ascii_lowercase();
                types.iter().any(|t| *t == normalized)
            }
        }
    }

    /// Types to pass to the list endpoint as a server-side filter.
    ///
    /// Empty means "no restriction".
    #[must_use]
    pub fn api_types(&self) -> Vec<&str> {
        match self {
            Self::Category(category) => category.api_types().to_vec(),
            Self::Types(types) => types.iter().map(String::as_str).collect(),
        }
    }

    /// Whether the filter can select IaC or SAST projects, which Snyk only
    /// lets most plans test weekly or never.
    #[must_use]
    pub fn may_include_weekly_only_types(&self) -> bool {
        match self {
            Self::Category(category) => matches!(category, Category::Iac | Category::All),
            Self::Types(types) => types.iter().any(|t| {
                IAC_TYPES.contains(&t.as_str()) || UNCATEGORIZED_TYPES.contains(&t.as_str())
            }),
        }
    }
}

impl Display for ProjectFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Category(category) => write!(f, "{category}"),
            Self::Types(types) => write!(f, "types: {}", types.join(", ")),
        }
    }
}

//! Project type classification.
//!
//! Snyk reports a free-form `type` string for every project (`npm`,
//! `terraformconfig`, `dockerfile`, ...). This module maps those strings onto
//! the coarse categories the CLI filters by.

use std::fmt::{Display, Formatter, Result};

/// Open source (software composition analysis) project types.
pub const SCA_TYPES: &[&str] = &[
    "nuget",
    "paket",
    "cpp",
    "hex",
    "golangdep",
    "govendor",
    "gomodules",
    "maven",
    "gradle",
    "npm",
    "pnpm",
    "yarn",
    "composer",
    "pip",
    "pipenv",
    "poetry",
    "rubygems",
    "sbt",
    "cocoapods",
];

/// Infrastructure-as-code project types.
pub const IAC_TYPES: &[&str] = &[
    "terraformconfig",
    "cloudformationconfig",
    "k8sconfig",
    "helmconfig",
    "armconfig",
];

/// Container project types.
pub const CONTAINER_TYPES: &[&str] = &["apk", "deb", "rpm", "linux", "dockerfile"];

/// Types Snyk knows about that belong to none of the categories above.
pub const UNCATEGORIZED_TYPES: &[&str] = &["sast"];

/// Coarse project category used for filtering.
///
/// `All` is a filter, not a classification: [`classify`] never returns it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Category {
    /// Open source dependency projects (npm, maven, pip, ...)
    Sca,

    /// Infrastructure-as-code projects (Terraform, Kubernetes, ...)
    Iac,

    /// Container image and Dockerfile projects
    Container,

    /// Every project, whatever its type
    All,
}

impl Category {
    /// The project types belonging to this category.
    ///
    /// Empty for [`Category::All`], which places no restriction on the type.
    #[must_use]
    pub const fn api_types(self) -> &'static [&'static str] {
        match self {
            Self::Sca => SCA_TYPES,
            Self::Iac => IAC_TYPES,
            Self::Container => CONTAINER_TYPES,
            Self::All => &[],
        }
    }

    /// Whether a project of the given type falls into this category.
    #[must_use]
    pub fn matches(self, project_type: &str) -> bool {
        match self {
            Self::All => true,
            category => classify(project_type) == Some(category),
        }
    }

    /// Human-readable label, as used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sca => "open source",
            Self::Iac => "IaC",
            Self::Container => "container",
            Self::All => "all",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.label())
    }
}

/// Map a Snyk project type onto its category.
///
/// Matching ignores ASCII case and surrounding whitespace. Returns `None` for
/// types that are unknown or known but uncategorized (such as `sast`).
#[must_use]
pub fn classify(project_type: &str) -> Option<Category> {
    let normalized = project_type.trim().to_ascii_lowercase();
    let normalized = normalized.as_str();

    if SCA_TYPES.contains(&normalized) {
        Some(Category::Sca)
    } else if IAC_TYPES.contains(&normalized) {
        Some(Category::Iac)
    } else if CONTAINER_TYPES.contains(&normalized) {
        Some(Category::Container)
    } else {
        None
    }
}

/// Whether the type is one Snyk is known to report.
#[must_use]
pub fn is_known_type(project_type: &str) -> bool {
    let normalized = project_type.trim().to_ascii_lowercase();
    classify(&normalized).is_some() || UNCATEGORIZED_TYPES.contains(&normalized.as_str())
}

/// Every known project type, sorted, for help and error messages.
#[must_use]
pub fn known_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = SCA_TYPES
        .iter()
        .chain(IAC_TYPES)
        .chain(CONTAINER_TYPES)
        .chain(UNCATEGORIZED_TYPES)
        .copied()
        .collect();
    types.sort_unstable();
    types
}

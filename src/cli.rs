use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser};
use snyk_test_frequency::{
    api::DEFAULT_API_HOST,
    classifier::Category,
    config::{DEFAULT_DELAY_MS, ExecutionOptions, FileConfig, ProjectFilter, TestFrequency},
    error::OptionError,
};

#[derive(Args)]
#[group(id = "project_types", required = true, multiple = false)]
struct ProjectTypeArgs {
    /// Update only open source (SCA) projects
    #[arg(long)]
    sca: bool,

    /// Update only infrastructure-as-code projects
    #[arg(long)]
    iac: bool,

    /// Update only container projects
    #[arg(long)]
    container: bool,

    /// Update every project, whatever its type
    #[arg(long)]
    all_types: bool,

    /// Update only the listed project types (comma-separated, e.g. npm,maven)
    #[arg(long, value_delimiter = ',', value_name = "TYPES")]
    types: Vec<String>,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Snyk API token
    #[arg(long, env = "SNYK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Snyk organization ID
    #[arg(long, env = "SNYK_ORG_ID")]
    org_id: Option<String>,

    /// Snyk API host (e.g. https://api.eu.snyk.io for the EU region)
    #[arg(long, env = "SNYK_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Pause after each API request, in milliseconds [default: 50]
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
struct ExecutionArgs {
    /// Test frequency to apply
    #[arg(short = 'f', long, value_enum)]
    frequency: Option<TestFrequency>,

    /// Just list the matching projects; send no updates
    #[arg(long)]
    dry_run: bool,

    /// Use interactive project selection
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Don't update projects already at the requested frequency
    #[arg(long)]
    skip_unchanged: bool,

    /// Never prompt; fail if a required value is missing
    #[arg(long)]
    no_input: bool,
}

#[derive(Args)]
struct OutputArgs {
    /// Print a single JSON report on stdout
    #[arg(long)]
    json: bool,

    /// Print debug logs on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Parser)]
#[command(name = "snyk-test-frequency", version)]
#[command(about = "Bulk-update the recurring test frequency of Snyk projects by project type")]
pub(crate) struct Cli {
    /// Project types to update
    #[command(flatten)]
    project_type: ProjectTypeArgs,

    /// Credentials and API settings
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Execution options
    #[command(flatten)]
    execution: ExecutionArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// The filter selected by the category flags.
    pub(crate) fn project_filter(&self) -> Result<ProjectFilter, OptionError> {
        let args = &self.project_type;

        if args.sca {
            Ok(ProjectFilter::Category(Category::Sca))
        } else if args.iac {
            Ok(ProjectFilter::Category(Category::Iac))
        } else if args.container {
            Ok(ProjectFilter::Category(Category::Container))
        } else if args.all_types {
            Ok(ProjectFilter::Category(Category::All))
        } else {
            ProjectFilter::from_types(&args.types)
        }
    }

    /// The explicit `--config` path, if any.
    pub(crate) fn config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub(crate) fn token(&self) -> Option<&str> {
        self.connection.token.as_deref()
    }

    pub(crate) fn org_id(&self) -> Option<&str> {
        self.connection.org_id.as_deref()
    }

    pub(crate) const fn frequency(&self) -> Option<TestFrequency> {
        self.execution.frequency
    }

    pub(crate) fn api_url(&self, file_config: &FileConfig) -> String {
        self.connection
            .api_url
            .clone()
            .or_else(|| file_config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
    }

    pub(crate) fn request_delay(&self, file_config: &FileConfig) -> Duration {
        Duration::from_millis(
            self.connection
                .delay_ms
                .or(file_config.delay_ms)
                .unwrap_or(DEFAULT_DELAY_MS),
        )
    }

    pub(crate) const fn execution_options(&self, frequency: TestFrequency) -> ExecutionOptions {
        ExecutionOptions {
            frequency,
            dry_run: self.execution.dry_run,
            interactive: self.execution.interactive,
            skip_unchanged: self.execution.skip_unchanged,
        }
    }

    pub(crate) const fn interactive(&self) -> bool {
        self.execution.interactive
    }

    pub(crate) const fn allow_prompt(&self) -> bool {
        !self.execution.no_input
    }

    pub(crate) const fn json(&self) -> bool {
        self.output.json
    }

    pub(crate) const fn verbose(&self) -> bool {
        self.output.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("snyk-test-frequency").chain(args.iter().copied()))
    }

    #[test]
    fn test_each_category_flag() {
        for (flag, category) in [
            ("--sca", Category::Sca),
            ("--iac", Category::Iac),
            ("--container", Category::Container),
            ("--all-types", Category::All),
        ] {
            let cli = parse(&[flag]).unwrap();
            assert_eq!(cli.project_filter().unwrap(), ProjectFilter::Category(category));
        }
    }

    #[test]
    fn test_missing_category_flag_is_rejected() {
        let err = parse(&[]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = parse(&["--frequency", "weekly"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_conflicting_category_flags_are_rejected() {
        let err = parse(&["--sca", "--iac"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let err = parse(&["--all-types", "--types", "npm"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(&["--sca", "--everything"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_types_list() {
        let cli = parse(&["--types", "npm,Maven"]).unwrap();
        assert_eq!(
            cli.project_filter().unwrap(),
            ProjectFilter::Types(vec!["npm".to_string(), "maven".to_string()])
        );

        let cli = parse(&["--types", "npm,cobol"]).unwrap();
        assert!(cli.project_filter().is_err());
    }

    #[test]
    fn test_frequency_values() {
        let cli = parse(&["--sca", "-f", "never"]).unwrap();
        assert_eq!(cli.frequency(), Some(TestFrequency::Never));

        assert!(parse(&["--sca", "--frequency", "hourly"]).is_err());
    }

    #[test]
    fn test_execution_options() {
        let cli = parse(&["--iac", "--dry-run", "--skip-unchanged", "-i"]).unwrap();
        let options = cli.execution_options(TestFrequency::Weekly);

        assert!(options.dry_run);
        assert!(options.interactive);
        assert!(options.skip_unchanged);
        assert_eq!(options.frequency, TestFrequency::Weekly);
    }

    #[test]
    fn test_api_url_and_delay_layering() {
        let file_config = FileConfig {
            api_url: Some("https://api.eu.snyk.io".to_string()),
            delay_ms: Some(200),
            ..FileConfig::default()
        };

        let cli = parse(&["--sca", "--api-url", "https://api.au.snyk.io", "--delay-ms", "0"]).unwrap();
        assert_eq!(cli.api_url(&file_config), "https://api.au.snyk.io");
        assert_eq!(cli.request_delay(&file_config), Duration::ZERO);

        let cli = parse(&["--sca"]).unwrap();
        assert_eq!(cli.request_delay(&FileConfig::default()), Duration::from_millis(DEFAULT_DELAY_MS));
        assert_eq!(cli.request_delay(&file_config), Duration::from_millis(200));
    }

    #[test]
    fn test_no_input() {
        assert!(parse(&["--sca"]).unwrap().allow_prompt());
        assert!(!parse(&["--sca", "--no-input"]).unwrap().allow_prompt());
    }
}

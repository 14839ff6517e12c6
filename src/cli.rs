use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::http::{DEFAULT_MAX_ATTEMPTS, DEFAULT_TIMEOUT_SECS};
use crate::types::MatchMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "zh-move")]
#[command(
    about = "Move the ZenHub cards of issues closed by a pull request to a pipeline",
    version
)]
#[command(after_help = "EXAMPLES:
    zh-move run --pr-url https://github.com/org/repo/pull/5 --zh-target-pipeline-name Done
    zh-move run --pr-url https://github.com/org/repo/pull/5 --zh-target-pipeline-id 5e1f...
    zh-move completions bash > ~/.bash_completion.d/zh-move")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress the move summary
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Move the cards of every issue a pull request closes
    #[command(after_help = "EXAMPLES:
    zh-move run --pr-url https://github.com/org/repo/pull/5 --zh-target-pipeline-name Done
    zh-move run --pr-url https://github.com/org/repo/pull/5 --zh-target-pipeline-name Done --pipeline-match exact

Inputs can also be passed the way GitHub Actions does, e.g. INPUT_ZH-TOKEN.")]
    Run(RunArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    zh-move completions bash > ~/.bash_completion.d/zh-move
    zh-move completions zsh > ~/.zfunc/_zh-move
    zh-move completions fish > ~/.config/fish/completions/zh-move.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// ZenHub API token (falls back to ZENHUB_TOKEN, then the config file)
    #[arg(long, env = "INPUT_ZH-TOKEN", hide_env_values = true)]
    pub zh_token: Option<String>,

    /// ZenHub workspace id
    #[arg(long = "zh-workspace-id", env = "INPUT_ZH-WORKSPACE-ID")]
    pub workspace_id: Option<String>,

    /// Pull request URL, e.g. https://github.com/org/repo/pull/5
    #[arg(long, env = "INPUT_PR-URL")]
    pub pr_url: Option<String>,

    /// Target pipeline id (takes precedence over --zh-target-pipeline-name)
    #[arg(long = "zh-target-pipeline-id", env = "INPUT_ZH-TARGET-PIPELINE-ID")]
    pub pipeline_id: Option<String>,

    /// Target pipeline name, looked up on the repository board
    #[arg(long = "zh-target-pipeline-name", env = "INPUT_ZH-TARGET-PIPELINE-NAME")]
    pub pipeline_name: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, then the config file)
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository id used when an issue carries none, and for the board lookup
    #[arg(long = "zh-repo-id", env = "INPUT_ZH-REPO-ID")]
    pub repo_id: Option<String>,

    /// How --zh-target-pipeline-name is compared to pipeline names
    #[arg(long, env = "INPUT_PIPELINE-MATCH", value_enum, default_value_t = MatchMode::Substring)]
    pub pipeline_match: MatchMode,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Attempts per request, including the first, for transient failures
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..=10))]
    pub max_attempts: u32,

    /// GitHub GraphQL endpoint
    #[arg(long)]
    pub github_graphql_url: Option<String>,

    /// ZenHub API base URL
    #[arg(long)]
    pub zenhub_api_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "zh-move",
            "run",
            "--zh-workspace-id",
            "ws",
            "--pr-url",
            "https://github.com/org/repo/pull/5",
            "--zh-target-pipeline-name",
            "Done",
            "--pipeline-match",
            "exact",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.output_format(), OutputFormat::Json);
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.workspace_id.as_deref(), Some("ws"));
        assert_eq!(args.pipeline_name.as_deref(), Some("Done"));
        assert_eq!(args.pipeline_match, MatchMode::Exact);
        assert_eq!(args.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[rstest]
    #[case("--max-attempts")]
    #[case("--timeout-secs")]
    fn rejects_zero_for_bounded_flags(#[case] flag: &str) {
        let result = Cli::try_parse_from(["zh-move", "run", flag, "0"]);
        assert!(result.is_err());
    }
}

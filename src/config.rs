use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::cli::RunArgs;
use crate::client::GITHUB_GRAPHQL_ENDPOINT;
use crate::error::{MoverError, Result};
use crate::http::HttpSettings;
use crate::types::{MatchMode, PipelineTarget};
use crate::zenhub::ZENHUB_API_ENDPOINT;

pub const ZENHUB_TOKEN_ENV: &str = "ZENHUB_TOKEN";
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Optional defaults read from `zh-move/config.toml` in the user config dir.
#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub zh_token: Option<String>,
    pub github_token: Option<String>,
    pub workspace_id: Option<String>,
    pub zenhub_api_url: Option<String>,
    pub github_graphql_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| MoverError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| MoverError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "zh-move")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(MoverError::NoConfigDir)
    }
}

/// Validated inputs for one invocation.
pub struct Inputs {
    pub zh_token: String,
    pub workspace_id: String,
    pub pr_url: String,
    pub target: PipelineTarget,
    pub github_token: String,
    pub repo_id: Option<String>,
    pub match_mode: MatchMode,
}

impl fmt::Debug for Inputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inputs")
            .field("zh_token", &"<redacted>")
            .field("workspace_id", &self.workspace_id)
            .field("pr_url", &self.pr_url)
            .field("target", &self.target)
            .field("github_token", &"<redacted>")
            .field("repo_id", &self.repo_id)
            .field("match_mode", &self.match_mode)
            .finish()
    }
}

/// Actions passes unset inputs as empty strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Inputs {
    /// Resolve inputs with flags (or `INPUT_*` variables) taking precedence
    /// over plain env vars, then the config file.
    ///
    /// The pipeline target is checked first so a run without one fails before
    /// anything else is looked at.
    pub fn resolve<E>(args: &RunArgs, config: &Config, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let target = PipelineTarget::from_inputs(
            non_empty(args.pipeline_id.clone()),
            non_empty(args.pipeline_name.clone()),
        )
        .ok_or(MoverError::MissingPipelineTarget)?;

        let zh_token = non_empty(args.zh_token.clone())
            .or_else(|| non_empty(env(ZENHUB_TOKEN_ENV)))
            .or_else(|| non_empty(config.zh_token.clone()))
            .ok_or(MoverError::MissingInput("zh-token"))?;

        let workspace_id = non_empty(args.workspace_id.clone())
            .or_else(|| non_empty(config.workspace_id.clone()))
            .ok_or(MoverError::MissingInput("zh-workspace-id"))?;

        let pr_url =
            non_empty(args.pr_url.clone()).ok_or(MoverError::MissingInput("pr-url"))?;

        let github_token = non_empty(args.github_token.clone())
            .or_else(|| non_empty(env(GITHUB_TOKEN_ENV)))
            .or_else(|| non_empty(config.github_token.clone()))
            .ok_or(MoverError::MissingInput("github-token"))?;

        Ok(Self {
            zh_token,
            workspace_id,
            pr_url,
            target,
            github_token,
            repo_id: non_empty(args.repo_id.clone()),
            match_mode: args.pipeline_match,
        })
    }
}

/// API base URLs, overridable for GitHub Enterprise or proxies.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub github_graphql: Url,
    pub zenhub_api: Url,
}

impl Endpoints {
    pub fn resolve(args: &RunArgs, config: &Config) -> Result<Self> {
        let github = non_empty(args.github_graphql_url.clone())
            .or_else(|| non_empty(config.github_graphql_url.clone()))
            .unwrap_or_else(|| GITHUB_GRAPHQL_ENDPOINT.to_string());
        let zenhub = non_empty(args.zenhub_api_url.clone())
            .or_else(|| non_empty(config.zenhub_api_url.clone()))
            .unwrap_or_else(|| ZENHUB_API_ENDPOINT.to_string());

        Ok(Self {
            github_graphql: parse_url(&github)?,
            zenhub_api: parse_url(&zenhub)?,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| MoverError::InvalidUrl(format!("{raw}: {e}")))
}

impl RunArgs {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.timeout_secs),
            max_attempts: self.max_attempts,
            ..HttpSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[fixture]
    fn args() -> RunArgs {
        RunArgs {
            zh_token: Some("zh-secret".into()),
            workspace_id: Some("ws".into()),
            pr_url: Some("https://github.com/org/repo/pull/5".into()),
            pipeline_id: Some("p1".into()),
            pipeline_name: None,
            github_token: Some("gh-secret".into()),
            repo_id: None,
            ..RunArgs::default()
        }
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), Some(""))]
    #[case(Some("  "), None)]
    fn missing_pipeline_target_is_rejected(
        mut args: RunArgs,
        #[case] id: Option<&str>,
        #[case] name: Option<&str>,
    ) {
        args.pipeline_id = id.map(String::from);
        args.pipeline_name = name.map(String::from);
        // Missing tokens too: the target check must come first.
        args.zh_token = None;

        let err = Inputs::resolve(&args, &Config::default(), no_env).unwrap_err();
        assert!(matches!(err, MoverError::MissingPipelineTarget));
    }

    #[rstest]
    fn id_wins_over_name(mut args: RunArgs) {
        args.pipeline_name = Some("Done".into());
        let inputs = Inputs::resolve(&args, &Config::default(), no_env).unwrap();
        assert_eq!(inputs.target, PipelineTarget::Id("p1".into()));
    }

    #[rstest]
    fn empty_id_falls_back_to_name(mut args: RunArgs) {
        args.pipeline_id = Some(String::new());
        args.pipeline_name = Some("Done".into());
        let inputs = Inputs::resolve(&args, &Config::default(), no_env).unwrap();
        assert_eq!(inputs.target, PipelineTarget::Name("Done".into()));
    }

    #[rstest]
    fn tokens_fall_back_to_env_then_config(mut args: RunArgs) {
        args.zh_token = Some(String::new());
        args.github_token = None;
        let config = Config {
            zh_token: Some("from-file".into()),
            github_token: Some("gh-from-file".into()),
            ..Config::default()
        };
        let env = |key: &str| (key == GITHUB_TOKEN_ENV).then(|| "gh-from-env".to_string());

        let inputs = Inputs::resolve(&args, &config, env).unwrap();
        assert_eq!(inputs.zh_token, "from-file");
        assert_eq!(inputs.github_token, "gh-from-env");
    }

    #[rstest]
    #[case::zh_token("zh-token")]
    #[case::workspace("zh-workspace-id")]
    #[case::pr_url("pr-url")]
    #[case::github_token("github-token")]
    fn required_inputs_are_reported_by_name(mut args: RunArgs, #[case] missing: &str) {
        match missing {
            "zh-token" => args.zh_token = None,
            "zh-workspace-id" => args.workspace_id = None,
            "pr-url" => args.pr_url = None,
            _ => args.github_token = None,
        }

        let err = Inputs::resolve(&args, &Config::default(), no_env).unwrap_err();
        match err {
            MoverError::MissingInput(name) => assert_eq!(name, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn debug_output_redacts_tokens(args: RunArgs) {
        let inputs = Inputs::resolve(&args, &Config::default(), no_env).unwrap();
        let rendered = format!("{inputs:?}");
        assert!(!rendered.contains("zh-secret"));
        assert!(!rendered.contains("gh-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn endpoints_default_to_public_apis(args: RunArgs) {
        let endpoints = Endpoints::resolve(&args, &Config::default()).unwrap();
        assert_eq!(endpoints.github_graphql.as_str(), GITHUB_GRAPHQL_ENDPOINT);
        assert_eq!(endpoints.zenhub_api.as_str(), "https://api.zenhub.com/");
    }

    #[rstest]
    fn invalid_endpoint_is_rejected(mut args: RunArgs) {
        args.zenhub_api_url = Some("not a url".into());
        let err = Endpoints::resolve(&args, &Config::default()).unwrap_err();
        assert!(matches!(err, MoverError::InvalidUrl(_)));
    }

    #[test]
    fn config_file_parses() {
        let config: Config = toml::from_str(
            r#"
            zh_token = "zh"
            workspace_id = "ws"
            zenhub_api_url = "https://zh.internal"
            "#,
        )
        .unwrap();
        assert_eq!(config.zh_token.as_deref(), Some("zh"));
        assert_eq!(config.workspace_id.as_deref(), Some("ws"));
        assert!(config.github_token.is_none());
    }
}

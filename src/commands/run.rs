use tracing::{debug, info};

use crate::cli::RunArgs;
use crate::client::GitHubClient;
use crate::config::{Config, Endpoints, Inputs};
use crate::error::{MoverError, Result};
use crate::http::HttpSettings;
use crate::output::Printer;
use crate::types::{MoveOutcome, PipelineTarget};
use crate::zenhub::ZenHubClient;

use super::{issues, moves, pipelines};

pub async fn run(args: RunArgs, config: &Config, printer: &Printer) -> Result<()> {
    let inputs = Inputs::resolve(&args, config, |key| std::env::var(key).ok())?;
    debug!("Inputs: {inputs:?}");

    let endpoints = Endpoints::resolve(&args, config)?;
    let outcomes = execute(&inputs, &endpoints, args.http_settings()).await?;

    printer.print_outcomes(&outcomes);
    summarize(&outcomes)
}

/// Resolve issues and the pipeline, then move every card.
///
/// Resolution failures abort before any card moves. Per-card failures are
/// returned in the outcomes for the caller to report.
pub async fn execute(
    inputs: &Inputs,
    endpoints: &Endpoints,
    settings: HttpSettings,
) -> Result<Vec<MoveOutcome>> {
    let github = GitHubClient::new(
        &inputs.github_token,
        endpoints.github_graphql.clone(),
        settings,
    )?;
    let linked = issues::resolve(&github, &inputs.pr_url).await?;

    let board = ZenHubClient::new(&inputs.zh_token, endpoints.zenhub_api.clone(), settings)?;

    let board_repo = inputs
        .repo_id
        .as_deref()
        .or_else(|| linked.iter().find_map(|i| i.repository_id.as_deref()));

    // A name can only be checked against a board when some repository is known.
    let can_resolve = board_repo.is_some() || matches!(inputs.target, PipelineTarget::Id(_));
    if linked.is_empty() && !can_resolve {
        info!("{} closes no issues, nothing to move", inputs.pr_url);
        return Ok(Vec::new());
    }

    let pipeline_id = pipelines::resolve(
        &board,
        &inputs.target,
        board_repo,
        &inputs.workspace_id,
        inputs.match_mode,
    )
    .await?;

    if linked.is_empty() {
        info!("{} closes no issues, nothing to move", inputs.pr_url);
        return Ok(Vec::new());
    }

    Ok(moves::move_all(
        &board,
        &linked,
        &inputs.workspace_id,
        &pipeline_id,
        inputs.repo_id.as_deref(),
    )
    .await)
}

fn summarize(outcomes: &[MoveOutcome]) -> Result<()> {
    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        return Err(MoverError::MovesFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

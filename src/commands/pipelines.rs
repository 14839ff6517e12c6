use tracing::info;

use crate::error::{MoverError, Result};
use crate::types::{MatchMode, PipelineTarget};
use crate::zenhub::ZenHubClient;

/// Id of the pipeline cards should move to.
///
/// An explicit id is returned as-is, without checking the board. A name is
/// looked up on the board of `repo_id`; the first pipeline in board order that
/// matches wins.
pub async fn resolve(
    board: &ZenHubClient,
    target: &PipelineTarget,
    repo_id: Option<&str>,
    workspace_id: &str,
    mode: MatchMode,
) -> Result<String> {
    let name = match target {
        PipelineTarget::Id(id) => return Ok(id.clone()),
        PipelineTarget::Name(name) => name,
    };

    let repo_id = repo_id.ok_or(MoverError::MissingRepositoryId)?;
    let current = board.board(workspace_id, repo_id).await?;

    let pipeline = current
        .find(name, mode)
        .ok_or_else(|| MoverError::PipelineNotFound(name.clone()))?;

    info!(
        pipeline_id = %pipeline.id,
        "resolved pipeline {name:?} ({mode} match) to {:?}",
        pipeline.name
    );

    Ok(pipeline.id.clone())
}

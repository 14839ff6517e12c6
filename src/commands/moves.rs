use futures::future::join_all;
use tracing::{error, info};

use crate::error::{MoverError, Result};
use crate::types::{LinkedIssue, MoveOutcome, MoveRequest, Position};
use crate::zenhub::ZenHubClient;

/// Move one card to the top of `request.pipeline_id`.
pub async fn move_card(board: &ZenHubClient, request: &MoveRequest) -> Result<u16> {
    board
        .move_issue(request)
        .await
        .map_err(|e| MoverError::MoveFailed {
            issue: request.issue_number,
            pipeline_id: request.pipeline_id.clone(),
            source: Box::new(e),
        })
}

/// Move the card of every issue concurrently and wait for all of them.
///
/// Each issue's own repository id is used; `fallback_repo_id` only covers
/// issues that carry none. One failed move never stops the others.
pub async fn move_all(
    board: &ZenHubClient,
    issues: &[LinkedIssue],
    workspace_id: &str,
    pipeline_id: &str,
    fallback_repo_id: Option<&str>,
) -> Vec<MoveOutcome> {
    let moves = issues.iter().map(|issue| async move {
        let repository_id = issue
            .repository_id
            .as_deref()
            .or(fallback_repo_id)
            .map(String::from);

        let result = match &repository_id {
            Some(repo) => {
                let request = MoveRequest {
                    repository_id: repo.clone(),
                    workspace_id: workspace_id.to_string(),
                    issue_number: issue.number,
                    pipeline_id: pipeline_id.to_string(),
                    position: Position::Top,
                };
                move_card(board, &request).await
            }
            None => Err(MoverError::MoveFailed {
                issue: issue.number,
                pipeline_id: pipeline_id.to_string(),
                source: Box::new(MoverError::MissingRepositoryId),
            }),
        };

        match &result {
            Ok(_) => info!(
                "move issue {} in {} to {pipeline_id}",
                issue.number,
                repository_id.as_deref().unwrap_or("-")
            ),
            Err(e) => error!(issue = issue.number, pipeline_id, "{e}"),
        }

        MoveOutcome {
            issue_number: issue.number,
            repository_id,
            pipeline_id: pipeline_id.to_string(),
            result,
        }
    });

    join_all(moves).await
}

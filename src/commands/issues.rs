use serde_json::json;
use tracing::{debug, info};

use crate::client::GitHubClient;
use crate::error::{MoverError, Result};
use crate::responses::IssueNumbersResponse;
use crate::types::LinkedIssue;

const ISSUE_NUMBERS_QUERY: &str = r#"
query getIssueNumbers($url: URI!) {
    resource(url: $url) {
        ... on PullRequest {
            closingIssuesReferences(first: 10) {
                nodes {
                    number
                    repository {
                        id
                    }
                }
            }
        }
    }
}
"#;

/// Issues the pull request at `pr_url` closes. Only the first 10 are fetched.
pub async fn resolve(client: &GitHubClient, pr_url: &str) -> Result<Vec<LinkedIssue>> {
    let variables = json!({ "url": pr_url });

    let response = match client
        .query::<IssueNumbersResponse>(ISSUE_NUMBERS_QUERY, Some(variables))
        .await
    {
        Ok(response) => response,
        Err(MoverError::EmptyResponse) => {
            debug!("GraphQL response carried no data");
            IssueNumbersResponse::default()
        }
        Err(e) => return Err(MoverError::IssueResolution(Box::new(e))),
    };

    let issues = response.into_linked_issues();
    info!(
        count = issues.len(),
        "{pr_url} closes: {}",
        issues
            .iter()
            .map(|i| format!("#{}", i.number))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(issues)
}

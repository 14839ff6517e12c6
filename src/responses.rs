//! GraphQL response shapes for the closing-issues query.
//!
//! Every level is optional: a URL that does not resolve to a pull request
//! simply yields no nodes.

use serde::Deserialize;

use crate::types::LinkedIssue;

#[derive(Deserialize, Default)]
pub struct IssueNumbersResponse {
    #[serde(default)]
    pub resource: Option<PullRequestResource>,
}

#[derive(Deserialize, Default)]
pub struct PullRequestResource {
    #[serde(rename = "closingIssuesReferences", default)]
    pub closing_issues_references: Option<IssueConnection>,
}

#[derive(Deserialize, Default)]
pub struct IssueConnection {
    #[serde(default)]
    pub nodes: Option<Vec<Option<IssueNode>>>,
}

#[derive(Deserialize)]
pub struct IssueNode {
    pub number: u64,
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
}

#[derive(Deserialize)]
pub struct RepositoryRef {
    pub id: String,
}

impl IssueNumbersResponse {
    pub fn into_linked_issues(self) -> Vec<LinkedIssue> {
        self.resource
            .and_then(|r| r.closing_issues_references)
            .and_then(|c| c.nodes)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .map(|node| LinkedIssue {
                number: node.number,
                repository_id: node.repository.map(|r| r.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Vec<LinkedIssue> {
        serde_json::from_value::<IssueNumbersResponse>(value)
            .unwrap()
            .into_linked_issues()
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "resource": null }))]
    #[case(json!({ "resource": {} }))]
    #[case(json!({ "resource": { "closingIssuesReferences": null } }))]
    #[case(json!({ "resource": { "closingIssuesReferences": {} } }))]
    #[case(json!({ "resource": { "closingIssuesReferences": { "nodes": null } } }))]
    #[case(json!({ "resource": { "closingIssuesReferences": { "nodes": [] } } }))]
    fn missing_paths_yield_no_issues(#[case] value: serde_json::Value) {
        assert!(parse(value).is_empty());
    }

    #[test]
    fn collects_nodes_in_order_and_skips_nulls() {
        let issues = parse(json!({
            "resource": { "closingIssuesReferences": { "nodes": [
                { "number": 42, "repository": { "id": "r9" } },
                null,
                { "number": 7, "repository": null }
            ] } }
        }));

        assert_eq!(
            issues,
            vec![
                LinkedIssue {
                    number: 42,
                    repository_id: Some("r9".into())
                },
                LinkedIssue {
                    number: 7,
                    repository_id: None
                },
            ]
        );
    }
}

//! REST client for the ZenHub board API.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use url::Url;

use crate::error::{MoverError, Result};
use crate::http::{self, HttpSettings};
use crate::types::{Board, MoveRequest};

pub const ZENHUB_API_ENDPOINT: &str = "https://api.zenhub.com";

// HeaderName::from_static requires lowercase
const AUTH_HEADER: &str = "x-authentication-token";

/// Board API client. The token is attached to every request it sends.
pub struct ZenHubClient {
    http: Client,
    settings: HttpSettings,
    base: Url,
}

impl ZenHubClient {
    pub fn new(token: &str, base: Url, settings: HttpSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth =
            HeaderValue::from_str(token).map_err(|_| MoverError::InvalidToken("zh-token"))?;
        auth.set_sensitive(true);
        headers.insert(AUTH_HEADER, auth);

        Ok(Self {
            http: http::build_client(&settings, headers)?,
            settings,
            base,
        })
    }

    fn repository_url(&self, workspace_id: &str, repo_id: &str, tail: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| MoverError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["p2", "workspaces", workspace_id, "repositories", repo_id])
            .extend(tail);
        Ok(url)
    }

    /// Fetch the board of a repository within a workspace.
    pub async fn board(&self, workspace_id: &str, repo_id: &str) -> Result<Board> {
        let url = self.repository_url(workspace_id, repo_id, &["board"])?;

        let response = http::send(&self.http, &self.settings, || self.http.get(url.clone())).await?;

        Ok(response.json().await?)
    }

    /// Move an issue's card, returning the HTTP status of the response.
    pub async fn move_issue(&self, request: &MoveRequest) -> Result<u16> {
        let issue = request.issue_number.to_string();
        let url = self.repository_url(
            &request.workspace_id,
            &request.repository_id,
            &["issues", &issue, "moves"],
        )?;

        let response = http::send(&self.http, &self.settings, || {
            self.http.post(url.clone()).json(&request.body())
        })
        .await?;

        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ZenHubClient {
        ZenHubClient::new("zh", Url::parse(base).unwrap(), HttpSettings::default()).unwrap()
    }

    #[test]
    fn builds_board_url_under_base_path() {
        let url = client("https://zh.example.com/")
            .repository_url("ws1", "r9", &["board"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://zh.example.com/p2/workspaces/ws1/repositories/r9/board"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let url = client("https://proxy.example.com/zenhub")
            .repository_url("ws1", "r9", &["issues", "42", "moves"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example.com/zenhub/p2/workspaces/ws1/repositories/r9/issues/42/moves"
        );
    }

    #[test]
    fn escapes_path_segments() {
        let url = client("https://zh.example.com")
            .repository_url("ws/1", "R_kg==", &["board"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://zh.example.com/p2/workspaces/ws%2F1/repositories/R_kg==/board"
        );
    }
}

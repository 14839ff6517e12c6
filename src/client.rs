use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use url::Url;

use crate::error::{MoverError, Result};
use crate::http::{self, HttpSettings};

pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// GraphQL client for the code host, authenticated with a bearer token.
pub struct GitHubClient {
    http: Client,
    settings: HttpSettings,
    endpoint: Url,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl GitHubClient {
    pub fn new(token: &str, endpoint: Url, settings: HttpSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| MoverError::InvalidToken("github-token"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // api.github.com rejects requests without a user agent
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(concat!("zh-move/", env!("CARGO_PKG_VERSION"))),
        );

        Ok(Self {
            http: http::build_client(&settings, headers)?,
            settings,
            endpoint,
        })
    }

    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<serde_json::Value>,
    ) -> Result<T> {
        let request = GraphQLRequest { query, variables };

        let response = http::send(&self.http, &self.settings, || {
            self.http.post(self.endpoint.clone()).json(&request)
        })
        .await?;

        let gql_response: GraphQLResponse<T> = response.json().await?;

        if let Some(errors) = gql_response.errors.filter(|e| !e.is_empty()) {
            return Err(MoverError::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        gql_response.data.ok_or(MoverError::EmptyResponse)
    }
}

//! HTTP client for the Flows REST API.

pub mod wire;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::cmd::EngagementAction;
use crate::domain::entity::{NearbyUser, Post, Story, UserProfile, Vibe};
use crate::domain::page::{Page, PageRequest};
use crate::domain::richtext::SubmitPayload;

/// Characters escaped when an entity id is spliced into a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// What went wrong talking to the API. The pager folds these into its error
/// handling as strings; the split matters mostly for logging and retry hints.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The remote operations the command executor needs. A trait so tests can
/// script responses without a server.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn fetch_posts(&self, request: &PageRequest) -> Result<Page<Post>, ApiError>;
    async fn fetch_vibes(&self, request: &PageRequest) -> Result<Page<Vibe>, ApiError>;
    async fn fetch_nearby(&self, request: &PageRequest) -> Result<Page<NearbyUser>, ApiError>;
    async fn fetch_stories(&self) -> Result<Vec<Story>, ApiError>;
    async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>, ApiError>;
    async fn send_engagement(&self, action: &EngagementAction) -> Result<(), ApiError>;
    async fn submit_post(&self, payload: &SubmitPayload) -> Result<(), ApiError>;
}

/// `ApiClient` over reqwest with bearer-token auth.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", request.limit.to_string())];
        // The empty cursor means first page and is omitted from the request
        if !request.cursor.is_empty() {
            query.push(("cursor", request.cursor.as_str().to_owned()));
        }
        query
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.token.expose_secret())
            .query(query)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &PageRequest,
        items_key: &str,
    ) -> Result<Page<T>, ApiError> {
        let body = self.get_json(path, &Self::page_query(request)).await?;
        Ok(wire::decode_page(body, items_key))
    }

    async fn post_json(&self, path: &str, body: &impl serde::Serialize) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }
        Ok(())
    }
}

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn fetch_posts(&self, request: &PageRequest) -> Result<Page<Post>, ApiError> {
        self.get_page("/v1/posts", request, wire::POSTS_KEY).await
    }

    async fn fetch_vibes(&self, request: &PageRequest) -> Result<Page<Vibe>, ApiError> {
        self.get_page("/v1/vibes", request, wire::VIBES_KEY).await
    }

    async fn fetch_nearby(&self, request: &PageRequest) -> Result<Page<NearbyUser>, ApiError> {
        self.get_page("/v1/nearby", request, wire::USERS_KEY).await
    }

    async fn fetch_stories(&self) -> Result<Vec<Story>, ApiError> {
        let body = self.get_json("/v1/stories", &[]).await?;
        let page: Page<Story> = wire::decode_page(body, wire::STORIES_KEY);
        Ok(page.items)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserProfile>, ApiError> {
        let body = self
            .get_json("/v1/users/search", &[("q", query.to_owned())])
            .await?;
        let page: Page<UserProfile> = wire::decode_page(body, wire::USERS_KEY);
        Ok(page.items)
    }

    async fn send_engagement(&self, action: &EngagementAction) -> Result<(), ApiError> {
        let (path, flag) = match action {
            EngagementAction::LikePost { id, liked } => {
                (format!("/v1/posts/{}/like", encode_segment(id.as_str())), *liked)
            }
            EngagementAction::SavePost { id, saved } => {
                (format!("/v1/posts/{}/save", encode_segment(id.as_str())), *saved)
            }
            EngagementAction::LikeVibe { id, liked } => {
                (format!("/v1/vibes/{}/like", encode_segment(id.as_str())), *liked)
            }
            EngagementAction::BlockUser { id, blocked } => (
                format!("/v1/users/{}/block", encode_segment(id.as_str())),
                *blocked,
            ),
        };
        self.post_json(&path, &serde_json::json!({ "active": flag }))
            .await
    }

    async fn submit_post(&self, payload: &SubmitPayload) -> Result<(), ApiError> {
        self.post_json("/v1/posts", payload).await
    }
}

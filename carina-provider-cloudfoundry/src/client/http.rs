//! HTTP plumbing for Cloud Foundry v2 REST calls

use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::models::{ApiResource, Page};
use crate::config::Config;
use crate::error::{CfError, CfResult};

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Upper bound on followed `next_url` links for one listing
const MAX_PAGES: usize = 100;

/// Truncate a response body and strip control characters before logging it
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// HTTP client bound to one API endpoint
#[derive(Debug, Clone)]
pub struct CfHttpClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl CfHttpClient {
    pub fn new(config: &Config) -> CfResult<Self> {
        let endpoint = config.validated_endpoint()?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CfError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            token: config.bearer_token().map(str::to_string),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve an API path (`/v2/...`) against the endpoint
    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.endpoint, path)
        } else {
            format!("{}/{}", self.endpoint, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return the raw body of a successful response
    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> CfResult<String> {
        tracing::debug!("{} {}", method, path);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(CfError::from_response(status.as_u16(), &body));
        }

        Ok(body)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &str) -> CfResult<T> {
        serde_json::from_str(body)
            .map_err(|e| CfError::Decode(format!("{} returned unexpected JSON: {}", path, e)))
    }

    /// GET a single JSON document
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> CfResult<T> {
        let body = self
            .send(Method::GET, path, self.request(Method::GET, path))
            .await?;
        Self::decode(path, &body)
    }

    /// POST a JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> CfResult<T> {
        let request = self.request(Method::POST, path).json(body);
        let body = self.send(Method::POST, path, request).await?;
        Self::decode(path, &body)
    }

    /// PUT a JSON body
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> CfResult<T> {
        let request = self.request(Method::PUT, path).json(body);
        let body = self.send(Method::PUT, path, request).await?;
        Self::decode(path, &body)
    }

    /// DELETE; any response body is ignored
    pub async fn delete(&self, path: &str, query: &[(&str, &str)]) -> CfResult<()> {
        let request = self.request(Method::DELETE, path).query(query);
        self.send(Method::DELETE, path, request).await?;
        Ok(())
    }

    /// Walk a paginated listing and return the first resource matching `predicate`.
    ///
    /// `next_url` links are followed until a match is found or pages run out.
    pub async fn find_first<T, F>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        predicate: F,
    ) -> CfResult<Option<ApiResource<T>>>
    where
        T: DeserializeOwned,
        F: Fn(&ApiResource<T>) -> bool,
    {
        let mut request = self.request(Method::GET, path).query(query);
        let mut current = path.to_string();

        for _ in 0..MAX_PAGES {
            let body = self.send(Method::GET, &current, request).await?;
            let page: Page<T> = Self::decode(&current, &body)?;

            if let Some(found) = page.resources.into_iter().find(|r| predicate(r)) {
                return Ok(Some(found));
            }

            match page.next_url {
                Some(next) if !next.is_empty() => {
                    request = self.request(Method::GET, &next);
                    current = next;
                }
                _ => return Ok(None),
            }
        }

        tracing::warn!("Stopped following pages of {} after {} pages", path, MAX_PAGES);
        Ok(None)
    }
}

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::{frequency_path, transcript_path, unwrap_text_blob, ApiError};
use crate::state::data::{Forum, Scope, ShowInfo, SourceId};
use crate::state::navigation::Transcript;
use crate::state::visualization::VisualizationRequest;

const USER_AGENT: &str = concat!("transcript-browser/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the backend. Cheap to clone into tasks.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    timeout: Duration,
}

impl ApiClient {
    /// `server` is the backend root, e.g. `http://localhost:5000/`.
    pub fn new(server: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(server)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base,
            timeout,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute url of an `/api/` endpoint
    pub fn endpoint(&self, name: &str) -> Result<Url, ApiError> {
        Ok(self.base.join("api/")?.join(name)?)
    }

    fn get(&self, name: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.client.get(self.endpoint(name)?).timeout(self.timeout))
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<reqwest::Response, ApiError> {
        tracing::debug!(path, "backend request");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, name: &str) -> Result<T, ApiError> {
        let response = self.send(self.get(name)?, name).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn show_info(&self) -> Result<ShowInfo, ApiError> {
        let info: ShowInfo = self.json("showinfo").await?;
        tracing::info!(shows = info.maps.len(), "show info loaded");
        Ok(info)
    }

    pub async fn forums(&self) -> Result<Vec<Forum>, ApiError> {
        let forums: Vec<Forum> = self.json("forums").await?;
        tracing::info!(forums = forums.len(), "forums loaded");
        Ok(forums)
    }

    /// Contents of a stored backend file
    pub async fn read(&self, path: &str) -> Result<String, ApiError> {
        let request = self.get("read")?.query(&[("path", path)]);
        let raw = self.send(request, path).await?.text().await?;
        Ok(unwrap_text_blob(&raw))
    }

    /// Raw frequency listing for a scope; empty at the overview
    pub async fn frequency(&self, scope: &Scope) -> Result<String, ApiError> {
        match frequency_path(scope) {
            Some(path) => self.read(&path).await,
            None => Ok(String::new()),
        }
    }

    pub async fn transcript(
        &self,
        show: &str,
        season: &str,
        episode: &str,
    ) -> Result<Transcript, ApiError> {
        let text = self.read(&transcript_path(show, season, episode)).await?;
        Ok(Transcript::parse(&text))
    }

    /// Ask the backend to scrape and analyse a forum.
    ///
    /// This can take a long time, so no timeout is applied.
    pub async fn add_show(&self, id: &SourceId, name: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .get(self.endpoint("add_show")?)
            .query(&[("show", id.to_string().as_str()), ("name", name)]);
        self.send(request, "add_show").await?;
        tracing::info!(show = %id, name, "import finished");
        Ok(())
    }

    /// Render a visualization, returning PNG bytes
    pub async fn visualize(&self, request: &VisualizationRequest) -> Result<Vec<u8>, ApiError> {
        let endpoint = request.kind.endpoint();
        let builder = self.get(endpoint)?.query(&request.query_pairs());
        let body = self.send(builder, endpoint).await?.text().await?;
        let png = STANDARD.decode(body.trim().trim_matches('"'))?;
        tracing::debug!(endpoint, bytes = png.len(), "visualization received");
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        let client = ApiClient::new("http://localhost:5000", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.endpoint("showinfo").unwrap().as_str(),
            "http://localhost:5000/api/showinfo"
        );

        let nested = ApiClient::new("http://host/browser", Duration::from_secs(5)).unwrap();
        assert_eq!(
            nested.endpoint("forums").unwrap().as_str(),
            "http://host/browser/api/forums"
        );
    }

    #[test]
    fn test_bad_server_url() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(5)),
            Err(ApiError::Url(_))
        ));
    }
}

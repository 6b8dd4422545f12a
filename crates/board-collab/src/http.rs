//! HTTP implementations of the collaborator interfaces
//!
//! One client serves all four collaborators: they live behind the same
//! base URL and fixed bearer credential. Requests are plain JSON; a
//! non-success status becomes [`CollabError::Status`] carrying the
//! response body for the log line.

use crate::api::{CanvasStore, IdeaStore, ModuleRegistry, RoadmapService};
use crate::config::CollabConfig;
use crate::error::CollabError;
use async_trait::async_trait;
use board_core::{
    CanvasDocument, CanvasId, CanvasMeta, CanvasSnapshot, Edge, Idea, IdeaId, ModuleFamily,
    ModuleId, ModuleStatus, Node,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTP client for all board collaborators
#[derive(Debug, Clone)]
pub struct HttpCollab {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
}

impl HttpCollab {
    /// Build a client from connection settings
    ///
    /// # Errors
    /// Transport error if the underlying client cannot be constructed.
    pub fn new(config: CollabConfig) -> Result<Self, CollabError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn check(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CollabError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(endpoint, %status, "collaborator rejected request");
        Err(CollabError::Status {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CollabError> {
        tracing::debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        Ok(Self::check(path, response).await?.json::<T>().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CollabError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.bearer_token)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(path, response).await?.json::<T>().await?)
    }

    async fn post_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), CollabError> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.bearer_token)
            .json(body)
            .send()
            .await?;
        Self::check(path, response).await?;
        Ok(())
    }

    async fn put_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), CollabError> {
        tracing::debug!(path, "PUT");
        let response = self
            .client
            .put(self.url(path))
            .bearer_auth(&self.bearer_token)
            .json(body)
            .send()
            .await?;
        Self::check(path, response).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: ModuleStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCanvasRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<CanvasId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveCanvasRequest<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CreateIdeaRequest<'a> {
    area: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromoteIdeaRequest<'a> {
    idea_id: IdeaId,
    idea_text: &'a str,
    idea_area: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[async_trait]
impl ModuleRegistry for HttpCollab {
    async fn resolve_status(&self, module: &ModuleId) -> Result<ModuleStatus, CollabError> {
        let response: StatusResponse = self
            .get_json(&format!("modules/{}/status", module.as_str()))
            .await?;
        Ok(response.status)
    }

    async fn list_families(&self) -> Result<Vec<ModuleFamily>, CollabError> {
        self.get_json("modules/families").await
    }
}

#[async_trait]
impl CanvasStore for HttpCollab {
    async fn list_canvases(&self) -> Result<Vec<CanvasMeta>, CollabError> {
        self.get_json("canvases").await
    }

    async fn create_canvas(
        &self,
        name: &str,
        parent: Option<CanvasId>,
    ) -> Result<CanvasMeta, CollabError> {
        self.post_json(
            "canvases",
            &CreateCanvasRequest {
                name,
                parent_id: parent,
            },
        )
        .await
    }

    async fn get_canvas(&self, id: CanvasId) -> Result<CanvasDocument, CollabError> {
        self.get_json(&format!("canvases/{id}")).await
    }

    async fn save_canvas(
        &self,
        id: CanvasId,
        snapshot: &CanvasSnapshot,
        name: Option<&str>,
    ) -> Result<(), CollabError> {
        self.put_unit(
            &format!("canvases/{id}"),
            &SaveCanvasRequest {
                nodes: &snapshot.nodes,
                edges: &snapshot.edges,
                name,
            },
        )
        .await
    }
}

#[async_trait]
impl IdeaStore for HttpCollab {
    async fn list_ideas(&self) -> Result<Vec<Idea>, CollabError> {
        self.get_json("ideas").await
    }

    async fn create_idea(&self, area: &str, text: &str) -> Result<Idea, CollabError> {
        self.post_json("ideas", &CreateIdeaRequest { area, text }).await
    }
}

#[async_trait]
impl RoadmapService for HttpCollab {
    async fn promote_idea(
        &self,
        idea_id: IdeaId,
        idea_text: &str,
        idea_area: &str,
        notes: Option<&str>,
    ) -> Result<(), CollabError> {
        tracing::info!(%idea_id, "promoting idea to roadmap");
        self.post_unit(
            "roadmap/promotions",
            &PromoteIdeaRequest {
                idea_id,
                idea_text,
                idea_area,
                notes,
            },
        )
        .await
    }
}

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::protocol::{Promotion, PromotionPayload};
use tracing::debug;
use url::Url;

use crate::{error::RequestError, query::SearchQuery};

/// The promotions REST resource, one method per endpoint.
#[async_trait]
pub trait PromotionsApi: Send + Sync {
    async fn create(&self, payload: &PromotionPayload) -> Result<Promotion, RequestError>;
    async fn update(
        &self,
        id: &str,
        payload: &PromotionPayload,
    ) -> Result<Promotion, RequestError>;
    async fn retrieve(&self, id: &str) -> Result<Promotion, RequestError>;
    async fn delete(&self, id: &str) -> Result<(), RequestError>;
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Promotion>, RequestError>;
    /// `None` when the service has no running promotion for the product.
    async fn find_best(&self, product_id: &str) -> Result<Option<Promotion>, RequestError>;
    async fn expire(
        &self,
        id: &str,
        payload: &PromotionPayload,
    ) -> Result<Promotion, RequestError>;
}

/// A request prepared from the form, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Create { payload: PromotionPayload },
    Update { id: String, payload: PromotionPayload },
    Retrieve { id: String },
    Delete { id: String },
    Search { query: SearchQuery },
    FindBest { product_id: String },
    Expire { id: String, payload: PromotionPayload },
}

impl ApiRequest {
    pub fn method(&self) -> &'static str {
        match self {
            Self::Create { .. } => "POST",
            Self::Update { .. } | Self::Expire { .. } => "PUT",
            Self::Delete { .. } => "DELETE",
            Self::Retrieve { .. } | Self::Search { .. } | Self::FindBest { .. } => "GET",
        }
    }

    /// Path relative to the service root, for logs.
    pub fn path(&self) -> String {
        match self {
            Self::Create { .. } => "/promotions".to_string(),
            Self::Update { id, .. } | Self::Retrieve { id } | Self::Delete { id } => {
                format!("/promotions/{id}")
            }
            Self::Search { query } if query.is_empty() => "/promotions".to_string(),
            Self::Search { query } => format!("/promotions?{query}"),
            Self::FindBest { product_id } => format!("/promotions/{product_id}/best"),
            Self::Expire { id, .. } => format!("/promotions/{id}/expire"),
        }
    }
}

/// Successful reply, shaped by the endpoint that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiReply {
    Promotion(Promotion),
    Promotions(Vec<Promotion>),
    Best(Option<Promotion>),
    Deleted,
}

pub async fn execute(
    api: &dyn PromotionsApi,
    request: &ApiRequest,
) -> Result<ApiReply, RequestError> {
    match request {
        ApiRequest::Create { payload } => api.create(payload).await.map(ApiReply::Promotion),
        ApiRequest::Update { id, payload } => {
            api.update(id, payload).await.map(ApiReply::Promotion)
        }
        ApiRequest::Retrieve { id } => api.retrieve(id).await.map(ApiReply::Promotion),
        ApiRequest::Delete { id } => api.delete(id).await.map(|()| ApiReply::Deleted),
        ApiRequest::Search { query } => api.search(query).await.map(ApiReply::Promotions),
        ApiRequest::FindBest { product_id } => {
            api.find_best(product_id).await.map(ApiReply::Best)
        }
        ApiRequest::Expire { id, payload } => {
            api.expire(id, payload).await.map(ApiReply::Promotion)
        }
    }
}

/// [`PromotionsApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPromotionsApi {
    http: Client,
    base_url: Url,
}

impl HttpPromotionsApi {
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, RequestError> {
        let base_url =
            Url::parse(base_url.trim()).map_err(|_| RequestError::InvalidUrl(base_url.into()))?;
        if base_url.cannot_be_a_base() {
            return Err(RequestError::InvalidUrl(base_url.into()));
        }
        Ok(Self { http, base_url })
    }

    /// `{base}/promotions/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RequestError> {
        if let Some(bad) = segments
            .iter()
            .copied()
            .find(|segment| matches!(*segment, "" | "." | ".."))
        {
            return Err(RequestError::InvalidId(bad.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RequestError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("promotions")
            .extend(segments);
        Ok(url)
    }

    async fn send_raw(
        &self,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), RequestError> {
        let response = request
            .send()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "promotions response");
        Ok((status, body.to_vec()))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RequestError> {
        let (status, body) = self.send_raw(request).await?;
        if !status.is_success() {
            return Err(failure(status, &body));
        }
        serde_json::from_slice(&body).map_err(|err| RequestError::Decode(err.to_string()))
    }
}

fn failure(status: StatusCode, body: &[u8]) -> RequestError {
    RequestError::Status {
        status: status.as_u16(),
        body: serde_json::from_slice(body).ok(),
    }
}

#[async_trait]
impl PromotionsApi for HttpPromotionsApi {
    async fn create(&self, payload: &PromotionPayload) -> Result<Promotion, RequestError> {
        let url = self.endpoint(&[])?;
        self.send_json(self.http.post(url).json(payload)).await
    }

    async fn update(
        &self,
        id: &str,
        payload: &PromotionPayload,
    ) -> Result<Promotion, RequestError> {
        let url = self.endpoint(&[id])?;
        self.send_json(self.http.put(url).json(payload)).await
    }

    async fn retrieve(&self, id: &str) -> Result<Promotion, RequestError> {
        let url = self.endpoint(&[id])?;
        self.send_json(self.http.get(url)).await
    }

    async fn delete(&self, id: &str) -> Result<(), RequestError> {
        let url = self.endpoint(&[id])?;
        let (status, body) = self.send_raw(self.http.delete(url)).await?;
        if !status.is_success() {
            return Err(failure(status, &body));
        }
        Ok(())
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Promotion>, RequestError> {
        let mut url = self.endpoint(&[])?;
        if !query.is_empty() {
            url.set_query(Some(&query.to_query_string()));
        }
        self.send_json(self.http.get(url)).await
    }

    async fn find_best(&self, product_id: &str) -> Result<Option<Promotion>, RequestError> {
        let url = self.endpoint(&[product_id, "best"])?;
        self.send_json(self.http.get(url)).await
    }

    async fn expire(
        &self,
        id: &str,
        payload: &PromotionPayload,
    ) -> Result<Promotion, RequestError> {
        let url = self.endpoint(&[id, "expire"])?;
        self.send_json(self.http.put(url).json(payload)).await
    }
}

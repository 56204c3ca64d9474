use super::{parse_payload, Method, RequestSpec, Transport, TransportError};
use crate::config::LuisConfig;
use crate::{Error, Result};
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// reqwest-backed [`Transport`] scoped to one application.
pub struct HttpTransport {
    client: reqwest::Client,
    config: Arc<LuisConfig>,
}

impl HttpTransport {
    pub fn new(config: Arc<LuisConfig>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LuisConfig {
        &self.config
    }

    pub async fn get(&self, resource: &str) -> Result<Value> {
        self.request(RequestSpec::get(resource)).await
    }

    pub async fn post(&self, resource: &str, body: Value) -> Result<Value> {
        self.request(RequestSpec::post(resource, body)).await
    }

    pub async fn delete(&self, resource: &str) -> Result<Value> {
        self.request(RequestSpec::delete(resource)).await
    }

    async fn execute(&self, spec: RequestSpec) -> Result<Value> {
        let url = self.config.resource_url(&spec.resource);
        let payload = serde_json::to_vec(&spec.body)?;

        info!(method = %spec.method, url = %url, "http request");
        debug!(body = %String::from_utf8_lossy(&payload), "http request data");

        let request = match spec.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };

        let response = request
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, payload.len())
            .header(SUBSCRIPTION_KEY_HEADER, self.config.subscription_key())
            .body(payload)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if status == 200 || status == 201 {
            info!(status, "request complete");
            debug!(body = %body, "http response data");
            Ok(parse_payload(&body))
        } else {
            error!(status, method = %spec.method, resource = %spec.resource, body = %body, "request failed");
            Err(Error::RequestFailed {
                status,
                method: spec.method.to_string(),
                resource: spec.resource,
                body,
            })
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn request(&self, spec: RequestSpec) -> Result<Value> {
        self.execute(spec).await
    }
}

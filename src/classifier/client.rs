//! Classifier store client: typed list/add/delete over one application.

use super::types::{Classifier, ClassifierType, RemovalSummary};
use crate::config::LuisConfig;
use crate::sequencer::{run, Strategy};
use crate::transport::{HttpTransport, RequestSpec, Transport};
use crate::{Error, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The remote collection is not safe to mutate concurrently.
const MUTATION_STRATEGY: Strategy = Strategy::Serial;

/// Client for the classifier collections of a single application.
pub struct ClassifierStoreClient {
    transport: Arc<dyn Transport>,
}

impl ClassifierStoreClient {
    pub fn builder() -> ClassifierStoreClientBuilder {
        ClassifierStoreClientBuilder::new()
    }

    /// Build an HTTP-backed client from an existing configuration.
    pub fn new(config: LuisConfig) -> Result<Self> {
        let transport = HttpTransport::new(Arc::new(config))?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List every classifier of `ty` currently known to the service.
    pub async fn list(&self, ty: ClassifierType) -> Result<Vec<Classifier>> {
        let payload = self.transport.request(RequestSpec::get(ty.as_str())).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Create one classifier. Returns whatever the service replied with
    /// (usually the new ID).
    pub async fn add(&self, ty: ClassifierType, name: &str) -> Result<Value> {
        Self::ensure_addable(ty)?;
        info!(classifier_type = %ty, name, "adding classifier");
        self.transport
            .request(RequestSpec::post(
                ty.as_str(),
                json!({ "Name": name, "children": {} }),
            ))
            .await
    }

    /// Create classifiers one at a time, in the given order.
    ///
    /// The first failure aborts the batch; later names are never sent.
    pub async fn add_many<S: AsRef<str>>(&self, ty: ClassifierType, names: &[S]) -> Result<()> {
        Self::ensure_addable(ty)?;
        info!(classifier_type = %ty, count = names.len(), "adding classifiers");
        run(
            MUTATION_STRATEGY,
            names
                .iter()
                .map(|name| move || self.add(ty, name.as_ref())),
        )
        .await?;
        Ok(())
    }

    pub async fn delete(&self, ty: ClassifierType, id: &str) -> Result<()> {
        info!(classifier_type = %ty, id, "removing classifier");
        self.transport
            .request(RequestSpec::delete(ty.item_resource(id)))
            .await?;
        Ok(())
    }

    /// Delete every classifier of `ty`, one at a time, except protected ones
    /// (the `None` intent).
    pub async fn remove_all(&self, ty: ClassifierType) -> Result<RemovalSummary> {
        info!(classifier_type = %ty, "removing all classifiers");
        let classifiers = self.list(ty).await?;

        let mut summary = RemovalSummary::default();
        let mut doomed = Vec::with_capacity(classifiers.len());
        for classifier in classifiers {
            if ty.is_protected(&classifier) {
                info!(id = %classifier.id, "not removing '{}' intent", classifier.name);
                summary.preserved.push(classifier.id);
            } else {
                doomed.push(classifier.id);
            }
        }

        run(MUTATION_STRATEGY, doomed.iter().map(|id| move || self.delete(ty, id))).await?;
        summary.deleted = doomed;
        Ok(summary)
    }

    fn ensure_addable(ty: ClassifierType) -> Result<()> {
        if ty.supports_add() {
            Ok(())
        } else {
            Err(Error::Unsupported {
                operation: "add".to_string(),
                classifier_type: ty.to_string(),
            })
        }
    }
}

pub struct ClassifierStoreClientBuilder {
    application_id: Option<String>,
    subscription_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClassifierStoreClientBuilder {
    pub fn new() -> Self {
        Self {
            application_id: None,
            subscription_key: None,
            base_url: None,
            timeout: None,
            transport: None,
        }
    }
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }
    pub fn subscription_key(mut self, key: impl Into<String>) -> Self {
        self.subscription_key = Some(key.into());
        self
    }
    /// Override the service origin (primarily for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    /// Use a custom transport instead of HTTP. Connection settings are ignored.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<ClassifierStoreClient> {
        if let Some(transport) = self.transport {
            return Ok(ClassifierStoreClient::with_transport(transport));
        }

        let application_id = self
            .application_id
            .ok_or_else(|| Error::configuration("application id must be specified"))?;
        let subscription_key = self
            .subscription_key
            .ok_or_else(|| Error::configuration("subscription key must be specified"))?;

        let mut config = LuisConfig::new(application_id, subscription_key)?;
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url)?;
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        ClassifierStoreClient::new(config)
    }
}

impl Default for ClassifierStoreClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

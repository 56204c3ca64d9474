//! In-memory stand-in for the remote service, used by unit tests.

use super::{Method, RequestSpec, Transport};
use crate::{Error, Result};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    collections: BTreeMap<String, Vec<(String, String)>>,
    calls: Vec<RequestSpec>,
    next_id: u64,
    posts_seen: usize,
}

/// Simulates classifier collections and records every request in order.
#[derive(Default)]
pub(crate) struct FakeLuis {
    state: Mutex<State>,
    /// 1-based index of the POST that should fail with a 500.
    fail_post_at: Option<usize>,
    /// Status returned for every request to this resource.
    fail_resource: Option<(String, u16)>,
}

impl FakeLuis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(self, resource: &str, items: &[(&str, &str)]) -> Self {
        {
            let mut st = self.state.lock().unwrap();
            st.collections.insert(
                resource.to_string(),
                items
                    .iter()
                    .map(|(id, name)| (id.to_string(), name.to_string()))
                    .collect(),
            );
        }
        self
    }

    pub fn failing_post_at(mut self, n: usize) -> Self {
        self.fail_post_at = Some(n);
        self
    }

    pub fn failing_resource(mut self, resource: &str, status: u16) -> Self {
        self.fail_resource = Some((resource.to_string(), status));
        self
    }

    pub fn calls(&self) -> Vec<RequestSpec> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls rendered as `"METHOD resource"` for compact assertions.
    pub fn call_log(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| format!("{} {}", c.method, c.resource))
            .collect()
    }

    pub fn names(&self, resource: &str) -> Vec<String> {
        let st = self.state.lock().unwrap();
        st.collections
            .get(resource)
            .map(|items| items.iter().map(|(_, name)| name.clone()).collect())
            .unwrap_or_default()
    }

    fn reject(spec: &RequestSpec, status: u16) -> Error {
        Error::RequestFailed {
            status,
            method: spec.method.to_string(),
            resource: spec.resource.clone(),
            body: "simulated failure".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeLuis {
    async fn request(&self, spec: RequestSpec) -> Result<Value> {
        let mut st = self.state.lock().unwrap();
        st.calls.push(spec.clone());

        if let Some((resource, status)) = &self.fail_resource {
            if *resource == spec.resource {
                return Err(Self::reject(&spec, *status));
            }
        }

        match spec.method {
            Method::Get => {
                let items = st.collections.get(&spec.resource).cloned().unwrap_or_default();
                Ok(Value::Array(
                    items
                        .into_iter()
                        .map(|(id, name)| json!({"ID": id, "Name": name}))
                        .collect(),
                ))
            }
            Method::Post => {
                st.posts_seen += 1;
                if self.fail_post_at == Some(st.posts_seen) {
                    return Err(Self::reject(&spec, 500));
                }
                st.next_id += 1;
                let id = format!("gen-{}", st.next_id);
                let name = spec.body["Name"].as_str().unwrap_or_default().to_string();
                st.collections
                    .entry(spec.resource.clone())
                    .or_default()
                    .push((id.clone(), name));
                Ok(Value::String(id))
            }
            Method::Delete => {
                let (collection, id) = spec
                    .resource
                    .split_once('/')
                    .ok_or_else(|| Self::reject(&spec, 405))?;
                let items = st
                    .collections
                    .get_mut(collection)
                    .ok_or_else(|| Self::reject(&spec, 404))?;
                let before = items.len();
                items.retain(|(existing, _)| existing != id);
                if items.len() == before {
                    return Err(Self::reject(&spec, 404));
                }
                Ok(Value::Null)
            }
        }
    }
}

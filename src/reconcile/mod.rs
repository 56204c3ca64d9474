//! 同步器：先清空远端分类器，再按期望列表串行重建。
//!
//! # Reconciler
//!
//! Each classifier type is synchronized with a delete-all-then-recreate
//! pipeline:
//!
//! ```text
//! Start -> RemoveAll -> AddDesired -> Done
//!             \            \
//!              +------------+--> Failed
//! ```
//!
//! A failure anywhere stops the pipeline; whatever was already applied
//! remotely stays applied. [`Reconciler::run`] drives intents to completion
//! before touching entities.

use crate::classifier::{validate_type, ClassifierStoreClient, ClassifierType, RemovalSummary};
use crate::config::DesiredState;
use crate::{Error, Result};
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Start,
    RemoveAll,
    AddDesired,
    Done,
    Failed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncPhase::Start => "start",
            SyncPhase::RemoveAll => "remove_all",
            SyncPhase::AddDesired => "add_desired",
            SyncPhase::Done => "done",
            SyncPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Result of synchronizing one classifier type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReport {
    pub classifier_type: ClassifierType,
    pub removed: usize,
    pub preserved: usize,
    pub added: usize,
}

/// Result of a full [`Reconciler::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub types: Vec<TypeReport>,
    /// Prebuilt names that were requested but could not be created.
    pub skipped_prebuilts: Vec<String>,
}

impl SyncReport {
    pub fn get(&self, ty: ClassifierType) -> Option<&TypeReport> {
        self.types.iter().find(|r| r.classifier_type == ty)
    }
}

pub struct Reconciler {
    store: ClassifierStoreClient,
}

impl Reconciler {
    pub fn new(store: ClassifierStoreClient) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ClassifierStoreClient {
        &self.store
    }

    /// Replace every removable classifier of `ty` with `names`, in order.
    ///
    /// Types that cannot be created remotely are rejected before anything is
    /// deleted.
    pub async fn sync<S: AsRef<str>>(&self, ty: ClassifierType, names: &[S]) -> Result<TypeReport> {
        if !ty.supports_add() {
            return Err(Error::Unsupported {
                operation: "sync".to_string(),
                classifier_type: ty.to_string(),
            });
        }

        self.enter(ty, SyncPhase::Start);
        match self.sync_phases(ty, names).await {
            Ok(report) => {
                self.enter(ty, SyncPhase::Done);
                Ok(report)
            }
            Err(e) => {
                error!(classifier_type = %ty, phase = %SyncPhase::Failed, error = %e, "sync aborted");
                Err(e)
            }
        }
    }

    async fn sync_phases<S: AsRef<str>>(&self, ty: ClassifierType, names: &[S]) -> Result<TypeReport> {
        self.enter(ty, SyncPhase::RemoveAll);
        let removal = self.store.remove_all(ty).await?;

        self.enter(ty, SyncPhase::AddDesired);
        self.store.add_many(ty, names).await?;

        Ok(TypeReport {
            classifier_type: ty,
            removed: removal.deleted.len(),
            preserved: removal.preserved.len(),
            added: names.len(),
        })
    }

    fn enter(&self, ty: ClassifierType, phase: SyncPhase) {
        info!(classifier_type = %ty, phase = %phase, "sync phase");
    }

    pub async fn sync_intents<S: AsRef<str>>(&self, names: &[S]) -> Result<TypeReport> {
        self.sync(ClassifierType::Intents, names).await
    }

    pub async fn sync_entities<S: AsRef<str>>(&self, names: &[S]) -> Result<TypeReport> {
        self.sync(ClassifierType::Entities, names).await
    }

    /// Like [`Reconciler::sync`], with the type given by name.
    pub async fn sync_named<S: AsRef<str>>(&self, type_name: &str, names: &[S]) -> Result<TypeReport> {
        let ty = validate_type(type_name)?;
        self.sync(ty, names).await
    }

    /// Remove every removable classifier of `ty` without adding anything back.
    pub async fn clear(&self, ty: ClassifierType) -> Result<RemovalSummary> {
        self.store.remove_all(ty).await
    }

    /// Sync intents, then entities. Prebuilts are reported as skipped.
    pub async fn run(&self, desired: &DesiredState) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        report.types.push(self.sync_intents(desired.intents.as_slice()).await?);
        report.types.push(self.sync_entities(desired.entities.as_slice()).await?);

        if !desired.prebuilts.is_empty() {
            warn!(
                prebuilts = ?desired.prebuilts,
                "prebuilt classifiers cannot be created remotely; skipping"
            );
            report.skipped_prebuilts = desired.prebuilts.clone();
        }

        info!("done!");
        Ok(report)
    }
}

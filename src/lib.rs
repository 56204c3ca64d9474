//! # luis-sync
//!
//! 这是 LUIS 应用分类器（意图与实体）的声明式同步客户端。
//!
//! Provisioning client that keeps the intents and entities of a LUIS
//! application in line with a declarative list of names.
//!
//! ## Overview
//!
//! Synchronization is a delete-all-then-recreate reconciliation: every
//! removable classifier of a type is deleted, then the desired names are
//! created again in order. The `None` intent is the service's required
//! default and is never deleted.
//!
//! The remote collection is not safe to mutate concurrently, so every bulk
//! mutation goes through the serial path of the [`sequencer`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use luis_sync::{ClassifierStoreClient, DesiredState, LuisConfig, Reconciler};
//!
//! #[tokio::main]
//! async fn main() -> luis_sync::Result<()> {
//!     let config = LuisConfig::new("your-app-id", "your-subscription-key")?;
//!     let reconciler = Reconciler::new(ClassifierStoreClient::new(config)?);
//!
//!     let desired = DesiredState::builtin()?;
//!     let report = reconciler.run(&desired).await?;
//!     println!("{:?}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`transport`] | Single HTTP round trip with status-code checking |
//! | [`sequencer`] | Parallel (fail-fast) and serial execution of async operations |
//! | [`classifier`] | Typed list/add/delete over classifier collections |
//! | [`reconcile`] | Remove-all then add-desired synchronization |
//! | [`config`] | Client configuration and desired-state manifests |

pub mod classifier;
pub mod config;
pub mod reconcile;
pub mod sequencer;
pub mod transport;

// Re-export main types for convenience
pub use classifier::{Classifier, ClassifierStoreClient, ClassifierStoreClientBuilder, ClassifierType};
pub use config::{DesiredState, LuisConfig};
pub use reconcile::{Reconciler, SyncPhase, SyncReport, TypeReport};
pub use transport::{HttpTransport, Method, RequestSpec, Transport};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

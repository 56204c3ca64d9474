//! 分类器存储客户端：意图、实体与预置实体的列举、创建和删除。
//!
//! Classifier store client.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | [`ClassifierStoreClient::list`] | `GET <type>` |
//! | [`ClassifierStoreClient::add`] | `POST <type>` with `{"Name": .., "children": {}}` |
//! | [`ClassifierStoreClient::delete`] | `DELETE <type>/<id>` |
//!
//! Bulk mutations (`add_many`, `remove_all`) are always serial.

mod client;
mod types;

pub use client::{ClassifierStoreClient, ClassifierStoreClientBuilder};
pub use types::{validate_type, Classifier, ClassifierType, RemovalSummary, NONE_INTENT};

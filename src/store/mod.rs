//! Storage layer for persisting surveys, questions, and responses.
//!
//! Provides an abstraction over different document-store backends:
//! - `MemBackend`: in-memory storage for testing
//! - `PgBackend`: PostgreSQL for production persistence

mod db;
mod document;
mod key;
mod store;

use std::{error::Error, sync::Arc};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use strum::{AsRefStr, EnumIter};

use crate::{Result, SurveyKitError};

pub use db::{MemBackend, PgBackend};
pub use document::Document;
pub use key::DocKey;
pub use store::Store;

/// Native identifier field carried by every document read from a backend.
pub const KEY_FIELD: &str = "_key";

/// Maps database errors to SurveyKitError.
fn map_db_err(err: impl Error) -> SurveyKitError {
    SurveyKitError::Store(err.to_string())
}

/// Identifiers for the three logical storage collections.
#[derive(Debug, Clone, Copy, AsRefStr, PartialEq, Hash, Eq, EnumIter)]
pub enum CollectionIden {
    /// Survey definitions.
    #[strum(serialize = "surveys")]
    Surveys,
    /// Questions attached to surveys.
    #[strum(serialize = "questions")]
    Questions,
    /// Submitted survey responses.
    #[strum(serialize = "responses")]
    Responses,
}

/// Conjunction of field-equality terms. Nothing more exotic is needed:
/// every read path filters by key or by equality plus sort.
#[derive(Debug, Clone, Default)]
pub struct Filter(Vec<(String, JsonValue)>);

impl Filter {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn eq<T: Into<JsonValue>>(
        mut self,
        field: &str,
        value: T,
    ) -> Self {
        self.0.push((field.to_string(), value.into()));
        self
    }

    pub fn terms(&self) -> &[(String, JsonValue)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(
        &self,
        doc: &Document,
    ) -> bool {
        self.0.iter().all(|(field, value)| doc.get(field) == Some(value))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A single sort key. Ties and unsorted reads follow stored insertion order.
#[derive(Debug, Clone)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Skip/take window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}

/// Trait for document collection operations.
#[async_trait]
pub trait DocCollection: Send + Sync {
    /// Inserts a new document; the store assigns and returns its key.
    async fn insert(
        &self,
        doc: Document,
    ) -> Result<DocKey>;

    /// Finds a document by key. Returned documents carry the native
    /// `_key` field.
    async fn find_by_key(
        &self,
        key: &DocKey,
    ) -> Result<Option<Document>>;

    /// Atomic top-level field-set replacement. Returns `false` when no
    /// document matched the key; a missed merge is not an error.
    async fn merge(
        &self,
        key: &DocKey,
        patch: Document,
    ) -> Result<bool>;

    /// Deletes a document by key. Idempotent; returns `false` when no
    /// document matched.
    async fn delete(
        &self,
        key: &DocKey,
    ) -> Result<bool>;

    /// Queries documents by equality filter, sort keys, and page window.
    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortSpec],
        page: &Page,
    ) -> Result<Vec<Document>>;
}

/// Trait for document-store backends.
#[async_trait]
pub trait DocBackend: Send + Sync {
    /// Establishes the backend connection. Idempotent: a second call is a
    /// no-op when already connected.
    async fn connect(&self) -> Result<()>;

    /// Tears the connection down. Idempotent: a no-op when not connected.
    async fn shutdown(&self) -> Result<()>;

    /// Handle to one logical collection.
    fn collection(
        &self,
        iden: CollectionIden,
    ) -> Arc<dyn DocCollection>;
}

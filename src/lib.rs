//! # Surveykit
//!
//! Surveykit is the persistence and translation core of a survey-management
//! backend: clients create surveys, attach ordered questions to them, and
//! submit free-form responses against a survey.
//!
//! ## Core Features
//!
//! - **Schema-less round-trip**: typed core attributes plus open-ended
//!   extension fields that persist and return verbatim
//! - **Upsert semantics**: create-or-patch selected by the presence of an
//!   identifier, with authoritative re-read after every write
//! - **Ordered retrieval**: questions are stable-sorted by their `order`
//!   attribute, ties broken by insertion order
//! - **Pluggable storage**: in-memory backend (testing) and PostgreSQL
//!   (production)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use surveykit::{CoreBuilder, UpdateSurveyRequest};
//!
//! let core = CoreBuilder::new().build()?;
//! core.connect().await?;
//!
//! let resp = core.surveys().update(&UpdateSurveyRequest::new().name("S1").title("Survey 1")).await;
//! let survey = resp.data.unwrap();
//! let hierarchy = core.hierarchy().assemble(&survey.id).await;
//! ```

mod builder;
mod config;
mod core;
mod envelope;
mod error;
mod model;
mod ops;
mod store;
mod stores;
mod utils;

pub use builder::CoreBuilder;
pub use config::{Config, PostgresConfig, StoreConfig, StoreType};
pub use self::core::SurveyCore;
pub use envelope::*;
pub use error::SurveyKitError;
pub use model::*;
pub use ops::*;
pub use store::{CollectionIden, DocBackend, DocCollection, DocKey, Document, Filter, MemBackend, Page, PgBackend, SortOrder, SortSpec, Store};
pub use stores::{EntryStore, HierarchyAssembler, QuestionStore, SurveyStore};

/// Result type alias for surveykit operations.
pub type Result<T> = std::result::Result<T, SurveyKitError>;

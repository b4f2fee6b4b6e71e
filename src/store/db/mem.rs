use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering as AtomicOrdering},
    },
};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use crate::{
    Result,
    store::{CollectionIden, DocBackend, DocCollection, DocKey, Document, Filter, KEY_FIELD, Page, SortOrder, SortSpec},
};

/// In-memory document backend used for testing and as the default store
/// type. Connect and shutdown are no-ops.
#[derive(Debug, Clone)]
pub struct MemBackend {
    surveys: Arc<Collect>,
    questions: Arc<Collect>,
    responses: Arc<Collect>,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self {
            surveys: Arc::new(Collect::new()),
            questions: Arc::new(Collect::new()),
            responses: Arc::new(Collect::new()),
        }
    }
}

#[async_trait]
impl DocBackend for MemBackend {
    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn collection(
        &self,
        iden: CollectionIden,
    ) -> Arc<dyn DocCollection> {
        match iden {
            CollectionIden::Surveys => self.surveys.clone(),
            CollectionIden::Questions => self.questions.clone(),
            CollectionIden::Responses => self.responses.clone(),
        }
    }
}

/// One in-memory collection. The monotonic sequence records insertion
/// order, which keeps unsorted reads and sort ties stable.
#[derive(Debug)]
struct Collect {
    rows: RwLock<HashMap<DocKey, (u64, Document)>>,
    seq: AtomicU64,
}

impl Collect {
    fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            seq: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl DocCollection for Collect {
    async fn insert(
        &self,
        doc: Document,
    ) -> Result<DocKey> {
        let key = DocKey::generate();
        let seq = self.seq.fetch_add(1, AtomicOrdering::SeqCst);
        let mut rows = self.rows.write().await;
        rows.insert(key, (seq, doc));
        Ok(key)
    }

    async fn find_by_key(
        &self,
        key: &DocKey,
    ) -> Result<Option<Document>> {
        let rows = self.rows.read().await;
        Ok(rows.get(key).map(|(_, doc)| {
            let mut doc = doc.clone();
            doc.set(KEY_FIELD, key.to_value());
            doc
        }))
    }

    async fn merge(
        &self,
        key: &DocKey,
        patch: Document,
    ) -> Result<bool> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(key) {
            Some((_, doc)) => {
                doc.merge(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(
        &self,
        key: &DocKey,
    ) -> Result<bool> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(key).is_some())
    }

    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortSpec],
        page: &Page,
    ) -> Result<Vec<Document>> {
        let rows = self.rows.read().await;
        let mut matched = rows
            .iter()
            .filter(|(_, (_, doc))| filter.matches(doc))
            .map(|(key, (seq, doc))| (*seq, *key, doc.clone()))
            .collect::<Vec<_>>();

        matched.sort_by(|(seq_a, _, doc_a), (seq_b, _, doc_b)| {
            for spec in sort {
                let ord = cmp_values(doc_a.get(&spec.field), doc_b.get(&spec.field));
                let ord = match spec.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            seq_a.cmp(seq_b)
        });

        let offset = page.offset.unwrap_or(0);
        let limit = page.limit.unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, key, mut doc)| {
                doc.set(KEY_FIELD, key.to_value());
                doc
            })
            .collect())
    }
}

/// Field comparison for sorting. Absent fields sort first; mixed types
/// fall back to their serialized form.
fn cmp_values(
    a: Option<&JsonValue>,
    b: Option<&JsonValue>,
) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (JsonValue::Number(x), JsonValue::Number(y)) => {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
            (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

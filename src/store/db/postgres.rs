use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use sea_query::{Alias as SeaAlias, Expr as SeaExpr, Order as SeaOrder, PostgresQueryBuilder, Query as SeaQuery};
use sea_query_binder::SqlxBinder;
use serde_json::{Map, Value as JsonValue};
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use strum::IntoEnumIterator;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::{
    Result, SurveyKitError,
    store::{CollectionIden, DocBackend, DocCollection, DocKey, Document, Filter, KEY_FIELD, Page, SortOrder, SortSpec, map_db_err},
};

const KEY_COL: &str = "key";
const SEQ_COL: &str = "seq";
const DOC_COL: &str = "doc";

/// PostgreSQL document backend. Each logical collection is one table of
/// `(key text primary key, seq bigserial, doc jsonb)`; the `seq` column
/// records insertion order for stable sorting.
///
/// One pool is shared for the process lifetime and created lazily on the
/// first operation; an explicit `connect` only forces it early.
#[derive(Debug, Clone)]
pub struct PgBackend {
    inner: Arc<PgInner>,
}

#[derive(Debug)]
struct PgInner {
    database_url: String,
    pool: OnceCell<PgPool>,
}

impl PgBackend {
    pub fn new(database_url: &str) -> Self {
        Self {
            inner: Arc::new(PgInner {
                database_url: database_url.to_string(),
                pool: OnceCell::new(),
            }),
        }
    }
}

#[async_trait]
impl DocBackend for PgBackend {
    async fn connect(&self) -> Result<()> {
        self.inner.pool().await?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<()> {
        if let Some(pool) = self.inner.pool.get() {
            pool.close().await;
        }
        Ok(())
    }

    fn collection(
        &self,
        iden: CollectionIden,
    ) -> Arc<dyn DocCollection> {
        Arc::new(PgCollection {
            inner: self.inner.clone(),
            iden,
        })
    }
}

impl PgInner {
    async fn pool(&self) -> Result<&PgPool> {
        self.pool
            .get_or_try_init(|| async {
                debug!("pg::connect({})", self.database_url);
                let pool = PgPoolOptions::new()
                    .acquire_timeout(Duration::from_secs(5))
                    .max_connections(16)
                    .connect(&self.database_url)
                    .await
                    .map_err(|err| SurveyKitError::StoreUnavailable(format!("failed to connect to {}: {}", self.database_url, err)))?;
                init_tables(&pool).await?;
                Ok(pool)
            })
            .await
    }
}

/// Creates the collection tables on first connect.
async fn init_tables(pool: &PgPool) -> Result<()> {
    for iden in CollectionIden::iter() {
        let table = iden.as_ref();
        let create = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" (\"{}\" text PRIMARY KEY, \"{}\" bigserial, \"{}\" jsonb NOT NULL)",
            table, KEY_COL, SEQ_COL, DOC_COL
        );
        sqlx::query(&create).execute(pool).await.map_err(map_db_err)?;

        let index = format!("CREATE INDEX IF NOT EXISTS \"idx_{}_doc\" ON \"{}\" USING gin (\"{}\")", table, table, DOC_COL);
        sqlx::query(&index).execute(pool).await.map_err(map_db_err)?;
    }
    Ok(())
}

struct PgCollection {
    inner: Arc<PgInner>,
    iden: CollectionIden,
}

impl PgCollection {
    fn table(&self) -> SeaAlias {
        SeaAlias::new(self.iden.as_ref())
    }
}

#[async_trait]
impl DocCollection for PgCollection {
    async fn insert(
        &self,
        doc: Document,
    ) -> Result<DocKey> {
        let pool = self.inner.pool().await?;
        let key = DocKey::generate();
        let (sql, values) = SeaQuery::insert()
            .into_table(self.table())
            .columns([SeaAlias::new(KEY_COL), SeaAlias::new(DOC_COL)])
            .values([key.encode().into(), JsonValue::from(doc).into()])
            .map_err(map_db_err)?
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_with(&sql, values).execute(pool).await.map_err(map_db_err)?;
        Ok(key)
    }

    async fn find_by_key(
        &self,
        key: &DocKey,
    ) -> Result<Option<Document>> {
        let pool = self.inner.pool().await?;
        let (sql, values) = SeaQuery::select()
            .from(self.table())
            .columns([SeaAlias::new(KEY_COL), SeaAlias::new(DOC_COL)])
            .and_where(SeaExpr::col(SeaAlias::new(KEY_COL)).eq(key.encode()))
            .build_sqlx(PostgresQueryBuilder);

        let row = sqlx::query_with(&sql, values).fetch_optional(pool).await.map_err(map_db_err)?;
        row.as_ref().map(row_to_doc).transpose()
    }

    async fn merge(
        &self,
        key: &DocKey,
        patch: Document,
    ) -> Result<bool> {
        let pool = self.inner.pool().await?;
        // jsonb concatenation is the single-statement top-level field-set
        // replacement; sea-query has no operator for it.
        let sql = format!("UPDATE \"{}\" SET \"{}\" = \"{}\" || $1 WHERE \"{}\" = $2", self.iden.as_ref(), DOC_COL, DOC_COL, KEY_COL);
        let result = sqlx::query(&sql)
            .bind(JsonValue::from(patch))
            .bind(key.encode())
            .execute(pool)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(
        &self,
        key: &DocKey,
    ) -> Result<bool> {
        let pool = self.inner.pool().await?;
        let (sql, values) = SeaQuery::delete()
            .from_table(self.table())
            .and_where(SeaExpr::col(SeaAlias::new(KEY_COL)).eq(key.encode()))
            .build_sqlx(PostgresQueryBuilder);

        let result = sqlx::query_with(&sql, values).execute(pool).await.map_err(map_db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortSpec],
        page: &Page,
    ) -> Result<Vec<Document>> {
        let pool = self.inner.pool().await?;
        let mut query = SeaQuery::select();
        query.from(self.table()).columns([SeaAlias::new(KEY_COL), SeaAlias::new(DOC_COL)]);

        if !filter.is_empty() {
            let mut terms = Map::new();
            for (field, value) in filter.terms() {
                terms.insert(field.clone(), value.clone());
            }
            query.and_where(SeaExpr::cust_with_values(format!("\"{}\" @> ?", DOC_COL), [JsonValue::Object(terms)]));
        }

        for spec in sort {
            let order = match spec.order {
                SortOrder::Asc => SeaOrder::Asc,
                SortOrder::Desc => SeaOrder::Desc,
            };
            query.order_by_expr(SeaExpr::cust(format!("\"{}\"->'{}'", DOC_COL, spec.field)), order);
        }
        query.order_by(SeaAlias::new(SEQ_COL), SeaOrder::Asc);

        if let Some(offset) = page.offset {
            query.offset(offset as u64);
        }
        if let Some(limit) = page.limit {
            query.limit(limit as u64);
        }
        let (sql, values) = query.build_sqlx(PostgresQueryBuilder);

        let rows = sqlx::query_with(&sql, values).fetch_all(pool).await.map_err(map_db_err)?;
        rows.iter().map(row_to_doc).collect()
    }
}

fn row_to_doc(row: &PgRow) -> Result<Document> {
    let key: String = row.try_get(KEY_COL).map_err(map_db_err)?;
    let value: JsonValue = row.try_get(DOC_COL).map_err(map_db_err)?;
    let mut doc = match value {
        JsonValue::Object(map) => Document::from(map),
        other => return Err(SurveyKitError::Convert(format!("stored document is not an object: {}", other))),
    };
    doc.set(KEY_FIELD, DocKey::decode(&key)?.to_value());
    Ok(doc)
}

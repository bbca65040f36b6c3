/// PostgreSQL-backed document store
///
/// Documents are rows of a single `documents(collection, id, data JSONB)`
/// table. Each operation is one statement, so per-document atomicity comes
/// from PostgreSQL itself; nothing spans more than one row.
///
/// # Example
///
/// ```no_run
/// use taskboard_shared::db::{pool::PoolConfig, postgres::PgDocumentStore};
///
/// # async fn example() -> Result<(), taskboard_shared::db::StoreError> {
/// let store = PgDocumentStore::connect(&PoolConfig {
///     url: std::env::var("DATABASE_URL").unwrap_or_default(),
///     ..Default::default()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```

use super::{
    generate_id, migrations, pool, Collection, Document, DocumentStore, StoreError, StoreResult,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgPool, types::Json};

/// [`DocumentStore`] on a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Wraps an existing pool; the schema must already be migrated
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the pool, applies migrations and returns the store
    pub async fn connect(config: &pool::PoolConfig) -> StoreResult<Self> {
        let pool = pool::create_pool(config).await?;
        migrations::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn into_documents(rows: Vec<(String, Json<Value>)>) -> Vec<Document> {
    rows.into_iter()
        .map(|(id, Json(data))| Document { id, data })
        .collect()
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: Collection, id: &str) -> StoreResult<Option<Document>> {
        let row: Option<(Json<Value>,)> = sqlx::query_as(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(data),)| Document {
            id: id.to_string(),
            data,
        }))
    }

    async fn create(
        &self,
        collection: Collection,
        id: &str,
        data: Map<String, Value>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(Value::Object(data)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::AlreadyExists {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn add(&self, collection: Collection, data: Map<String, Value>) -> StoreResult<String> {
        let id = generate_id();
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(&id)
            .bind(Json(Value::Object(data)))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn add_stamped(
        &self,
        collection: Collection,
        data: Map<String, Value>,
        timestamp_field: &str,
    ) -> StoreResult<Document> {
        let id = generate_id();
        let (Json(stored),): (Json<Value>,) = sqlx::query_as(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, jsonb_set($3, ARRAY[$4::text], to_jsonb(NOW())))
            RETURNING data
            "#,
        )
        .bind(collection.as_str())
        .bind(&id)
        .bind(Json(Value::Object(data)))
        .bind(timestamp_field)
        .fetch_one(&self.pool)
        .await?;

        Ok(Document { id, data: stored })
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_eq(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> StoreResult<Vec<Document>> {
        let rows: Vec<(String, Json<Value>)> = sqlx::query_as(
            r#"
            SELECT id, data FROM documents
            WHERE collection = $1 AND data @> jsonb_build_object($2::text, $3::text)
            ORDER BY id
            "#,
        )
        .bind(collection.as_str())
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(into_documents(rows))
    }

    async fn scan(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let rows: Vec<(String, Json<Value>)> = sqlx::query_as(
            "SELECT id, data FROM documents WHERE collection = $1 ORDER BY id",
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(into_documents(rows))
    }

    async fn ping(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }
}

//! PostgreSQL-backed product store.

use super::ProductRepository;
use crate::config::Config;
use crate::error::StoreError;
use crate::model::{NewProduct, Product, ProductSummary, SortOrder};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;

pub const PRODUCTS_TABLE: &str = "products";

const PRODUCT_COLUMNS: &str = "id, name, price, availability, created_at, updated_at";
const SUMMARY_COLUMNS: &str = "id, name, price, availability";

/// Quote identifier for PostgreSQL (only ever called with fixed names).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Connection options from `DATABASE_URL`. Production requires TLS but does not verify the server certificate.
pub fn connect_options(config: &Config) -> Result<PgConnectOptions, StoreError> {
    let opts = PgConnectOptions::from_str(&config.database_url)?;
    Ok(if config.is_production() {
        opts.ssl_mode(PgSslMode::Require)
    } else {
        opts
    })
}

#[derive(Clone, Debug)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        PgProductStore { pool }
    }

    /// Build a pool without connecting; the first query (or `ping`) opens a connection.
    pub fn connect_lazy(config: &Config) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(connect_options(config)?);
        Ok(PgProductStore { pool })
    }

    /// Create the products table if it does not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let ddl = create_table_sql();
        tracing::debug!(sql = %ddl, "ensure schema");
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    /// Drop and recreate the products table. Every row is lost and the id sequence restarts.
    pub async fn reset(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", quoted(PRODUCTS_TABLE)))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&create_table_sql()).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn create_table_sql() -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            price DOUBLE PRECISION NOT NULL CHECK (price > 0),
            availability BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        quoted(PRODUCTS_TABLE)
    )
}

fn list_sql(order: SortOrder) -> String {
    let direction = if order.descending { "DESC" } else { "ASC" };
    format!(
        "SELECT {} FROM {} ORDER BY {} {}, {} ASC",
        SUMMARY_COLUMNS,
        quoted(PRODUCTS_TABLE),
        quoted(order.column.column_name()),
        direction,
        quoted("id")
    )
}

#[async_trait]
impl ProductRepository for PgProductStore {
    async fn find(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", PRODUCT_COLUMNS, quoted(PRODUCTS_TABLE));
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product, StoreError> {
        let sql = format!(
            "INSERT INTO {} (name, price, availability) VALUES ($1, $2, $3) RETURNING {}",
            quoted(PRODUCTS_TABLE),
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn replace(&self, id: i64, product: NewProduct) -> Result<Option<Product>, StoreError> {
        let sql = format!(
            "UPDATE {} SET name = $2, price = $3, availability = $4, updated_at = NOW() WHERE id = $1 RETURNING {}",
            quoted(PRODUCTS_TABLE),
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.availability)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", quoted(PRODUCTS_TABLE));
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, order: SortOrder) -> Result<Vec<ProductSummary>, StoreError> {
        let sql = list_sql(order);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, ProductSummary>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use crate::model::SortColumn;

    fn config(environment: Environment) -> Config {
        Config {
            database_url: "postgres://user:pw@localhost:5432/products".into(),
            frontend_url: None,
            host: "127.0.0.1".into(),
            port: 4000,
            environment,
        }
    }

    #[test]
    fn list_orders_by_requested_column() {
        assert_eq!(
            list_sql(SortOrder::desc(SortColumn::Price)),
            r#"SELECT id, name, price, availability FROM "products" ORDER BY "price" DESC, "id" ASC"#
        );
        assert!(list_sql(SortOrder::asc(SortColumn::Name)).contains(r#"ORDER BY "name" ASC"#));
    }

    #[test]
    fn production_requires_tls() {
        let opts = connect_options(&config(Environment::Production)).unwrap();
        assert!(matches!(opts.get_ssl_mode(), PgSslMode::Require));
        let opts = connect_options(&config(Environment::Development)).unwrap();
        assert!(!matches!(opts.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn rejects_malformed_url() {
        let mut c = config(Environment::Development);
        c.database_url = "not a url".into();
        assert!(connect_options(&c).is_err());
    }
}

//! PostgreSQL transaction store
//!
//! Records live in the `product_transactions` table (see `migrations/`).
//! Month filters compare the UTC calendar month of `date_of_sale`.

use async_trait::async_trait;
use chrono::{DateTime, Month, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{MonthSummary, PriceRangeCounts, StoreError, StoreResult, TransactionStore};
use crate::domain::{month_index, PriceRange, ProductTransaction, TransactionFilter};

/// Rows per multi-row INSERT; 8 binds per row keeps well under the
/// 65535 bind parameter limit.
const INSERT_CHUNK_SIZE: usize = 1000;

const SELECT_COLUMNS: &str = "SELECT id, title, description, category, price, sold, image, date_of_sale \
     FROM product_transactions WHERE TRUE";

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    title: String,
    description: String,
    category: String,
    price: Decimal,
    sold: bool,
    image: String,
    date_of_sale: DateTime<Utc>,
}

impl From<TransactionRow> for ProductTransaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            category: row.category,
            price: row.price,
            sold: row.sold,
            image: row.image,
            date_of_sale: row.date_of_sale,
        }
    }
}

/// PostgreSQL implementation of [`TransactionStore`]
#[derive(Debug, Clone)]
pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    /// Create a new PgTransactionStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `AND <month matches>` to a query
fn push_month_condition(builder: &mut QueryBuilder<'_, Postgres>, month: Month) {
    builder.push(" AND EXTRACT(MONTH FROM date_of_sale AT TIME ZONE 'UTC')::int = ");
    builder.push_bind(month_index(month) as i32);
}

/// Append the month and search conditions of a list filter
fn push_filter_conditions(builder: &mut QueryBuilder<'_, Postgres>, filter: &TransactionFilter) {
    if let Some(month) = filter.month {
        push_month_condition(builder, month);
    }

    if let Some(term) = &filter.search {
        let pattern = term.like_pattern();
        builder.push(" AND (title ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR description ILIKE ");
        builder.push_bind(pattern);
        if let Some(price) = term.price() {
            builder.push(" OR price = ");
            builder.push_bind(price);
        }
        builder.push(")");
    }
}

fn to_count(value: i64) -> StoreResult<u64> {
    u64::try_from(value).map_err(|_| StoreError::InvalidData(format!("negative count {}", value)))
}

fn to_sql_limit(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn replace_all(&self, records: Vec<ProductTransaction>) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM product_transactions")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0u64;
        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO product_transactions \
                 (id, title, description, category, price, sold, image, date_of_sale) ",
            );
            builder.push_values(chunk, |mut row, record| {
                row.push_bind(record.id)
                    .push_bind(&record.title)
                    .push_bind(&record.description)
                    .push_bind(&record.category)
                    .push_bind(record.price)
                    .push_bind(record.sold)
                    .push_bind(&record.image)
                    .push_bind(record.date_of_sale);
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(deleted, inserted, "Replaced product transactions");

        Ok(inserted)
    }

    async fn find_page(&self, filter: &TransactionFilter) -> StoreResult<Vec<ProductTransaction>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_COLUMNS);
        push_filter_conditions(&mut builder, filter);
        builder.push(" ORDER BY row_id LIMIT ");
        builder.push_bind(to_sql_limit(filter.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(to_sql_limit(filter.offset()));

        let rows: Vec<TransactionRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(ProductTransaction::from).collect())
    }

    async fn count_matching(&self, filter: &TransactionFilter) -> StoreResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM product_transactions WHERE TRUE");
        push_filter_conditions(&mut builder, filter);

        let total: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        to_count(total)
    }

    async fn month_summary(&self, month: Month) -> StoreResult<MonthSummary> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            SELECT
                COALESCE(SUM(price) FILTER (WHERE sold), 0) AS total_sale_amount,
                COUNT(*) FILTER (WHERE sold) AS total_sold_items,
                COUNT(*) FILTER (WHERE NOT sold) AS total_not_sold_items
            FROM product_transactions
            WHERE TRUE"#,
        );
        push_month_condition(&mut builder, month);

        let (total_sale_amount, sold, not_sold): (Decimal, i64, i64) =
            builder.build_query_as().fetch_one(&self.pool).await?;

        Ok(MonthSummary {
            total_sale_amount,
            sold_items: to_count(sold)?,
            not_sold_items: to_count(not_sold)?,
        })
    }

    async fn price_range_counts(&self, month: Month) -> StoreResult<PriceRangeCounts> {
        // One FILTER column per bucket, bounds taken from PriceRange::ALL
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        for (i, range) in PriceRange::ALL.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            builder.push("COUNT(*) FILTER (WHERE TRUE");
            if let Some(lower) = range.lower_exclusive() {
                builder.push(" AND price > ");
                builder.push_bind(lower);
            }
            if let Some(upper) = range.upper_inclusive() {
                builder.push(" AND price <= ");
                builder.push_bind(upper);
            }
            builder.push(")");
        }
        builder.push(" FROM product_transactions WHERE TRUE");
        push_month_condition(&mut builder, month);

        let row = builder.build().fetch_one(&self.pool).await?;

        let mut counts: PriceRangeCounts = [0; PriceRange::ALL.len()];
        for (i, count) in counts.iter_mut().enumerate() {
            let value: i64 = sqlx::Row::try_get(&row, i)?;
            *count = to_count(value)?;
        }
        Ok(counts)
    }

    async fn category_counts(&self, month: Month) -> StoreResult<Vec<(String, u64)>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "SELECT category, COUNT(*) AS item_count FROM product_transactions WHERE TRUE",
        );
        push_month_condition(&mut builder, month);
        builder.push(" GROUP BY category ORDER BY item_count DESC, category ASC");

        let rows: Vec<(String, i64)> = builder.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter()
            .map(|(category, count)| Ok((category, to_count(count)?)))
            .collect()
    }
}

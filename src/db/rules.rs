//! Rule repository, generic over [`RuleKind`].
//!
//! Multi-value requests are served by single batched statements rather than
//! one query per value: `INSERT .. ON CONFLICT DO NOTHING RETURNING` keeps the
//! duplicate-skip semantics, and `RETURNING` gives per-row results for every
//! operation. Table and column names come from `RuleKind` constants, never
//! from request data.

use sqlx::QueryBuilder;

use crate::db::DbPool;
use crate::rules::{Mode, RuleKind};

/// A full row: id, value, active flag (SQLite integer).
pub type RuleRow<V> = (i64, V, i64);

/// Inserts every value under the given mode, silently skipping values that
/// already exist in the table (under either mode). Returns exactly the rows
/// actually inserted.
pub async fn add_rules<K: RuleKind>(
    pool: &DbPool,
    values: &[K::Value],
    mode: Mode,
) -> Result<Vec<RuleRow<K::Value>>, sqlx::Error> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<sqlx::Sqlite> =
        QueryBuilder::new(format!("INSERT INTO {} ({}, mode) ", K::TABLE, K::COLUMN));
    qb.push_values(values.iter().cloned(), |mut row, value| {
        row.push_bind(value).push_bind(mode.as_str());
    });
    qb.push(format!(
        " ON CONFLICT ({}) DO NOTHING RETURNING id, {}, active",
        K::COLUMN,
        K::COLUMN
    ));

    qb.build_query_as().fetch_all(pool).await
}

/// Deletes rows matching both value and mode. Returns the values actually
/// deleted; values under the other mode (or absent) are left untouched.
pub async fn delete_rules<K: RuleKind>(
    pool: &DbPool,
    values: &[K::Value],
    mode: Mode,
) -> Result<Vec<K::Value>, sqlx::Error> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<sqlx::Sqlite> =
        QueryBuilder::new(format!("DELETE FROM {} WHERE mode = ", K::TABLE));
    qb.push_bind(mode.as_str());
    qb.push(format!(" AND {} IN (", K::COLUMN));
    let mut sep = qb.separated(", ");
    for value in values {
        sep.push_bind(value.clone());
    }
    qb.push(format!(") RETURNING {}", K::COLUMN));

    let rows: Vec<(K::Value,)> = qb.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().map(|(value,)| value).collect())
}

/// All `(id, value)` rows for one mode, in storage order.
pub async fn list_by_mode<K: RuleKind>(
    pool: &DbPool,
    mode: Mode,
) -> Result<Vec<(i64, K::Value)>, sqlx::Error> {
    let sql = format!("SELECT id, {} FROM {} WHERE mode = ?", K::COLUMN, K::TABLE);
    sqlx::query_as(&sql).bind(mode.as_str()).fetch_all(pool).await
}

/// Sets the active flag for every row whose id is in `ids` AND whose mode
/// matches. Ids under the other mode are silently left alone. Returns the
/// updated rows.
pub async fn update_status<K: RuleKind>(
    pool: &DbPool,
    ids: &[i64],
    mode: Mode,
    active: bool,
) -> Result<Vec<RuleRow<K::Value>>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<sqlx::Sqlite> =
        QueryBuilder::new(format!("UPDATE {} SET active = ", K::TABLE));
    qb.push_bind(if active { 1_i64 } else { 0 });
    qb.push(" WHERE mode = ");
    qb.push_bind(mode.as_str());
    qb.push(" AND id IN (");
    let mut sep = qb.separated(", ");
    for id in ids {
        sep.push_bind(*id);
    }
    qb.push(format!(") RETURNING id, {}, active", K::COLUMN));

    qb.build_query_as().fetch_all(pool).await
}

use serde::{de::DeserializeOwned, Serialize};

use crate::db::Database;
use crate::error::Result;

/// Generic indexed-entity access over the `kv` table.
///
/// Each entity kind lives in its own namespace; records are stored as JSON
/// and listed in key order, which is what the pagination cursor walks.
pub struct EntityStore;

impl EntityStore {
    /// Insert or replace an entity
    pub async fn put<T: Serialize>(db: &Database, ns: &str, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        sqlx::query("INSERT OR REPLACE INTO kv (namespace, key, value) VALUES (?, ?, ?)")
            .bind(ns)
            .bind(key)
            .bind(&json)
            .execute(db.pool())
            .await?;
        Ok(())
    }

    /// Get an entity by key
    pub async fn get<T: DeserializeOwned>(db: &Database, ns: &str, key: &str) -> Result<Option<T>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM kv WHERE namespace = ? AND key = ?")
                .bind(ns)
                .bind(key)
                .fetch_optional(db.pool())
                .await?;

        match row {
            Some((json,)) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Delete an entity; returns whether a record existed
    pub async fn delete(db: &Database, ns: &str, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM kv WHERE namespace = ? AND key = ?")
            .bind(ns)
            .bind(key)
            .execute(db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List one key-ordered page of a namespace.
    ///
    /// `after` is the resume cursor (exclusive). Returns the page plus the
    /// cursor for the next page, or `None` when the namespace is exhausted.
    pub async fn list_page<T: DeserializeOwned>(
        db: &Database,
        ns: &str,
        after: Option<&str>,
        limit: i64,
    ) -> Result<(Vec<T>, Option<String>)> {
        // Fetch one extra row to learn whether another page exists.
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT key, value FROM kv WHERE namespace = ? AND key > ? ORDER BY key LIMIT ?",
        )
        .bind(ns)
        .bind(after.unwrap_or(""))
        .bind(limit + 1)
        .fetch_all(db.pool())
        .await?;

        let has_more = rows.len() as i64 > limit;
        let mut items = Vec::with_capacity(rows.len());
        let mut last_key = None;
        for (key, json) in rows.into_iter().take(limit as usize) {
            items.push(serde_json::from_str(&json)?);
            last_key = Some(key);
        }

        let next = if has_more { last_key } else { None };
        Ok((items, next))
    }
}

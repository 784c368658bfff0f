//! Joke rows and the list projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// A joke as stored in the `jokes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Joke {
    pub id: String,
    /// Id of the user who posted the joke.
    pub jokester_id: String,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The two columns the joke list needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JokeListItem {
    pub id: String,
    pub name: String,
}

impl Joke {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<JokeListItem>, sqlx::Error> {
        sqlx::query_as("SELECT id, name FROM jokes ORDER BY created_at, name")
            .fetch_all(pool)
            .await
    }

    pub async fn find(pool: &SqlitePool, id: &str) -> Result<Option<Joke>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM jokes WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn random(pool: &SqlitePool) -> Result<Option<Joke>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM jokes ORDER BY RANDOM() LIMIT 1")
            .fetch_optional(pool)
            .await
    }

    pub async fn insert(
        pool: &SqlitePool,
        jokester_id: &str,
        name: &str,
        content: &str,
    ) -> Result<Joke, sqlx::Error> {
        let now = Utc::now();
        sqlx::query_as(
            "INSERT INTO jokes (id, jokester_id, name, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(jokester_id)
        .bind(name)
        .bind(content)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jokes WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

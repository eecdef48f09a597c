use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::utils::edit_distance::distance;

/// Surnames further than this many edits from the input are not suggested.
pub const SUGGESTION_MAX_DISTANCE: usize = 3;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
}

/// A display name split into its parts, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherName {
    pub full_name: String,
    pub last_name: String,
    pub first_name: String,
    pub patronymic: Option<String>,
}

impl TeacherName {
    /// Splits "Surname Name Patronymic" on single spaces. Only the first three
    /// parts are kept; missing ones become empty (first name) or `None`.
    pub fn parse(full_name: &str) -> Self {
        let mut parts = full_name.split(' ');
        let last_name = parts.next().unwrap_or_default().to_string();
        let first_name = parts.next().unwrap_or_default().to_string();
        let patronymic = parts
            .next()
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Self {
            full_name: full_name.to_string(),
            last_name,
            first_name,
            patronymic,
        }
    }
}

impl Teacher {
    pub async fn insert_all(
        conn: &mut SqliteConnection,
        names: &[TeacherName],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for name in names {
            inserted += sqlx::query(
                "INSERT INTO teachers (full_name, last_name, first_name, patronymic) VALUES (?, ?, ?, ?)",
            )
            .bind(&name.full_name)
            .bind(&name.last_name)
            .bind(&name.first_name)
            .bind(&name.patronymic)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(inserted)
    }

    /// Exact match on last name. When several teachers share it, the first inserted wins.
    pub async fn find_by_last_name(
        pool: &sqlx::SqlitePool,
        surname: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(
            "SELECT id, full_name, last_name, first_name, patronymic FROM teachers WHERE last_name = ? ORDER BY id LIMIT 1",
        )
        .bind(surname)
        .fetch_optional(pool)
        .await
    }

    pub async fn id_by_surname(
        pool: &sqlx::SqlitePool,
        surname: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        Ok(Self::find_by_last_name(pool, surname)
            .await?
            .map(|teacher| teacher.id))
    }

    /// Last names within `max_distance` edits of `surname`, one entry per
    /// matching teacher row.
    pub async fn surname_suggestions(
        pool: &sqlx::SqlitePool,
        surname: &str,
        max_distance: usize,
    ) -> Result<Vec<String>, sqlx::Error> {
        let last_names: Vec<String> =
            sqlx::query_scalar::<_, String>("SELECT last_name FROM teachers ORDER BY id")
                .fetch_all(pool)
                .await?;

        Ok(last_names
            .into_iter()
            .filter(|last_name| distance(last_name, surname) <= max_distance)
            .collect())
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teachers")
            .fetch_one(pool)
            .await
    }
}

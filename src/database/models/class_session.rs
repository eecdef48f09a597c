use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::parser::ClassRecord;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassSession {
    pub id: i64,
    #[sqlx(rename = "class_group")]
    pub group: String,
    pub month: i64,
    pub day: i64,
    pub time: String,
    pub info: String,
}

impl ClassSession {
    /// Inserts parsed classes in order and returns how many rows were written.
    pub async fn insert_all(
        conn: &mut SqliteConnection,
        records: &[ClassRecord],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for record in records {
            inserted += sqlx::query(
                "INSERT INTO classes (class_group, month, day, time, info) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&record.group)
            .bind(record.month)
            .bind(record.day)
            .bind(&record.time)
            .bind(&record.info)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        }
        Ok(inserted)
    }

    /// Classes linked to a teacher on or after `from_day` of `from_month`,
    /// or in any later month. The window does not wrap past December.
    pub async fn for_teacher(
        pool: &sqlx::SqlitePool,
        teacher_id: i64,
        from_day: i64,
        from_month: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ClassSession>(
            "SELECT c.id, c.class_group, c.month, c.day, c.time, c.info
             FROM classes c
             INNER JOIN teacher_class_links l ON c.id = l.class_id
             WHERE l.teacher_id = ?
               AND ((c.month = ? AND c.day >= ?) OR c.month > ?)
             ORDER BY c.month, c.day, c.id",
        )
        .bind(teacher_id)
        .bind(from_month)
        .bind(from_day)
        .bind(from_month)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM classes")
            .fetch_one(pool)
            .await
    }
}

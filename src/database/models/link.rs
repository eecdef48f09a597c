use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

/// A teacher appearing in a class description.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeacherClassLink {
    pub class_id: i64,
    pub teacher_id: i64,
}

impl TeacherClassLink {
    /// Links every class to every teacher whose last name occurs in the
    /// class info. Overlapping surnames produce several links on purpose.
    pub async fn derive_all(conn: &mut SqliteConnection) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO teacher_class_links (class_id, teacher_id)
             SELECT c.id, t.id
             FROM classes c
             JOIN teachers t ON t.last_name <> '' AND instr(c.info, t.last_name) > 0",
        )
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM teacher_class_links")
            .fetch_one(pool)
            .await
    }
}

use chrono::{SecondsFormat, SubsecRound, Utc};
use sqlx::SqlitePool;

use crate::models::{Course, NewCourse};

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, title, description, created_at
        FROM courses
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        "SELECT id, title, description, created_at FROM courses WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_course(db: &SqlitePool, new: NewCourse) -> Result<Course, sqlx::Error> {
    // Stored with fixed precision so that text ordering matches time ordering.
    let created_at = Utc::now().trunc_subsecs(6);
    let stamp = created_at.to_rfc3339_opts(SecondsFormat::Micros, true);

    let id = sqlx::query(
        r#"
        INSERT INTO courses (title, description, created_at)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(&new.title)
    .bind(&new.description)
    .bind(&stamp)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(Course {
        id,
        title: new.title,
        description: new.description,
        created_at,
    })
}

/// Overwrites the editable fields. `None` means no record has that id.
pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    changes: NewCourse,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        UPDATE courses
        SET title = ?1,
            description = ?2
        WHERE id = ?3
        RETURNING id, title, description, created_at
        "#,
    )
    .bind(&changes.title)
    .bind(&changes.description)
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?1")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn count_courses(db: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(db)
        .await
}

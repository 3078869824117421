//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for shifts and schedule details.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Reference shifts; existing rows are left untouched.
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO shifts (id, name, kind, start_time, end_time) VALUES
            ('MORNING', 'Ca sáng', 'MORNING', '07:00:00', '11:00:00'),
            ('AFTERNOON', 'Ca chiều', 'AFTERNOON', '13:00:00', '17:00:00'),
            ('NIGHT', 'Ca tối', 'NIGHT', '17:00:00', '21:00:00'),
            ('FULL_DAY', 'Cả ngày', 'FULL_DAY', '07:00:00', '17:00:00');
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_details (
            id TEXT PRIMARY KEY,
            staff_id TEXT NOT NULL,
            shift_id TEXT NOT NULL REFERENCES shifts(id),
            shift_date TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'SCHEDULED',
            note TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_schedule_details_staff_date
            ON schedule_details(staff_id, shift_date);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

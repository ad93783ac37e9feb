use std::path::Path;

use contracts::domain::a001_resume::Resume;
use contracts::domain::a002_posting::Posting;
use contracts::domain::a003_application::Application;
use contracts::domain::a004_response_type::ResponseType;
use contracts::domain::a005_response::Response;
use contracts::domain::common::AggregateRoot;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the database, create missing tables and keep the connection for the
/// rest of the process
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<()> {
    let conn = connect(db_file).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

pub async fn connect(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    Ok(Database::connect(&db_url).await?)
}

/// (table, columns) of every entity, parents before children
fn schema() -> Vec<(String, &'static str)> {
    vec![
        (
            Resume::full_name(),
            "id INTEGER PRIMARY KEY AUTOINCREMENT,
             data TEXT NOT NULL",
        ),
        (
            Posting::full_name(),
            "id INTEGER PRIMARY KEY AUTOINCREMENT,
             platform TEXT NOT NULL,
             company TEXT NOT NULL,
             title TEXT NOT NULL,
             salary REAL,
             description TEXT,
             responsibilities TEXT NOT NULL,
             qualifications TEXT NOT NULL,
             remote INTEGER",
        ),
        (
            Application::full_name(),
            "id INTEGER PRIMARY KEY AUTOINCREMENT,
             posting_id INTEGER NOT NULL,
             resume_id INTEGER NOT NULL,
             date_submitted TEXT NOT NULL",
        ),
        (
            ResponseType::full_name(),
            "id INTEGER PRIMARY KEY AUTOINCREMENT,
             name TEXT NOT NULL",
        ),
        (
            Response::full_name(),
            "id INTEGER PRIMARY KEY AUTOINCREMENT,
             application_id INTEGER NOT NULL,
             response_type_id INTEGER NOT NULL,
             date_received TEXT NOT NULL,
             data TEXT",
        ),
    ]
}

/// Minimal schema bootstrap: create every table that does not exist yet
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, columns) in schema() {
        let existing = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
                    table
                ),
            ))
            .await?;
        if !existing.is_empty() {
            tracing::debug!("Table {} already exists", table);
            continue;
        }

        tracing::info!("Creating new {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("CREATE TABLE {} ({});", table, columns),
        ))
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(conn: &DatabaseConnection) -> Vec<String> {
        conn.query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'a00%' ORDER BY name;"
                .to_string(),
        ))
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.try_get::<String>("", "name").unwrap())
        .collect()
    }

    #[tokio::test]
    async fn test_bootstrap_creates_every_table_once() {
        let dir = tempfile::tempdir().unwrap();
        let conn = connect(&dir.path().join("db").join("jobs.db")).await.unwrap();

        bootstrap_schema(&conn).await.unwrap();
        // Second start finds the tables in place
        bootstrap_schema(&conn).await.unwrap();

        assert_eq!(
            table_names(&conn).await,
            vec![
                "a001_resumes",
                "a002_postings",
                "a003_applications",
                "a004_response_types",
                "a005_responses",
            ]
        );
    }
}

//! Database connection utilities.

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Configure SQLite-specific pragmas for better performance and concurrency.
///
/// This sets:
/// - `journal_mode=WAL` - Write-ahead logging for better concurrent access
/// - `busy_timeout=5000` - Wait up to 5 seconds for locks instead of failing immediately
/// - `synchronous=NORMAL` - Good balance of safety and performance with WAL
async fn configure_sqlite(db: &DatabaseConnection) -> Result<(), DbErr> {
    use sea_orm::{ConnectionTrait, Statement};

    for pragma in [
        "PRAGMA journal_mode=WAL",
        "PRAGMA busy_timeout=5000",
        "PRAGMA synchronous=NORMAL",
    ] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            pragma.to_string(),
        ))
        .await?;
    }

    Ok(())
}

/// Establish a connection to the database.
///
/// For SQLite databases, this automatically configures WAL journal mode, a
/// 5 second busy timeout, and NORMAL synchronous mode.
///
/// # Errors
/// Returns `DbErr` if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Covers both file URLs (sqlite://...) and sqlite::memory:
    if database_url.starts_with("sqlite:") {
        configure_sqlite(&db).await?;
    }

    Ok(db)
}

/// Establish a connection to the database and run all pending migrations.
///
/// This is the recommended way to initialize the database: it ensures the
/// schema and its uniqueness constraints - which the reconciliation engine
/// depends on as its concurrency arbiter - are always in place.
///
/// # Errors
/// Returns `DbErr` if the connection cannot be established or migrations fail.
#[cfg(feature = "migrate")]
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    use sea_orm_migration::MigratorTrait;

    let db = Database::connect(database_url).await?;

    if database_url.starts_with("sqlite:") {
        configure_sqlite(&db).await?;
    }

    crate::migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlite")]
    async fn pragma_value(db: &DatabaseConnection, pragma: &str) -> i64 {
        use sea_orm::{ConnectionTrait, Statement};

        let row = db
            .query_one(Statement::from_string(
                db.get_database_backend(),
                format!("PRAGMA {pragma}"),
            ))
            .await
            .expect("pragma query should run")
            .expect("pragma should return a row");
        row.try_get_by_index::<i64>(0).expect("pragma value")
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn connect_applies_sqlite_pragmas() {
        let db = connect("sqlite::memory:").await.expect("connect");

        assert_eq!(pragma_value(&db, "busy_timeout").await, 5000);
        // synchronous=NORMAL reads back as 1
        assert_eq!(pragma_value(&db, "synchronous").await, 1);
    }

    #[tokio::test]
    async fn connect_rejects_unknown_scheme() {
        let err = connect("carrier-pigeon://coop")
            .await
            .expect_err("unknown scheme should error");
        assert!(!err.to_string().is_empty());
    }
}

//! Database module
//!
//! Database connection and schema verification utilities.

use sqlx::PgPool;

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}

/// Check if required tables exist
///
/// Migrations live as raw SQL files in the migrations/ directory.
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let required_tables = vec!["events", "attendees"];

    for table in required_tables {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    // The composite uniqueness constraint is the last line of defense for
    // duplicate registrations; refuse to start without it.
    let constraint_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM information_schema.table_constraints
            WHERE table_name = 'attendees'
              AND constraint_name = 'uq_attendees_email_event'
              AND constraint_type = 'UNIQUE'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !constraint_exists {
        tracing::error!("Unique constraint 'uq_attendees_email_event' is missing on attendees");
        return Ok(false);
    }

    Ok(true)
}

//! Schema migrations for users, lists, items and their ownership edges

use sqlx::PgPool;

/// Run all migrations. Every statement is idempotent.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running todoctl migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            username VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todo_lists (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users_lists (
            id SERIAL PRIMARY KEY,
            user_id INT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
            list_id INT NOT NULL REFERENCES todo_lists (id) ON DELETE CASCADE,
            UNIQUE (list_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todo_items (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            done BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lists_items (
            id SERIAL PRIMARY KEY,
            item_id INT NOT NULL REFERENCES todo_items (id) ON DELETE CASCADE,
            list_id INT NOT NULL REFERENCES todo_lists (id) ON DELETE CASCADE,
            UNIQUE (item_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_lists_user ON users_lists (user_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_lists_items_list ON lists_items (list_id)")
        .execute(pool)
        .await?;

    tracing::info!("todoctl migrations complete");
    Ok(())
}

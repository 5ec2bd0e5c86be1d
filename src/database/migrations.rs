use tokio_postgres::Client;

// Creates the two collections the forwarder reads from, if they are missing.
pub async fn apply_migrations(client: &Client) -> Result<(), String> {
    let create_chats_table_query = "
        CREATE TABLE IF NOT EXISTS chats (
            id TEXT PRIMARY KEY,
            participant_ids TEXT[] NOT NULL DEFAULT '{}'
        )
    ";
    client
        .execute(create_chats_table_query, &[])
        .await
        .map_err(|e| format!("Error creating chats table: {}", e))?;

    let create_users_table_query = "
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            display_name TEXT,
            fcm_token TEXT
        )
    ";
    client
        .execute(create_users_table_query, &[])
        .await
        .map_err(|e| format!("Error creating users table: {}", e))?;

    Ok(())
}

use crate::config::DatabaseConfig;
use duckdb::{Connection, Result as DbResult};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Shared database handle. Locked per store call and released before any
/// network I/O; the lock is never held across the completion-provider await.
pub type DbPool = Arc<Mutex<Connection>>;

const SCHEMA: &str = r#"
CREATE SEQUENCE IF NOT EXISTS seq_messages_order;

CREATE TABLE IF NOT EXISTS conversations (
    id UUID PRIMARY KEY,
    created_at VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id UUID PRIMARY KEY,
    conversation_id UUID NOT NULL,
    sender VARCHAR NOT NULL CHECK (sender IN ('user', 'assistant')),
    text TEXT NOT NULL,
    seq BIGINT NOT NULL DEFAULT nextval('seq_messages_order'),
    created_at VARCHAR NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_conversation ON messages(conversation_id, created_at);
"#;

pub fn get_connection(config: &DatabaseConfig) -> DbResult<DbPool> {
    info!("Connecting to DuckDB at {}", config.path);
    let conn = Connection::open(&config.path)?;

    init_schema(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

fn init_schema(conn: &Connection) -> DbResult<()> {
    info!("Initializing database schema");
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

use crate::db::models::{Conversation, Message, Sender};
use chrono::{DateTime, SecondsFormat, Utc};
use duckdb::{params, types::Type, Connection, Result as DbResult, Row};
use uuid::Uuid;

/// Persistence gateway for conversations and messages. Every operation is a
/// single parameterized statement against the shared connection; callers own
/// the lock for the duration of one call only.
pub struct ChatStore;

impl ChatStore {
    // Timestamps are stored as fixed-width RFC 3339 text so that lexicographic
    // and chronological order coincide.
    fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn parse_uuid(idx: usize, raw: &str) -> DbResult<Uuid> {
        raw.parse::<Uuid>()
            .map_err(|e| duckdb::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn parse_timestamp(idx: usize, raw: &str) -> DbResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| duckdb::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    }

    fn row_to_conversation(row: &Row) -> DbResult<Conversation> {
        Ok(Conversation {
            id: Self::parse_uuid(0, &row.get::<_, String>(0)?)?,
            created_at: Self::parse_timestamp(1, &row.get::<_, String>(1)?)?,
        })
    }

    fn row_to_message(row: &Row) -> DbResult<Message> {
        let sender_raw: String = row.get(2)?;
        let sender = Sender::parse(&sender_raw).ok_or_else(|| {
            duckdb::Error::FromSqlConversionFailure(
                2,
                Type::Text,
                format!("unknown sender value: {}", sender_raw).into(),
            )
        })?;

        Ok(Message {
            id: Self::parse_uuid(0, &row.get::<_, String>(0)?)?,
            conversation_id: Self::parse_uuid(1, &row.get::<_, String>(1)?)?,
            sender,
            text: row.get(3)?,
            created_at: Self::parse_timestamp(4, &row.get::<_, String>(4)?)?,
        })
    }

    // --- Conversation operations ---

    pub fn create_conversation(conn: &Connection) -> DbResult<Conversation> {
        let id = Uuid::new_v4();
        let created_at = Self::now();

        conn.execute(
            "INSERT INTO conversations (id, created_at) VALUES (?, ?)",
            params![id.to_string(), created_at],
        )?;

        Ok(Conversation {
            id,
            created_at: Self::parse_timestamp(1, &created_at)?,
        })
    }

    pub fn conversation_exists(conn: &Connection, id: Uuid) -> DbResult<bool> {
        let mut stmt = conn.prepare("SELECT 1 FROM conversations WHERE id = ?")?;
        let mut rows = stmt.query(params![id.to_string()])?;
        Ok(rows.next()?.is_some())
    }

    pub fn get_conversation(conn: &Connection, id: Uuid) -> DbResult<Option<Conversation>> {
        let mut stmt =
            conn.prepare("SELECT id, created_at FROM conversations WHERE id = ?")?;
        let mut rows = stmt.query_map(params![id.to_string()], Self::row_to_conversation)?;

        if let Some(row) = rows.next() {
            Ok(Some(row?))
        } else {
            Ok(None)
        }
    }

    // --- Message operations ---

    pub fn save_message(
        conn: &Connection,
        conversation_id: Uuid,
        sender: Sender,
        text: &str,
    ) -> DbResult<Message> {
        let id = Uuid::new_v4();
        let created_at = Self::now();

        conn.execute(
            "INSERT INTO messages (id, conversation_id, sender, text, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                id.to_string(),
                conversation_id.to_string(),
                sender.as_str(),
                text,
                created_at
            ],
        )?;

        Ok(Message {
            id,
            conversation_id,
            sender,
            text: text.to_string(),
            created_at: Self::parse_timestamp(4, &created_at)?,
        })
    }

    /// The most recent `limit` messages of a conversation, returned
    /// oldest-first. Ties on `created_at` fall back to insertion order.
    pub fn get_history(
        conn: &Connection,
        conversation_id: Uuid,
        limit: usize,
    ) -> DbResult<Vec<Message>> {
        let mut stmt = conn.prepare(
            "SELECT id, conversation_id, sender, text, created_at FROM (
                 SELECT id, conversation_id, sender, text, created_at, seq
                 FROM messages
                 WHERE conversation_id = ?
                 ORDER BY created_at DESC, seq DESC
                 LIMIT ?
             ) ORDER BY created_at ASC, seq ASC",
        )?;

        let rows = stmt.query_map(
            params![conversation_id.to_string(), limit as i64],
            Self::row_to_message,
        )?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }

    /// Full message list of a conversation, ascending by creation time.
    pub fn get_messages(conn: &Connection, conversation_id: Uuid) -> DbResult<Vec<Message>> {
        let mut stmt = conn.prepare(
            "SELECT id, conversation_id, sender, text, created_at
             FROM messages
             WHERE conversation_id = ?
             ORDER BY created_at ASC, seq ASC",
        )?;

        let rows = stmt.query_map(params![conversation_id.to_string()], Self::row_to_message)?;

        let mut messages = Vec::new();
        for row in rows {
            messages.push(row?);
        }
        Ok(messages)
    }
}

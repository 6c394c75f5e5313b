use std::sync::{Arc, MutexGuard};

use duckdb::Connection;
use serde::Serialize;
use tracing::{info, warn};
use uuid::{Uuid, Variant};

use crate::config::ChatConfig;
use crate::db::store::ChatStore;
use crate::db::{Conversation, DbPool, Message, Sender};
use crate::error::AppError;
use crate::llm::{models::ChatTurn, CompletionGateway};

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// Conversation orchestrator. Owns conversation-id issuance, message
/// ordering, the bounded history window, and the call sequence
/// store -> provider -> store. One instance per process, shared by handlers.
pub struct ChatService {
    pool: DbPool,
    gateway: Arc<dyn CompletionGateway>,
    config: ChatConfig,
}

impl ChatService {
    pub fn new(pool: DbPool, gateway: Arc<dyn CompletionGateway>, config: ChatConfig) -> Self {
        Self {
            pool,
            gateway,
            config,
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.pool
            .lock()
            .map_err(|_| AppError::Internal("database handle poisoned".to_string()))
    }

    /// Process one user turn: validate, resolve the conversation, persist the
    /// user message, obtain a reply under the bounded history window, persist
    /// the reply.
    ///
    /// Validation and existence failures write nothing. A provider failure
    /// leaves the user message persisted with no assistant row; the caller
    /// resubmits with the same session id to retry.
    pub async fn process_message(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatReply, AppError> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation("Message cannot be empty".to_string()));
        }
        if trimmed.chars().count() > self.config.max_message_length {
            return Err(AppError::Validation(format!(
                "Message is too long. Maximum {} characters allowed.",
                self.config.max_message_length
            )));
        }

        // Parsed before any storage access; a blank session id means "new".
        let supplied_id = session_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_session_id)
            .transpose()?;

        let (conversation_id, prior_turns) = {
            let conn = self.conn()?;

            let conversation_id = match supplied_id {
                // Client-supplied ids must already exist; conversations are
                // never created for them.
                Some(id) => {
                    if !ChatStore::conversation_exists(&conn, id)? {
                        return Err(AppError::NotFound(
                            "Conversation not found. Please start a new chat.".to_string(),
                        ));
                    }
                    id
                }
                None => {
                    let conversation = ChatStore::create_conversation(&conn)?;
                    info!(conversation_id = %conversation.id, "created conversation");
                    conversation.id
                }
            };

            let user_msg =
                ChatStore::save_message(&conn, conversation_id, Sender::User, trimmed)?;

            let mut history =
                ChatStore::get_history(&conn, conversation_id, self.config.max_history_messages)?;
            // The just-saved user message goes to the gateway separately.
            history.retain(|m| m.id != user_msg.id);

            let prior_turns: Vec<ChatTurn> = history
                .iter()
                .map(|m| ChatTurn::new(m.sender.as_str(), m.text.clone()))
                .collect();

            (conversation_id, prior_turns)
            // Lock released here, before the provider call.
        };

        let reply = self.gateway.generate(&prior_turns, trimmed).await?;

        let conn = self.conn()?;
        ChatStore::save_message(&conn, conversation_id, Sender::Assistant, &reply)?;

        Ok(ChatReply {
            reply,
            session_id: conversation_id,
        })
    }

    /// Conversation with its full message list, ascending by time. The
    /// message load is best-effort on this read path: a failure yields an
    /// empty list rather than an error.
    pub fn get_conversation(&self, raw_id: &str) -> Result<Option<ConversationView>, AppError> {
        let id = parse_session_id(raw_id)?;
        let conn = self.conn()?;

        let Some(conversation) = ChatStore::get_conversation(&conn, id)? else {
            return Ok(None);
        };

        let messages = match ChatStore::get_messages(&conn, id) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(conversation_id = %id, error = %e, "history load failed, returning empty list");
                Vec::new()
            }
        };

        Ok(Some(ConversationView {
            conversation,
            messages,
        }))
    }
}

/// Session ids must be well-formed UUID v4 strings (case-insensitive,
/// RFC 4122 variant).
fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    let invalid = || AppError::Validation("Invalid session id format".to_string());

    let id = Uuid::try_parse(raw.trim()).map_err(|_| invalid())?;
    if id.get_version_num() != 4 || id.get_variant() != Variant::RFC4122 {
        return Err(invalid());
    }
    Ok(id)
}

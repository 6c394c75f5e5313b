#[cfg(test)]
mod tests {
    use supportline::config::DatabaseConfig;
    use supportline::db::store::ChatStore;
    use supportline::db::{get_connection, DbPool, Sender};
    use uuid::Uuid;

    // In-memory database just for tests
    fn test_pool() -> DbPool {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
        };
        get_connection(&config).unwrap()
    }

    #[test]
    fn test_conversation_lifecycle() {
        let pool = test_pool();
        let conn = pool.lock().unwrap();

        let conversation = ChatStore::create_conversation(&conn).unwrap();
        assert_eq!(conversation.id.get_version_num(), 4);

        assert!(ChatStore::conversation_exists(&conn, conversation.id).unwrap());
        assert!(!ChatStore::conversation_exists(&conn, Uuid::new_v4()).unwrap());

        let fetched = ChatStore::get_conversation(&conn, conversation.id)
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, conversation.id);
        assert_eq!(fetched.created_at, conversation.created_at);

        assert!(ChatStore::get_conversation(&conn, Uuid::new_v4())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_message_round_trip() {
        let pool = test_pool();
        let conn = pool.lock().unwrap();
        let conversation = ChatStore::create_conversation(&conn).unwrap();

        let user_msg =
            ChatStore::save_message(&conn, conversation.id, Sender::User, "Where is my order?")
                .unwrap();
        let assistant_msg = ChatStore::save_message(
            &conn,
            conversation.id,
            Sender::Assistant,
            "Let me check that for you.",
        )
        .unwrap();

        assert_eq!(user_msg.conversation_id, conversation.id);
        assert_eq!(user_msg.sender, Sender::User);
        assert_eq!(assistant_msg.sender, Sender::Assistant);

        let messages = ChatStore::get_messages(&conn, conversation.id).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, user_msg.id);
        assert_eq!(messages[0].text, "Where is my order?");
        assert_eq!(messages[1].id, assistant_msg.id);
        assert_eq!(messages[1].text, "Let me check that for you.");
        assert!(messages[1].created_at >= messages[0].created_at);
    }

    #[test]
    fn test_history_returns_most_recent_window_oldest_first() {
        let pool = test_pool();
        let conn = pool.lock().unwrap();
        let conversation = ChatStore::create_conversation(&conn).unwrap();

        for i in 0..14 {
            let sender = if i % 2 == 0 {
                Sender::User
            } else {
                Sender::Assistant
            };
            ChatStore::save_message(&conn, conversation.id, sender, &format!("m{}", i)).unwrap();
        }

        let history = ChatStore::get_history(&conn, conversation.id, 10).unwrap();
        assert_eq!(history.len(), 10);
        // Most recent 10 of m0..m13 are m4..m13, ascending.
        assert_eq!(history[0].text, "m4");
        assert_eq!(history[9].text, "m13");
        for pair in history.windows(2) {
            assert!(pair[1].created_at >= pair[0].created_at);
        }
    }

    #[test]
    fn test_history_smaller_than_window() {
        let pool = test_pool();
        let conn = pool.lock().unwrap();
        let conversation = ChatStore::create_conversation(&conn).unwrap();

        ChatStore::save_message(&conn, conversation.id, Sender::User, "hello").unwrap();

        let history = ChatStore::get_history(&conn, conversation.id, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "hello");
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let pool = test_pool();
        let conn = pool.lock().unwrap();
        let conversation = ChatStore::create_conversation(&conn).unwrap();

        ChatStore::save_message(&conn, conversation.id, Sender::User, "first").unwrap();
        ChatStore::save_message(&conn, conversation.id, Sender::Assistant, "second").unwrap();

        let first = ChatStore::get_messages(&conn, conversation.id).unwrap();
        let second = ChatStore::get_messages(&conn, conversation.id).unwrap();

        let ids: Vec<_> = first.iter().map(|m| m.id).collect();
        let ids_again: Vec<_> = second.iter().map(|m| m.id).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn test_messages_scoped_to_conversation() {
        let pool = test_pool();
        let conn = pool.lock().unwrap();
        let a = ChatStore::create_conversation(&conn).unwrap();
        let b = ChatStore::create_conversation(&conn).unwrap();

        ChatStore::save_message(&conn, a.id, Sender::User, "for a").unwrap();
        ChatStore::save_message(&conn, b.id, Sender::User, "for b").unwrap();

        let messages = ChatStore::get_messages(&conn, a.id).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "for a");
    }
}

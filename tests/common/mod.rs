/// Shared test fixtures and utilities for test modules
pub mod fixtures {
    use cryptowork_bot::telegram::{Chat, Message, Update, User, WebAppData};
    use cryptowork_bot::traits::HostBridge;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// Host bridge double that keeps every payload it is handed
    #[derive(Default)]
    pub struct RecordingBridge {
        pub sent: Mutex<Vec<String>>,
    }

    impl RecordingBridge {
        pub fn payloads(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl HostBridge for RecordingBridge {
        fn send_data(&self, data: &str) {
            self.sent.lock().unwrap().push(data.to_owned());
        }
    }

    pub fn test_user() -> User {
        User {
            id: 1001,
            is_bot: false,
            first_name: "Test".to_string(),
            username: Some("tester".to_string()),
        }
    }

    /// Creates an update carrying a plain text message
    pub fn text_update(update_id: i64, chat_id: i64, text: &str) -> Update {
        Update {
            update_id,
            message: Some(Message {
                message_id: update_id,
                chat: Chat { id: chat_id },
                from: Some(test_user()),
                text: Some(text.to_string()),
                web_app_data: None,
            }),
        }
    }

    /// Creates an update carrying data sent from the Mini App
    pub fn web_app_update(update_id: i64, chat_id: i64, data: &str) -> Update {
        Update {
            update_id,
            message: Some(Message {
                message_id: update_id,
                chat: Chat { id: chat_id },
                from: Some(test_user()),
                text: None,
                web_app_data: Some(WebAppData {
                    data: data.to_string(),
                    button_text: "Open shop".to_string(),
                }),
            }),
        }
    }

    /// Bot API envelope around a successful result
    pub fn ok_response(result: Value) -> Value {
        json!({ "ok": true, "result": result })
    }

    /// Minimal `sendMessage` result as the Bot API returns it
    pub fn sent_message(chat_id: i64) -> Value {
        json!({
            "message_id": 500,
            "chat": { "id": chat_id, "type": "private" },
            "date": 1700000000,
            "text": "ok"
        })
    }

    pub fn test_token() -> &'static str {
        "123456:TEST-token"
    }
}

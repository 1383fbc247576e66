use chrono::Utc;
use tokio::sync::RwLock;

use service_api::{Message, NewMessage};

// ═══════════════════════════════════════════════════════════════
//  MessageStore
// ═══════════════════════════════════════════════════════════════

/// In-memory список сообщений на время жизни процесса.
/// Порядок = порядок append; удаления и изменения нет.
pub struct MessageStore {
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    messages: Vec<Message>,
    last_id: i64,
}

impl MessageStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    pub async fn list(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.messages.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Назначить id и timestamp, сохранить, вернуть сохранённую копию.
    ///
    /// id: наносекунды Unix времени; строго возрастает даже при
    /// грубых часах (повтор показаний → `last + 1`).
    pub async fn append(&self, draft: NewMessage) -> Message {
        let mut state = self.state.write().await;

        let now = Utc::now();
        let nanos = now.timestamp_nanos_opt().unwrap_or(i64::MAX);
        let id = if nanos > state.last_id { nanos } else { state.last_id + 1 };
        state.last_id = id;

        let message = Message {
            id: id.to_string(),
            content: draft.content,
            timestamp: now,
        };
        state.messages.push(message.clone());
        message
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

use crate::models::{DialogState, Language, UserSession};

type SessionMap = Arc<RwLock<HashMap<ChatId, UserSession>>>;

/// Сессии пользователей в памяти процесса.
///
/// Запись появляется при первом изменении; чтение никогда ничего не
/// создаёт. Хранилище живёт до перезапуска процесса, без вытеснения:
/// после рестарта все выборы языка и шаги диалога сбрасываются.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: SessionMap,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Снимок сессии; для незнакомого чата возвращает значения по умолчанию.
    pub async fn get(&self, chat_id: ChatId) -> UserSession {
        let sessions = self.sessions.read().await;
        sessions.get(&chat_id).cloned().unwrap_or_default()
    }

    pub async fn set_language(&self, chat_id: ChatId, language: Language) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(chat_id).or_default().language = language;
    }

    pub async fn set_dialog_state(&self, chat_id: ChatId, state: DialogState) {
        let mut sessions = self.sessions.write().await;
        sessions.entry(chat_id).or_default().dialog_state = state;
    }

    #[cfg(test)]
    async fn contains(&self, chat_id: ChatId) -> bool {
        self.sessions.read().await.contains_key(&chat_id)
    }
}
